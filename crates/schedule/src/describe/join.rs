//! List joining and calendar names shared by every description shape.

use std::collections::BTreeSet;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full English weekday name, Sunday = 0.
pub fn weekday_name(value: u32) -> String {
    WEEKDAYS
        .get(value as usize)
        .map_or_else(|| value.to_string(), |name| name.to_string())
}

/// Full English month name, January = 1.
pub fn month_name(value: u32) -> String {
    value
        .checked_sub(1)
        .and_then(|idx| MONTHS.get(idx as usize))
        .map_or_else(|| value.to_string(), |name| name.to_string())
}

/// Join sorted values into prose.
///
/// Contiguous runs of three or more collapse to "`first` through `last`";
/// everything else is listed, comma-separated with "and" before the last item.
pub fn join_values(values: &BTreeSet<u32>, name: impl Fn(u32) -> String) -> String {
    let values: Vec<u32> = values.iter().copied().collect();
    let mut items = Vec::new();

    let mut i = 0;
    while i < values.len() {
        let mut j = i;
        while j + 1 < values.len() && values[j + 1] == values[j] + 1 {
            j += 1;
        }
        if j - i + 1 >= 3 {
            items.push(format!("{} through {}", name(values[i]), name(values[j])));
        } else {
            items.extend(values[i..=j].iter().map(|v| name(*v)));
        }
        i = j + 1;
    }

    join_items(&items)
}

fn join_items(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
