//! English descriptions of schedules.
//!
//! Descriptions depend only on the five fields, never on a window or the
//! current time. A handful of common shapes get a natural sentence; anything
//! else falls back to a field-by-field restatement.

mod join;


use crate::field::FieldSet;
use crate::schedule::Schedule;

pub use self::join::{join_values, month_name, weekday_name};

/// Describe a schedule. Always returns a sentence.
pub fn describe(schedule: &Schedule) -> String {
    let minute = schedule.minute();
    let hour = schedule.hour();
    let dom = schedule.day_of_month();
    let month = schedule.month();
    let dow = schedule.day_of_week();

    let days_wild = dom.is_wildcard() && month.is_wildcard() && dow.is_wildcard();

    if days_wild && hour.is_wildcard() {
        if minute.is_wildcard() {
            return "Every minute".to_string();
        }
        if let Some(step) = minute.wildcard_step() {
            return every(step, "minute");
        }
    }

    if days_wild {
        if let (Some(m), Some(step)) = (minute.single_value(), hour.wildcard_step()) {
            return if step == 1 {
                format!("At minute {m} past every hour")
            } else {
                format!("At minute {m} past every {step} hours")
            };
        }
    }

    if let (Some(m), Some(h)) = (minute.single_value(), hour.single_value()) {
        let time = format!("At {h:02}:{m:02}");
        if dom.is_wildcard() && month.is_wildcard() && !dow.is_wildcard() {
            return format!("{time} on {}", join_values(dow.allowed_values(), weekday_name));
        }
        if !dom.is_wildcard() && month.is_wildcard() && dow.is_wildcard() {
            return format!(
                "{time} on day-of-month {}",
                join_values(dom.allowed_values(), |d| d.to_string())
            );
        }
        if days_wild {
            return time;
        }
    }

    restate(schedule)
}

fn every(step: u32, unit: &str) -> String {
    if step == 1 {
        format!("Every {unit}")
    } else {
        format!("Every {step} {unit}s")
    }
}

/// Field-by-field fallback; wildcard fields render as `*`.
fn restate(schedule: &Schedule) -> String {
    let numbers = |field: &FieldSet| render(field, |v| v.to_string());
    format!(
        "At minute {}, hour {}, day {}, month {}, weekday {}",
        numbers(schedule.minute()),
        numbers(schedule.hour()),
        numbers(schedule.day_of_month()),
        render(schedule.month(), month_name),
        render(schedule.day_of_week(), weekday_name),
    )
}

fn render(field: &FieldSet, name: impl Fn(u32) -> String) -> String {
    if field.is_wildcard() {
        "*".to_string()
    } else {
        join_values(field.allowed_values(), name)
    }
}
