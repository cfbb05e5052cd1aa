//! Per-unit cron field parsing.
//!
//! A field token is a comma-separated list of sub-terms. Each sub-term is
//! parsed into a [`Term`] variant, and the field's allowed values are the
//! union of every term's expansion.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleSyntaxError;

// ── Units ───────────────────────────────────────────────────────────

/// One of the five schedule slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

impl Unit {
    /// Units in schedule column order.
    pub const ALL: [Unit; 5] = [
        Unit::Minute,
        Unit::Hour,
        Unit::DayOfMonth,
        Unit::Month,
        Unit::DayOfWeek,
    ];

    /// Smallest value in the unit's domain.
    pub fn min(self) -> u32 {
        match self {
            Unit::Minute | Unit::Hour | Unit::DayOfWeek => 0,
            Unit::DayOfMonth | Unit::Month => 1,
        }
    }

    /// Largest value in the unit's domain (after day-of-week normalization).
    pub fn max(self) -> u32 {
        match self {
            Unit::Minute => 59,
            Unit::Hour => 23,
            Unit::DayOfMonth => 31,
            Unit::Month => 12,
            Unit::DayOfWeek => 6,
        }
    }

    /// Largest value accepted in a token. Day-of-week allows `7` as Sunday.
    fn token_max(self) -> u32 {
        match self {
            Unit::DayOfWeek => 7,
            other => other.max(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::DayOfMonth => "day-of-month",
            Unit::Month => "month",
            Unit::DayOfWeek => "day-of-week",
        }
    }

    fn accepts_question_mark(self) -> bool {
        matches!(self, Unit::DayOfMonth | Unit::DayOfWeek)
    }

    /// Resolve a three-letter month or weekday name to its number.
    fn value_of_name(self, text: &str) -> Option<u32> {
        let lower = text.to_ascii_lowercase();
        let (names, offset): (&[&str], u32) = match self {
            Unit::Month => (&MONTH_ABBREVIATIONS, 1),
            Unit::DayOfWeek => (&WEEKDAY_ABBREVIATIONS, 0),
            _ => return None,
        };
        names
            .iter()
            .position(|name| *name == lower)
            .map(|idx| idx as u32 + offset)
    }

    fn normalize(self, value: u32) -> u32 {
        if self == Unit::DayOfWeek && value == 7 {
            0
        } else {
            value
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Sub-terms ───────────────────────────────────────────────────────

/// What a step sub-term counts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBase {
    /// `*/S`: the unit's whole domain.
    Any,
    /// `N/S`: from `N` to the end of the domain.
    From(u32),
    /// `N-M/S`: within an explicit range.
    Range(u32, u32),
}

/// One comma-separated element of a field token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// `*` (or `?` in the day fields).
    Any,
    /// `N`.
    Value(u32),
    /// `N-M`, inclusive.
    Range(u32, u32),
    /// `base/S`.
    Step { base: StepBase, step: u32 },
}

impl Term {
    /// Values selected by this term, already normalized into the unit's domain.
    fn expand(self, unit: Unit) -> impl Iterator<Item = u32> {
        let (start, end, step) = match self {
            Term::Any => (unit.min(), unit.max(), 1),
            Term::Value(v) => (v, v, 1),
            Term::Range(a, b) => (a, b, 1),
            Term::Step { base, step } => match base {
                StepBase::Any => (unit.min(), unit.max(), step),
                StepBase::From(a) => (a, unit.max(), step),
                StepBase::Range(a, b) => (a, b, step),
            },
        };
        (start..=end)
            .step_by(step as usize)
            .map(move |v| unit.normalize(v))
    }
}

// ── FieldSet ────────────────────────────────────────────────────────

/// The parsed form of one schedule token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    unit: Unit,
    raw: String,
    terms: Vec<Term>,
    is_wildcard: bool,
    allowed: BTreeSet<u32>,
}

impl FieldSet {
    /// Parse a token for the given unit.
    ///
    /// Accepts `*`, `N`, `N-M`, `*/S`, `N/S`, `N-M/S` and comma-separated lists
    /// of those. Month and weekday fields also accept three-letter names.
    pub fn parse(unit: Unit, token: &str) -> Result<Self, ScheduleSyntaxError> {
        if token.is_empty() {
            return Err(ScheduleSyntaxError::field(unit, token, "empty field"));
        }

        let terms = token
            .split(',')
            .map(|part| parse_term(unit, token, part))
            .collect::<Result<Vec<_>, _>>()?;

        let allowed: BTreeSet<u32> = terms
            .iter()
            .fold(BTreeSet::new(), |mut acc, term| {
                acc.extend(term.expand(unit));
                acc
            });

        if allowed.is_empty() {
            return Err(ScheduleSyntaxError::field(unit, token, "selects no values"));
        }

        let is_wildcard = token == "*" || (token == "?" && unit.accepts_question_mark());

        Ok(Self {
            unit,
            raw: token.to_string(),
            terms,
            is_wildcard,
            allowed,
        })
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The token exactly as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// True only when the whole token was `*` (or `?` in a day field).
    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// Every value the token selects. Never empty.
    pub fn allowed_values(&self) -> &BTreeSet<u32> {
        &self.allowed
    }

    /// Whether `value` satisfies this field.
    pub fn contains(&self, value: u32) -> bool {
        self.is_wildcard || self.allowed.contains(&value)
    }

    /// Smallest allowed value at or after `value`.
    pub fn next_value_from(&self, value: u32) -> Option<u32> {
        self.allowed.range(value..).next().copied()
    }

    /// The only allowed value of a constrained field that selects exactly one.
    pub fn single_value(&self) -> Option<u32> {
        if self.is_wildcard || self.allowed.len() != 1 {
            return None;
        }
        self.allowed.iter().next().copied()
    }

    /// `S` when the token is exactly `*/S`.
    pub fn wildcard_step(&self) -> Option<u32> {
        match self.terms.as_slice() {
            [Term::Step {
                base: StepBase::Any,
                step,
            }] => Some(*step),
            _ => None,
        }
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ── Term parsing ────────────────────────────────────────────────────

fn parse_term(unit: Unit, token: &str, part: &str) -> Result<Term, ScheduleSyntaxError> {
    if part.is_empty() {
        return Err(ScheduleSyntaxError::field(unit, token, "empty list element"));
    }

    let (base, step) = match part.split_once('/') {
        Some((base, step)) => (base, Some(parse_step(unit, token, step)?)),
        None => (part, None),
    };

    if base == "*" || (base == "?" && unit.accepts_question_mark()) {
        return Ok(match step {
            Some(step) => Term::Step {
                base: StepBase::Any,
                step,
            },
            None => Term::Any,
        });
    }

    if let Some((start, end)) = base.split_once('-') {
        let start = parse_value(unit, token, start)?;
        let end = parse_value(unit, token, end)?;
        if start > end {
            return Err(ScheduleSyntaxError::field(
                unit,
                token,
                format!("range start {start} exceeds end {end}"),
            ));
        }
        return Ok(match step {
            Some(step) => Term::Step {
                base: StepBase::Range(start, end),
                step,
            },
            None => Term::Range(start, end),
        });
    }

    let value = parse_value(unit, token, base)?;
    match step {
        // Weekday `7/S` is Sunday alone, like `7-7/S`.
        Some(step) if value > unit.max() => Ok(Term::Step {
            base: StepBase::Range(value, value),
            step,
        }),
        Some(step) => Ok(Term::Step {
            base: StepBase::From(value),
            step,
        }),
        None => Ok(Term::Value(unit.normalize(value))),
    }
}

fn parse_step(unit: Unit, token: &str, text: &str) -> Result<u32, ScheduleSyntaxError> {
    match text.parse::<u32>() {
        Ok(0) => Err(ScheduleSyntaxError::field(
            unit,
            token,
            "step must be a positive integer",
        )),
        Ok(step) if text.bytes().all(|b| b.is_ascii_digit()) => Ok(step),
        _ => Err(ScheduleSyntaxError::field(
            unit,
            token,
            format!("invalid step '{text}'"),
        )),
    }
}

/// Parse a number or name and check it against the unit's token domain.
fn parse_value(unit: Unit, token: &str, text: &str) -> Result<u32, ScheduleSyntaxError> {
    let value = if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse::<u32>().map_err(|_| {
            ScheduleSyntaxError::field(unit, token, format!("value '{text}' is too large"))
        })?
    } else if let Some(value) = unit.value_of_name(text) {
        value
    } else {
        return Err(ScheduleSyntaxError::field(
            unit,
            token,
            format!("'{text}' is not a valid {unit} value"),
        ));
    };

    if value < unit.min() || value > unit.token_max() {
        return Err(ScheduleSyntaxError::field(
            unit,
            token,
            format!(
                "value {value} out of range {}-{}",
                unit.min(),
                unit.token_max()
            ),
        ));
    }
    Ok(value)
}
