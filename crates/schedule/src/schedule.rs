//! Parsed schedules and the entries that pair them with a single command.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::ScheduleSyntaxError;
use crate::field::{FieldSet, Unit};
use crate::splitter::{CandidateLine, ScheduleText};

/// Five parsed fields plus the line they came from. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    expression: String,
    minute: FieldSet,
    hour: FieldSet,
    day_of_month: FieldSet,
    month: FieldSet,
    day_of_week: FieldSet,
    user: Option<String>,
    commands: Vec<String>,
    line: usize,
    line_content: String,
}

impl Schedule {
    /// Parse a bare schedule expression (five fields or an `@macro`).
    ///
    /// The result has no user, no commands and line number `0`; its line
    /// content is the expression itself.
    pub fn parse(expression: &str) -> Result<Self, ScheduleSyntaxError> {
        let expression = expression.trim();
        let text = if expression.starts_with('@') {
            ScheduleText::Macro(expression.to_string())
        } else {
            let tokens: Vec<&str> = expression.split_whitespace().collect();
            let fields: [&str; 5] = tokens.as_slice().try_into().map_err(|_| {
                ScheduleSyntaxError::macro_token(
                    expression,
                    format!("expected 5 fields, found {}", tokens.len()),
                )
            })?;
            ScheduleText::Fields(fields.map(String::from))
        };
        Self::build(&text, None, Vec::new(), 0, expression.to_string())
    }

    /// Parse the schedule of a split crontab line.
    pub fn from_candidate(candidate: &CandidateLine) -> Result<Self, ScheduleSyntaxError> {
        Self::build(
            &candidate.schedule,
            candidate.user.clone(),
            candidate.commands.clone(),
            candidate.line,
            candidate.text.clone(),
        )
    }

    fn build(
        text: &ScheduleText,
        user: Option<String>,
        commands: Vec<String>,
        line: usize,
        line_content: String,
    ) -> Result<Self, ScheduleSyntaxError> {
        let (expression, fields) = match text {
            ScheduleText::Fields(tokens) => (tokens.join(" "), tokens.clone()),
            ScheduleText::Macro(name) => {
                let expanded = expand_macro(name)?;
                let mut fields: [String; 5] = Default::default();
                for (slot, token) in fields.iter_mut().zip(expanded.split_whitespace()) {
                    *slot = token.to_string();
                }
                (name.clone(), fields)
            }
        };

        let [minute, hour, day_of_month, month, day_of_week] = fields;
        Ok(Self {
            expression,
            minute: FieldSet::parse(Unit::Minute, &minute)?,
            hour: FieldSet::parse(Unit::Hour, &hour)?,
            day_of_month: FieldSet::parse(Unit::DayOfMonth, &day_of_month)?,
            month: FieldSet::parse(Unit::Month, &month)?,
            day_of_week: FieldSet::parse(Unit::DayOfWeek, &day_of_week)?,
            user,
            commands,
            line,
            line_content,
        })
    }

    /// The schedule as written: five fields joined by single spaces, or the macro.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn minute(&self) -> &FieldSet {
        &self.minute
    }

    pub fn hour(&self) -> &FieldSet {
        &self.hour
    }

    pub fn day_of_month(&self) -> &FieldSet {
        &self.day_of_month
    }

    pub fn month(&self) -> &FieldSet {
        &self.month
    }

    pub fn day_of_week(&self) -> &FieldSet {
        &self.day_of_week
    }

    /// Fields in column order.
    pub fn fields(&self) -> [&FieldSet; 5] {
        [
            &self.minute,
            &self.hour,
            &self.day_of_month,
            &self.month,
            &self.day_of_week,
        ]
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// 1-based source line, `0` for schedules parsed from a bare expression.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The trimmed source line this schedule was parsed from.
    pub fn line_content(&self) -> &str {
        &self.line_content
    }

    /// Day condition with cron's disjunction rule: when both day fields are
    /// constrained, either one matching is enough.
    pub fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = &self.day_of_month;
        let dow = &self.day_of_week;
        let weekday = date.weekday().num_days_from_sunday();
        match (dom.is_wildcard(), dow.is_wildcard()) {
            (true, true) => true,
            (false, true) => dom.contains(date.day()),
            (true, false) => dow.contains(weekday),
            (false, false) => dom.contains(date.day()) || dow.contains(weekday),
        }
    }

    /// Whether the schedule fires during the minute containing `at`.
    pub fn fires_at(&self, at: NaiveDateTime) -> bool {
        self.minute.contains(at.minute())
            && self.hour.contains(at.hour())
            && self.month.contains(at.month())
            && self.day_matches(at.date())
    }
}

/// Five-field form of a time-based `@macro`.
fn expand_macro(name: &str) -> Result<&'static str, ScheduleSyntaxError> {
    match name {
        "@yearly" | "@annually" => Ok("0 0 1 1 *"),
        "@monthly" => Ok("0 0 1 * *"),
        "@weekly" => Ok("0 0 * * 0"),
        "@daily" | "@midnight" => Ok("0 0 * * *"),
        "@hourly" => Ok("0 * * * *"),
        "@reboot" => Err(ScheduleSyntaxError::macro_token(
            name,
            "@reboot has no time-based schedule",
        )),
        _ => Err(ScheduleSyntaxError::macro_token(name, "unknown macro")),
    }
}

// ── Entries ─────────────────────────────────────────────────────────

/// One schedule paired with exactly one command.
///
/// Entries produced from a multi-command line share the same [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    schedule: Arc<Schedule>,
    command: String,
    index: usize,
}

impl ScheduleEntry {
    pub fn new(schedule: Arc<Schedule>, command: impl Into<String>, index: usize) -> Self {
        Self {
            schedule,
            command: command.into(),
            index,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Shared handle to the schedule.
    pub fn schedule_arc(&self) -> &Arc<Schedule> {
        &self.schedule
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Position in parse order; identifies the entry and breaks timestamp ties.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn parse_bare_expression() {
        let schedule = Schedule::parse("  */5   9-17 * * 1-5 ").unwrap();
        assert_eq!(schedule.expression(), "*/5 9-17 * * 1-5");
        assert_eq!(schedule.hour().allowed_values().len(), 9);
        assert_eq!(schedule.line(), 0);
        assert!(schedule.commands().is_empty());
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let err = Schedule::parse("* * * *").unwrap_err();
        assert!(err.reason.contains("expected 5 fields, found 4"));
        assert!(Schedule::parse("0 * * * * *").is_err());
    }

    #[test]
    fn first_bad_field_is_reported() {
        let err = Schedule::parse("0 24 32 * *").unwrap_err();
        assert_eq!(err.unit, Some(Unit::Hour));
    }

    #[test]
    fn macros_expand_to_five_fields() {
        let daily = Schedule::parse("@daily").unwrap();
        assert_eq!(daily.expression(), "@daily");
        assert_eq!(daily.minute().single_value(), Some(0));
        assert_eq!(daily.hour().single_value(), Some(0));
        assert!(daily.day_of_month().is_wildcard());

        let weekly = Schedule::parse("@weekly").unwrap();
        assert_eq!(weekly.day_of_week().single_value(), Some(0));

        let yearly = Schedule::parse("@annually").unwrap();
        assert_eq!(yearly.month().single_value(), Some(1));
    }

    #[test]
    fn reboot_and_unknown_macros_fail() {
        let err = Schedule::parse("@reboot").unwrap_err();
        assert!(err.unit.is_none());
        assert!(err.reason.contains("no time-based schedule"));
        assert!(Schedule::parse("@fortnightly").is_err());
    }

    #[test]
    fn day_rule_is_a_disjunction_when_both_constrained() {
        // 1st of the month OR Monday
        let schedule = Schedule::parse("0 0 1 * 1").unwrap();
        // 2025-09-01 is a Monday and the 1st
        assert!(schedule.fires_at(at("2025-09-01T00:00")));
        // 2025-09-08 Monday
        assert!(schedule.fires_at(at("2025-09-08T00:00")));
        // 2025-10-01 Wednesday, the 1st
        assert!(schedule.fires_at(at("2025-10-01T00:00")));
        // 2025-09-09 Tuesday
        assert!(!schedule.fires_at(at("2025-09-09T00:00")));
    }

    #[test]
    fn single_constrained_day_field_alone_decides() {
        let dom_only = Schedule::parse("0 0 15 * *").unwrap();
        assert!(dom_only.fires_at(at("2025-03-15T00:00")));
        assert!(!dom_only.fires_at(at("2025-03-16T00:00")));

        let dow_only = Schedule::parse("0 0 * * 0").unwrap();
        assert!(dow_only.fires_at(at("2025-03-16T00:00"))); // Sunday
        assert!(!dow_only.fires_at(at("2025-03-15T00:00")));
    }

    #[test]
    fn stepped_day_field_counts_as_constrained() {
        // */2 is not a wildcard, so OR semantics apply with Friday
        let schedule = Schedule::parse("0 0 */2 * 5").unwrap();
        assert!(schedule.fires_at(at("2025-03-14T00:00"))); // Friday the 14th
        assert!(schedule.fires_at(at("2025-03-03T00:00"))); // odd day
        assert!(!schedule.fires_at(at("2025-03-04T00:00")));
    }

    #[test]
    fn fires_at_ignores_seconds() {
        let schedule = Schedule::parse("30 12 * * *").unwrap();
        let ts = at("2025-06-01T12:30").with_second(45).unwrap();
        assert!(schedule.fires_at(ts));
    }

    #[test]
    fn entries_share_schedule() {
        let schedule = Arc::new(Schedule::parse("* * * * *").unwrap());
        let a = ScheduleEntry::new(schedule.clone(), "/a.sh", 0);
        let b = ScheduleEntry::new(schedule, "/b.sh", 1);
        assert!(Arc::ptr_eq(a.schedule_arc(), b.schedule_arc()));
        assert_ne!(a, b);
    }
}
