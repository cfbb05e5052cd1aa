//! The flat record handed to every output format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use cronscan_schedule::{describe, Occurrence, ScheduleEntry};

/// Timestamp layout used by the text-based formats.
pub const RUN_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One output row: an entry, optionally at a matched time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Schedule as written (five fields or `@macro`).
    pub schedule: String,
    pub description: String,
    pub command: String,
    pub user: Option<String>,
    /// Matched minute. `None` in a static listing.
    pub run_at: Option<NaiveDateTime>,
    pub line_number: usize,
    pub line_content: String,
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl ScanRecord {
    /// Static listing row (no timestamp).
    pub fn from_entry(entry: &ScheduleEntry) -> Self {
        let schedule = entry.schedule();
        let [minute, hour, day_of_month, month, day_of_week] =
            schedule.fields().map(|f| f.raw().to_string());
        Self {
            schedule: schedule.expression().to_string(),
            description: describe(schedule),
            command: entry.command().to_string(),
            user: schedule.user().map(String::from),
            run_at: None,
            line_number: schedule.line(),
            line_content: schedule.line_content().to_string(),
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
        }
    }

    pub fn from_occurrence(occurrence: &Occurrence) -> Self {
        Self {
            run_at: Some(occurrence.at),
            ..Self::from_entry(&occurrence.entry)
        }
    }

    /// Cell text for a column. Missing values render empty.
    pub fn value(&self, column: Column) -> String {
        match column {
            Column::Schedule => self.schedule.clone(),
            Column::Description => self.description.clone(),
            Column::Command => self.command.clone(),
            Column::User => self.user.clone().unwrap_or_default(),
            Column::RunAt => self
                .run_at
                .map(|t| t.format(RUN_AT_FORMAT).to_string())
                .unwrap_or_default(),
            Column::LineNumber => self.line_number.to_string(),
            Column::LineContent => self.line_content.clone(),
            Column::Minute => self.minute.clone(),
            Column::Hour => self.hour.clone(),
            Column::DayOfMonth => self.day_of_month.clone(),
            Column::Month => self.month.clone(),
            Column::DayOfWeek => self.day_of_week.clone(),
        }
    }
}

// ── Columns ─────────────────────────────────────────────────────────

/// A named record field, in tabular formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Schedule,
    Description,
    Command,
    User,
    RunAt,
    LineNumber,
    LineContent,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

/// Every column, in canonical order.
pub const ALL_COLUMNS: [Column; 12] = [
    Column::Schedule,
    Column::Description,
    Column::Command,
    Column::User,
    Column::RunAt,
    Column::LineNumber,
    Column::LineContent,
    Column::Minute,
    Column::Hour,
    Column::DayOfMonth,
    Column::Month,
    Column::DayOfWeek,
];

/// Columns shown in human-oriented tables.
pub const SUMMARY_COLUMNS: [Column; 6] = [
    Column::Schedule,
    Column::Description,
    Column::Command,
    Column::User,
    Column::RunAt,
    Column::LineNumber,
];

impl Column {
    /// Machine key, matching the serde field name.
    pub fn key(self) -> &'static str {
        match self {
            Column::Schedule => "schedule",
            Column::Description => "description",
            Column::Command => "command",
            Column::User => "user",
            Column::RunAt => "run_at",
            Column::LineNumber => "line_number",
            Column::LineContent => "line_content",
            Column::Minute => "minute",
            Column::Hour => "hour",
            Column::DayOfMonth => "day_of_month",
            Column::Month => "month",
            Column::DayOfWeek => "day_of_week",
        }
    }

    /// Human-readable header.
    pub fn label(self) -> &'static str {
        match self {
            Column::Schedule => "Schedule",
            Column::Description => "Description",
            Column::Command => "Command",
            Column::User => "User",
            Column::RunAt => "Run At",
            Column::LineNumber => "Line #",
            Column::LineContent => "Line Content",
            Column::Minute => "Minute",
            Column::Hour => "Hour",
            Column::DayOfMonth => "Day of Month",
            Column::Month => "Month",
            Column::DayOfWeek => "Day of Week",
        }
    }
}
