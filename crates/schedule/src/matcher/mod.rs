//! Occurrence matching over a minute-granular window.
//!
//! The scan walks forward from the window start and tests each candidate
//! minute against the schedule. Whole days are skipped when the month or day
//! condition fails and whole hours when the hour field fails; within a
//! matching hour the next allowed minute is looked up directly. The emitted
//! timestamps are exactly those a minute-by-minute scan would produce, in the
//! same order.
//!
//! Cost is linear in the number of matching hours in the window, so a
//! multi-year window of an every-minute schedule is the expensive case.

#[cfg(test)]
mod tests;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};

use crate::error::WindowError;
use crate::schedule::Schedule;

// ── Window ──────────────────────────────────────────────────────────

/// Half-open `[start, end)` window, truncated to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl MatchWindow {
    /// Build a window. Seconds and sub-seconds of both bounds are discarded.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if start > end {
            return Err(WindowError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window of `span` starting at `start`. A negative span is an error.
    pub fn from_span(start: NaiveDateTime, span: Duration) -> Result<Self, WindowError> {
        let end = start.checked_add_signed(span).unwrap_or(NaiveDateTime::MAX);
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of whole minutes covered.
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}

// ── Iterator ────────────────────────────────────────────────────────

/// Lazily enumerate the minutes in `window` at which `schedule` fires.
///
/// Each call starts a fresh scan, so repeated calls yield identical sequences.
pub fn occurrences<'a>(schedule: &'a Schedule, window: &MatchWindow) -> Occurrences<'a> {
    Occurrences {
        schedule,
        cursor: window.start,
        end: window.end,
    }
}

/// Iterator returned by [`occurrences`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    schedule: &'a Schedule,
    cursor: NaiveDateTime,
    end: NaiveDateTime,
}

impl Occurrences<'_> {
    /// Move the cursor, ending the scan if the calendar runs out.
    fn advance_to(&mut self, next: Option<NaiveDateTime>) {
        self.cursor = next.unwrap_or(self.end);
    }
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        while self.cursor < self.end {
            let date = self.cursor.date();
            if !self.schedule.month().contains(date.month()) || !self.schedule.day_matches(date) {
                self.advance_to(next_midnight(self.cursor));
                continue;
            }

            if !self.schedule.hour().contains(self.cursor.hour()) {
                self.advance_to(next_hour(self.cursor));
                continue;
            }

            let Some(minute) = self.schedule.minute().next_value_from(self.cursor.minute()) else {
                self.advance_to(next_hour(self.cursor));
                continue;
            };

            let Some(hit) = self.cursor.with_minute(minute) else {
                self.advance_to(None);
                continue;
            };
            if hit >= self.end {
                self.cursor = self.end;
                return None;
            }
            self.advance_to(hit.checked_add_signed(Duration::minutes(1)));
            return Some(hit);
        }
        None
    }
}

fn next_midnight(at: NaiveDateTime) -> Option<NaiveDateTime> {
    at.date().succ_opt()?.and_hms_opt(0, 0, 0)
}

fn next_hour(at: NaiveDateTime) -> Option<NaiveDateTime> {
    at.with_minute(0)?.checked_add_signed(Duration::hours(1))
}
