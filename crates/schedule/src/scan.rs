//! Whole-crontab parsing and window scanning.
//!
//! [`parse_crontab`] runs the splitter and parser over a full text and keeps
//! going past bad lines. [`scan`] matches every entry against one window and
//! merges the results into a single ordered list. Entries are independent, so
//! matching fans out over the rayon pool.

use std::sync::Arc;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Diagnostic;
use crate::matcher::{occurrences, MatchWindow};
use crate::schedule::{Schedule, ScheduleEntry};
use crate::splitter::{split_lines, SplitOptions};

/// Parse output: the entries that parsed and a diagnostic per skipped line.
#[derive(Debug, Clone, Default)]
pub struct ParsedCrontab {
    pub entries: Vec<ScheduleEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse crontab text into entries, one per command.
pub fn parse_crontab(text: &str, options: &SplitOptions) -> ParsedCrontab {
    let (candidates, mut diagnostics) = split_lines(text, options);
    let mut entries = Vec::new();

    for candidate in &candidates {
        match Schedule::from_candidate(candidate) {
            Ok(schedule) => {
                let schedule = Arc::new(schedule);
                for command in schedule.commands() {
                    let index = entries.len();
                    entries.push(ScheduleEntry::new(schedule.clone(), command.clone(), index));
                }
            }
            Err(e) => {
                debug!(line = candidate.line, error = %e, "skipping unparseable schedule");
                diagnostics.push(Diagnostic::new(candidate.line, e));
            }
        }
    }

    diagnostics.sort_by_key(|d| d.line);
    ParsedCrontab {
        entries,
        diagnostics,
    }
}

/// How many occurrences to report per entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Every occurrence in the window.
    #[default]
    All,
    /// Only the first occurrence in the window.
    NextOnly,
}

/// One entry firing at one minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub entry: ScheduleEntry,
    pub at: NaiveDateTime,
}

/// Match every entry against `window`, ordered by time then entry order.
pub fn scan(entries: &[ScheduleEntry], window: &MatchWindow, mode: ScanMode) -> Vec<Occurrence> {
    let mut found: Vec<Occurrence> = entries
        .par_iter()
        .flat_map_iter(|entry| {
            let hits = occurrences(entry.schedule(), window);
            let limit = match mode {
                ScanMode::All => usize::MAX,
                ScanMode::NextOnly => 1,
            };
            hits.take(limit).map(move |at| Occurrence {
                entry: entry.clone(),
                at,
            })
        })
        .collect();

    found.sort_by_key(|o| (o.at, o.entry.index()));
    debug!(
        entries = entries.len(),
        occurrences = found.len(),
        minutes = window.minutes(),
        "scan complete"
    );
    found
}
