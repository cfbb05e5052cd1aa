//! Crontab schedule engine.
//!
//! This crate provides:
//! - Line splitting of raw crontab text (comments, env assignments, user column, `;` commands)
//! - Five-field cron grammar parsing into per-unit [`FieldSet`]s
//! - Occurrence matching over a minute-granular [`MatchWindow`]
//! - Deterministic English descriptions of schedules
//! - A scanner that fans matching out over all entries of a crontab

pub mod describe;
pub mod error;
pub mod field;
pub mod matcher;
pub mod scan;
pub mod schedule;
pub mod splitter;

pub use describe::describe;
pub use error::{Diagnostic, DiagnosticKind, MalformedLineError, ScheduleSyntaxError, WindowError};
pub use field::{FieldSet, StepBase, Term, Unit};
pub use matcher::{occurrences, MatchWindow, Occurrences};
pub use scan::{parse_crontab, scan, Occurrence, ParsedCrontab, ScanMode};
pub use schedule::{Schedule, ScheduleEntry};
pub use splitter::{split_lines, CandidateLine, ScheduleText, SplitOptions, UserColumn};
