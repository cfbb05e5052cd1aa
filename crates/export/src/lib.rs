//! Output formats for scan results.
//!
//! Every format consumes the same ordered list of [`ScanRecord`]s. Text formats render
//! it to a string; [`write_report`] puts that string in a file or on stdout.
//! XLSX and PDF are binary and only write files.

pub mod csv;
pub mod error;
pub mod format;
pub mod json;
pub mod markdown;
pub mod pdf;
pub mod record;
pub mod text;
pub mod xlsx;

pub use error::{ExportError, Result};
pub use format::{ensure_extension, exporter_for, write_report, Exporter, Format};
pub use record::{Column, ScanRecord, ALL_COLUMNS, SUMMARY_COLUMNS};
