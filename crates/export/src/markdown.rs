//! Markdown output: a single pipe table.

use crate::error::Result;
use crate::format::Exporter;
use crate::record::{ScanRecord, SUMMARY_COLUMNS};

pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, records: &[ScanRecord]) -> Result<String> {
        let mut lines = Vec::with_capacity(records.len() + 2);
        lines.push(row(SUMMARY_COLUMNS.iter().map(|c| c.label().to_string())));
        lines.push(row(SUMMARY_COLUMNS.iter().map(|_| "---".to_string())));
        for record in records {
            lines.push(row(SUMMARY_COLUMNS.iter().map(|c| escape(&record.value(*c)))));
        }
        Ok(lines.join("\n"))
    }
}

fn row(cells: impl Iterator<Item = String>) -> String {
    format!("| {} |", cells.collect::<Vec<_>>().join(" | "))
}

/// Escape table metacharacters and keep each record on one line.
fn escape(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
