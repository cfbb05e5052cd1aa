//! Plain-text output: an aligned table with a dashed rule under the header.

use crate::error::Result;
use crate::format::Exporter;
use crate::record::{ScanRecord, SUMMARY_COLUMNS};

/// Spaces between columns.
const PADDING: usize = 2;

pub struct TextExporter;

impl Exporter for TextExporter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, records: &[ScanRecord]) -> Result<String> {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| SUMMARY_COLUMNS.iter().map(|c| r.value(*c)).collect())
            .collect();

        let widths: Vec<usize> = SUMMARY_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .fold(column.label().chars().count(), usize::max)
                    + PADDING
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(layout(SUMMARY_COLUMNS.iter().map(|c| c.label()), &widths));
        lines.push("-".repeat(widths.iter().sum()));
        for row in &rows {
            lines.push(layout(row.iter().map(String::as_str), &widths));
        }
        Ok(lines.join("\n"))
    }
}

fn layout<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::new();
    for (cell, width) in cells.zip(widths) {
        line.push_str(&format!("{cell:<width$}"));
    }
    line.trim_end().to_string()
}
