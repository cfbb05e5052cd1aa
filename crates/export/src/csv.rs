//! CSV output: a header row of column keys, then one row per record.

use crate::error::Result;
use crate::format::Exporter;
use crate::record::{ScanRecord, ALL_COLUMNS};

pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, records: &[ScanRecord]) -> Result<String> {
        let mut out = String::new();
        push_row(&mut out, ALL_COLUMNS.iter().map(|c| c.key().to_string()));
        for record in records {
            push_row(&mut out, ALL_COLUMNS.iter().map(|c| record.value(*c)));
        }
        Ok(out)
    }
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let row: Vec<String> = cells.map(|cell| quote(&cell)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Quote a cell when it holds a delimiter, quote or line break; inner quotes are doubled.
fn quote(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
