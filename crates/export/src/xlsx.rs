//! Excel output: one worksheet, a bold frozen header row of column keys.

use std::path::Path;

use rust_xlsxwriter::{Format as CellFormat, Workbook};

use crate::error::{ExportError, Result};
use crate::format::Exporter;
use crate::record::{Column, ScanRecord, ALL_COLUMNS};

const SHEET_NAME: &str = "Cron Jobs";

pub struct XlsxExporter;

impl Exporter for XlsxExporter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, _records: &[ScanRecord]) -> Result<String> {
        Err(ExportError::RequiresFile { format: "xlsx" })
    }

    fn write_file(&self, records: &[ScanRecord], path: &Path) -> Result<()> {
        let mut workbook = build_workbook(records)?;
        workbook.save(path)?;
        Ok(())
    }
}

fn build_workbook(records: &[ScanRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let header = CellFormat::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0u16..).zip(ALL_COLUMNS) {
        sheet.write_string_with_format(0, col, column.key(), &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        for (col, column) in (0u16..).zip(ALL_COLUMNS) {
            match column {
                Column::LineNumber => {
                    sheet.write_number(row, col, record.line_number as f64)?;
                }
                _ => {
                    sheet.write_string(row, col, record.value(column))?;
                }
            }
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    sheet.autofit();
    Ok(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ScanRecord {
        ScanRecord {
            schedule: "@hourly".to_string(),
            description: "At minute 0, hour *, day *, month *, weekday *".to_string(),
            command: "/usr/bin/rotate".to_string(),
            user: Some("root".to_string()),
            run_at: None,
            line_number: 7,
            line_content: "@hourly root /usr/bin/rotate".to_string(),
            minute: "0".to_string(),
            hour: "*".to_string(),
            day_of_month: "*".to_string(),
            month: "*".to_string(),
            day_of_week: "*".to_string(),
        }
    }

    #[test]
    fn render_to_text_is_refused() {
        assert!(matches!(
            XlsxExporter.render(&[record()]),
            Err(ExportError::RequiresFile { format: "xlsx" })
        ));
    }

    #[test]
    fn writes_a_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.xlsx");
        XlsxExporter.write_file(&[record(), record()], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(bytes.len() > 1_000);
    }
}
