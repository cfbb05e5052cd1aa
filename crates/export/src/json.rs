//! JSON output: a pretty-printed array of records.

use crate::error::Result;
use crate::format::Exporter;
use crate::record::ScanRecord;

pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, records: &[ScanRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}
