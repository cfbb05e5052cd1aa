//! Format selection and report writing.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::record::ScanRecord;

/// A renderer for one output format.
pub trait Exporter: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Render the records in order.
    ///
    /// Binary formats return [`ExportError::RequiresFile`].
    fn render(&self, records: &[ScanRecord]) -> Result<String>;

    /// Write the report to `path`. Text output ends with a newline.
    fn write_file(&self, records: &[ScanRecord], path: &Path) -> Result<()> {
        let mut content = self.render(records)?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Csv,
    Json,
    Xlsx,
    #[serde(alias = "txt")]
    Text,
    Pdf,
    #[serde(alias = "md")]
    Markdown,
}

const FORMAT_NAMES: &str = "csv, json, xlsx, text, pdf, md, markdown";

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Json => "json",
            Format::Xlsx => "xlsx",
            Format::Text => "text",
            Format::Pdf => "pdf",
            Format::Markdown => "markdown",
        }
    }

    pub fn extension(self) -> &'static str {
        exporter_for(self).extension()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            "xlsx" => Ok(Format::Xlsx),
            "text" | "txt" => Ok(Format::Text),
            "pdf" => Ok(Format::Pdf),
            "md" | "markdown" => Ok(Format::Markdown),
            other => Err(ExportError::UnsupportedFormat {
                name: other.to_string(),
                available: FORMAT_NAMES.to_string(),
            }),
        }
    }
}

/// Renderer for a format.
pub fn exporter_for(format: Format) -> Box<dyn Exporter> {
    match format {
        Format::Csv => Box::new(crate::csv::CsvExporter),
        Format::Json => Box::new(crate::json::JsonExporter),
        Format::Xlsx => Box::new(crate::xlsx::XlsxExporter),
        Format::Text => Box::new(crate::text::TextExporter),
        Format::Pdf => Box::new(crate::pdf::PdfExporter),
        Format::Markdown => Box::new(crate::markdown::MarkdownExporter),
    }
}

/// Append `.ext` unless the path already ends with it.
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    let has_it = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if has_it {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    if !name.to_string_lossy().ends_with('.') {
        name.push(".");
    }
    name.push(extension);
    PathBuf::from(name)
}

/// Render `records` and write them to `destination`, or stdout when `None`.
///
/// Returns the path actually written, after extension fix-up. XLSX and PDF
/// need a destination.
pub fn write_report(
    records: &[ScanRecord],
    format: Format,
    destination: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let exporter = exporter_for(format);

    match destination {
        Some(path) => {
            let path = ensure_extension(path, exporter.extension());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            exporter.write_file(records, &path)?;
            debug!(path = %path.display(), format = %format, records = records.len(), "report written");
            Ok(Some(path))
        }
        None => {
            let mut content = exporter.render(records)?;
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
            Ok(None)
        }
    }
}
