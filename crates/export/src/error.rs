//! Export error types.

/// Errors that can occur while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Filesystem or stdout I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Spreadsheet writer error.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// PDF document error.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Format name not recognised.
    #[error("Unsupported output format: {name}. Available formats: {available}")]
    UnsupportedFormat { name: String, available: String },

    /// Binary format asked to render as text or to write to stdout.
    #[error("{format} output needs a file path")]
    RequiresFile { format: &'static str },
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
