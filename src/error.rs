//! Structured error types for skuroll.
//!
//! Malformed individual cells are never errors — the scanner silently skips
//! invalid pairs. Errors only come from the XLSX container itself or from
//! handing the batch entry point zero files.

/// All errors that can occur while consolidating sales workbooks.
#[derive(Debug, thiserror::Error)]
pub enum SkurollError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General parse error (missing workbook parts, no sheets, ...).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A batch was started with zero files.
    #[error("empty batch: supply at least one file")]
    EmptyBatch,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SkurollError>;
