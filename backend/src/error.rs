//! Error types for sample sheet preparation.
//!
//! - [`FormatError`] - structural problems in an IEM or CASAVA sheet
//! - [`BarcodeError`] - index sequences that cannot be truncated
//! - [`SheetError`] - top-level errors (I/O, decoding, and the above)
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Format Errors
// =============================================================================

/// Structural errors found while parsing a sample sheet.
///
/// All of these abort the parse immediately.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A content line appeared before any `[Section]` line.
    #[error("Line {line}: content before any section, not a valid IEM sample sheet")]
    NoSection { line: usize },

    /// A content line appeared under a section we don't know.
    #[error("Line {line}: unrecognised section '{name}', not a valid IEM sample sheet")]
    UnknownSection { line: usize, name: String },

    /// The flat sheet has no header row at all.
    #[error("No header row found, not a valid CASAVA sample sheet")]
    NoHeader,

    /// The flat sheet header equals the fixed CASAVA header tuple.
    #[error("Unrecognised header '{header}', not a valid CASAVA sample sheet")]
    HeaderMatch { header: String },

    /// A structurally required column is absent from a `[Data]` record.
    #[error("Data row {row}: missing required column '{column}'")]
    MissingColumn { column: String, row: usize },

    /// The CSV tokenizer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Barcode Errors
// =============================================================================

/// Errors from index tag manipulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    /// Neither a single nor a dual index.
    #[error("Malformed barcode '{barcode}': expected at most one '-', found {hyphens}")]
    Malformed { barcode: String, hyphens: usize },
}

// =============================================================================
// Sheet Errors (top-level)
// =============================================================================

/// Top-level error returned by file-based entry points and the pipeline.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Input path does not exist or is not a file.
    #[error("Sample sheet not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read or write a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the input bytes.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Sheet structure error.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Barcode truncation error.
    #[error("Barcode error: {0}")]
    Barcode(#[from] BarcodeError),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing and conversion.
pub type FormatResult<T> = Result<T, FormatError>;

/// Result type for barcode operations.
pub type BarcodeResult<T> = Result<T, BarcodeError>;

/// Result type for file and pipeline operations.
pub type SheetResult<T> = Result<T, SheetError>;
