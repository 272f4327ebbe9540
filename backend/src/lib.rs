//! # Samplesheet - Illumina sample sheet preparation
//!
//! Converts IEM (Illumina Experiment Manager) sample sheets written for
//! MiSeq runs into CASAVA sample sheets for bcl2fastq, checking and
//! optionally fixing sample names on the way.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  IEM sheet  │────▶│   Parser    │────▶│  Transform  │────▶│ CASAVA CSV  │
//! │ ([Sections])│     │ (sectioned) │     │ (fix/trunc) │     │ (validated) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use samplesheet::{prepare_sample_sheet, ConsoleReporter, PrepareOptions};
//! use std::path::Path;
//!
//! let result = prepare_sample_sheet(
//!     Path::new("SampleSheet.csv"),
//!     &PrepareOptions::default(),
//!     &ConsoleReporter,
//! )?;
//! println!("{}", result.sheet.to_csv()?);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`logs`] - Reporter sinks passed into every operation
//! - [`models`] - Sheets and records
//! - [`parser`] - IEM and CASAVA parsing
//! - [`transform`] - Conversion, edits and pipeline
//! - [`validation`] - Sample name checks

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    BarcodeError, BarcodeResult, FormatError, FormatResult, SheetError, SheetResult,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{ConsoleReporter, LogEntry, LogLevel, MemoryReporter, NullReporter, Reporter};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    FlatRecord, FlatSheet, PredictedOutput, SampleKey, SectionedSheet,
    DEFAULT_FLOWCELL_ID, DEFAULT_ILLEGAL_CHARACTERS, FLAT_HEADER,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_encoding, read_sheet_file};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    extract_initials, prepare_parsed, prepare_sample_sheet, prepare_str, to_flat,
    truncate_barcode, PrepareOptions, PrepareResult,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{duplicated_names, empty_names, illegal_names, ValidationReport};
