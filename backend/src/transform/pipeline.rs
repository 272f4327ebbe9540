//! High-level API for preparing a CASAVA sheet from an IEM sheet.
//!
//! Combines all steps: parsing, conversion, optional fixes, validation
//! and output prediction.
//!
//! # Example
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
//! if result.can_write() {
//!     result.sheet.write_file("SampleSheet.casava.csv")?;
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::convert::to_flat;
use crate::error::SheetResult;
use crate::logs::Reporter;
use crate::models::{FlatSheet, PredictedOutput, SectionedSheet, DEFAULT_FLOWCELL_ID};
use crate::parser::sectioned;
use crate::validation::ValidationReport;

/// Options for the preparation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Flowcell ID written into every row
    pub flowcell_id: String,

    /// Replace whitespace in SampleID/SampleProject with underscores
    pub fix_spaces: bool,

    /// Fill blank SampleProject names (initials first, then SampleID)
    pub fix_empty_projects: bool,

    /// Don't fail on validation warnings
    pub ignore_warnings: bool,

    /// Truncate index tags to this many bases (`None` or 0 leaves them alone)
    pub truncate_barcodes: Option<usize>,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            flowcell_id: DEFAULT_FLOWCELL_ID.to_string(),
            fix_spaces: false,
            fix_empty_projects: false,
            ignore_warnings: false,
            truncate_barcodes: None,
        }
    }
}

/// Result of a preparation run
#[derive(Debug, Clone)]
pub struct PrepareResult {
    /// Converted (and possibly edited) CASAVA sheet
    pub sheet: FlatSheet,

    /// Findings of the final validation pass
    pub report: ValidationReport,

    /// 0 when the sheet may be written, 1 otherwise
    pub status: i32,

    /// Predicted bcl2fastq output, only when the sheet may be written
    pub predicted: Option<PredictedOutput>,
}

impl PrepareResult {
    pub fn can_write(&self) -> bool {
        self.status == 0
    }
}

/// Prepare a CASAVA sheet from an IEM sheet on disk.
pub fn prepare_sample_sheet(
    path: &Path,
    options: &PrepareOptions,
    reporter: &dyn Reporter,
) -> SheetResult<PrepareResult> {
    reporter.info(&format!("Reading sample sheet {}", path.display()));
    let iem = sectioned::parse_file(path, reporter)?;
    prepare_parsed(&iem, options, reporter)
}

/// Prepare a CASAVA sheet from IEM text.
pub fn prepare_str(
    content: &str,
    options: &PrepareOptions,
    reporter: &dyn Reporter,
) -> SheetResult<PrepareResult> {
    let iem = sectioned::parse_str(content, reporter)?;
    prepare_parsed(&iem, options, reporter)
}

/// Prepare a CASAVA sheet from an already parsed IEM sheet.
pub fn prepare_parsed(
    iem: &SectionedSheet,
    options: &PrepareOptions,
    reporter: &dyn Reporter,
) -> SheetResult<PrepareResult> {
    reporter.success(&format!("Read {} samples", iem.samples().len()));

    let mut sheet = to_flat(iem, &options.flowcell_id, options.fix_empty_projects)?;

    if let Some(length) = options.truncate_barcodes.filter(|&n| n > 0) {
        reporter.info(&format!("Truncating barcodes to {} bases", length));
        sheet.truncate_barcodes(length, reporter)?;
    }
    if options.fix_spaces {
        sheet.fix_spaces();
    }
    if options.fix_empty_projects {
        sheet.backfill_empty_projects();
    }

    let report = ValidationReport::check(&sheet, reporter);
    let status = if report.is_clean() || options.ignore_warnings { 0 } else { 1 };

    if report.is_clean() {
        reporter.success(&format!("All {} records valid", sheet.len()));
    } else if options.ignore_warnings {
        reporter.warning(&format!("Ignoring {} validation warnings", report.issue_count()));
    } else {
        reporter.error("Please fix above errors in sample sheet data");
    }

    let predicted = (status == 0).then(|| sheet.predict_output());

    Ok(PrepareResult { sheet, report, status, predicted })
}
