//! Sample name checks for CASAVA sheets.
//!
//! bcl2fastq names output directories after SampleProject and SampleID,
//! so both must be present, unique per lane and index, and free of
//! characters it refuses.
//!
//! # Checks
//!
//! - [`duplicated_names`] - groups sharing `(SampleID, SampleProject, Index, Lane)`
//! - [`empty_names`] - blank SampleID or SampleProject
//! - [`illegal_names`] - SampleID or SampleProject containing an illegal character
//!
//! All checks are read-only and reflect the records as they are now.
//!
//! # Example
//!
//! ```rust
//! use samplesheet::{FlatRecord, FlatSheet, validation};
//!
//! let record = FlatRecord {
//!     sample_id: "DR 1".into(),
//!     sample_project: "DR".into(),
//!     ..Default::default()
//! };
//! let sheet = FlatSheet::from_records(vec![record]);
//!
//! assert_eq!(validation::illegal_names(&sheet).len(), 1);
//! assert!(validation::empty_names(&sheet).is_empty());
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::logs::Reporter;
use crate::models::{FlatRecord, FlatSheet, SampleKey};

/// Records sharing an identity, grouped in first-seen order.
///
/// Only groups with more than one member are returned.
pub fn duplicated_names(sheet: &FlatSheet) -> Vec<Vec<&FlatRecord>> {
    let mut samples: IndexMap<SampleKey<'_>, Vec<&FlatRecord>> = IndexMap::new();
    for record in sheet.records() {
        samples.entry(record.key()).or_default().push(record);
    }
    samples.into_values().filter(|group| group.len() > 1).collect()
}

/// Records with a blank SampleID or SampleProject.
pub fn empty_names(sheet: &FlatSheet) -> Vec<&FlatRecord> {
    sheet
        .records()
        .iter()
        .filter(|r| r.sample_id.trim().is_empty() || r.sample_project.trim().is_empty())
        .collect()
}

/// Records whose SampleID or SampleProject contains an illegal character.
pub fn illegal_names(sheet: &FlatSheet) -> Vec<&FlatRecord> {
    let illegal = sheet.illegal_characters();
    sheet
        .records()
        .iter()
        .filter(|r| {
            illegal
                .chars()
                .any(|c| r.sample_id.contains(c) || r.sample_project.contains(c))
        })
        .collect()
}

/// Snapshot of all check results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub duplicated_names: Vec<Vec<FlatRecord>>,
    pub illegal_names: Vec<FlatRecord>,
    pub empty_names: Vec<FlatRecord>,
}

impl ValidationReport {
    /// Run every check and report each offending record as a warning.
    pub fn check(sheet: &FlatSheet, reporter: &dyn Reporter) -> Self {
        let duplicated: Vec<Vec<FlatRecord>> = duplicated_names(sheet)
            .into_iter()
            .map(|group| group.into_iter().cloned().collect())
            .collect();
        for record in duplicated.iter().flatten() {
            reporter.warning(&format!(
                "Duplicated SampleID/SampleProject in lane {} ({}/{})",
                record.lane, record.sample_id, record.sample_project
            ));
        }

        let illegal: Vec<FlatRecord> = illegal_names(sheet).into_iter().cloned().collect();
        for record in &illegal {
            reporter.warning(&format!(
                "Spaces in SampleID/SampleProject in lane {} ({}/{})",
                record.lane, record.sample_id, record.sample_project
            ));
        }

        let empty: Vec<FlatRecord> = empty_names(sheet).into_iter().cloned().collect();
        for record in &empty {
            reporter.warning(&format!(
                "Empty SampleID and/or SampleProject name in lane {} ({}/{})",
                record.lane, record.sample_id, record.sample_project
            ));
        }

        Self {
            duplicated_names: duplicated,
            illegal_names: illegal,
            empty_names: empty,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.duplicated_names.is_empty() && self.illegal_names.is_empty() && self.empty_names.is_empty()
    }

    /// Number of offending records over all checks.
    pub fn issue_count(&self) -> usize {
        self.duplicated_names.iter().map(Vec::len).sum::<usize>()
            + self.illegal_names.len()
            + self.empty_names.len()
    }
}
