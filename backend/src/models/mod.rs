//! Domain models for sample sheet preparation.
//!
//! - [`FlatRecord`] - one CASAVA sample sheet row
//! - [`FlatSheet`] - ordered CASAVA rows plus the illegal character set
//! - [`SectionedSheet`] - a parsed IEM sample sheet

use serde::{Deserialize, Serialize};

mod sheet;

pub use sheet::{FlatSheet, PredictedOutput, SectionedSheet, DEFAULT_ILLEGAL_CHARACTERS};

// =============================================================================
// Flat Header
// =============================================================================

/// Column order of a CASAVA sample sheet.
pub const FLAT_HEADER: [&str; 10] = [
    "FCID",
    "Lane",
    "SampleID",
    "SampleRef",
    "Index",
    "Description",
    "Control",
    "Recipe",
    "Operator",
    "SampleProject",
];

/// Default flowcell ID written into converted sheets.
pub const DEFAULT_FLOWCELL_ID: &str = "FC1";

/// Lane used when the `[Data]` section has no `Lane` column.
pub const DEFAULT_LANE: &str = "1";

// =============================================================================
// Flat Record
// =============================================================================

/// One row of a CASAVA sample sheet.
///
/// Serializes with the CASAVA column names, in [`FLAT_HEADER`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    #[serde(rename = "FCID")]
    pub fcid: String,
    #[serde(rename = "Lane")]
    pub lane: String,
    #[serde(rename = "SampleID")]
    pub sample_id: String,
    #[serde(rename = "SampleRef")]
    pub sample_ref: String,
    #[serde(rename = "Index")]
    pub index: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Control")]
    pub control: String,
    #[serde(rename = "Recipe")]
    pub recipe: String,
    #[serde(rename = "Operator")]
    pub operator: String,
    #[serde(rename = "SampleProject")]
    pub sample_project: String,
}

/// Identity of a sample for duplicate detection:
/// `(SampleID, SampleProject, Index, Lane)`.
pub type SampleKey<'a> = (&'a str, &'a str, &'a str, &'a str);

impl FlatRecord {
    /// Build a record by zipping `fields` against [`FLAT_HEADER`].
    ///
    /// Extra fields are ignored, missing trailing fields stay empty.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::default();
        for (i, value) in fields.into_iter().take(FLAT_HEADER.len()).enumerate() {
            *record.field_mut(i) = value.into();
        }
        record
    }

    pub fn key(&self) -> SampleKey<'_> {
        (&self.sample_id, &self.sample_project, &self.index, &self.lane)
    }

    /// Field values in [`FLAT_HEADER`] order.
    pub fn values(&self) -> [&str; 10] {
        [
            &self.fcid,
            &self.lane,
            &self.sample_id,
            &self.sample_ref,
            &self.index,
            &self.description,
            &self.control,
            &self.recipe,
            &self.operator,
            &self.sample_project,
        ]
    }

    /// Look up a value by its CASAVA column name.
    pub fn get(&self, column: &str) -> Option<&str> {
        FLAT_HEADER
            .iter()
            .position(|c| *c == column)
            .map(|i| self.values()[i])
    }

    fn field_mut(&mut self, position: usize) -> &mut String {
        match position {
            0 => &mut self.fcid,
            1 => &mut self.lane,
            2 => &mut self.sample_id,
            3 => &mut self.sample_ref,
            4 => &mut self.index,
            5 => &mut self.description,
            6 => &mut self.control,
            7 => &mut self.recipe,
            8 => &mut self.operator,
            _ => &mut self.sample_project,
        }
    }

    /// Lane as shown in log messages and output names: `L001` style
    /// when numeric, raw otherwise.
    pub fn lane_label(&self) -> String {
        match self.lane.trim().parse::<u32>() {
            Ok(n) => format!("L{:03}", n),
            Err(_) => format!("L{}", self.lane),
        }
    }
}
