//! Sample sheet containers.

use indexmap::IndexMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{FlatRecord, FLAT_HEADER};
use crate::error::SheetResult;

/// Characters bcl2fastq refuses in SampleID and SampleProject names.
pub const DEFAULT_ILLEGAL_CHARACTERS: &str = "?()[]/\\=+<>:;\"',*^|&. \t";

/// `Project_<name>` → `Sample_<id>` → FASTQ name stems.
pub type PredictedOutput = IndexMap<String, IndexMap<String, Vec<String>>>;

// =============================================================================
// Sectioned (IEM) Sheet
// =============================================================================

/// A parsed IEM sample sheet.
///
/// Built once by [`crate::parser::sectioned::parse`]; only readable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedSheet {
    pub(crate) header: IndexMap<String, String>,
    pub(crate) reads: Vec<String>,
    pub(crate) settings: IndexMap<String, String>,
    pub(crate) content_headers: Vec<String>,
    pub(crate) content: Vec<Vec<String>>,
    pub(crate) records: Vec<IndexMap<String, String>>,
}

impl SectionedSheet {
    /// Keys of the `[Header]` section, in file order.
    pub fn header_items(&self) -> impl Iterator<Item = &str> {
        self.header.keys().map(String::as_str)
    }

    pub fn header(&self) -> &IndexMap<String, String> {
        &self.header
    }

    pub fn reads(&self) -> &[String] {
        &self.reads
    }

    /// Keys of the `[Settings]` section, in file order.
    pub fn settings_items(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn settings(&self) -> &IndexMap<String, String> {
        &self.settings
    }

    /// Column names from the first `[Data]` line.
    pub fn content_headers(&self) -> &[String] {
        &self.content_headers
    }

    /// `[Data]` rows exactly as read.
    pub fn content(&self) -> &[Vec<String>] {
        &self.content
    }

    /// `[Data]` rows keyed by column name, values trimmed.
    pub fn samples(&self) -> &[IndexMap<String, String>] {
        &self.records
    }

    /// Reconstruct the sheet as IEM text.
    pub fn show(&self) -> String {
        let mut s = Vec::new();
        s.push("[Header]".to_string());
        for (param, value) in &self.header {
            s.push(format!("{},{}", param, value));
        }
        s.push(String::new());

        s.push("[Reads]".to_string());
        s.extend(self.reads.iter().cloned());
        s.push(String::new());

        s.push("[Settings]".to_string());
        for (param, value) in &self.settings {
            s.push(format!("{},{}", param, value));
        }
        s.push(String::new());

        s.push("[Data]".to_string());
        s.push(self.content_headers.join(","));
        for line in &self.content {
            s.push(line.join(","));
        }
        s.join("\n")
    }
}

// =============================================================================
// Flat (CASAVA) Sheet
// =============================================================================

/// An ordered list of CASAVA rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatSheet {
    pub(crate) records: Vec<FlatRecord>,
    pub(crate) illegal_characters: String,
}

impl Default for FlatSheet {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            illegal_characters: DEFAULT_ILLEGAL_CHARACTERS.to_string(),
        }
    }
}

impl FlatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FlatRecord>) -> Self {
        Self { records, ..Self::default() }
    }

    /// Replace the set of characters reported by
    /// [`crate::validation::illegal_names`].
    pub fn with_illegal_characters(mut self, characters: impl Into<String>) -> Self {
        self.illegal_characters = characters.into();
        self
    }

    pub fn illegal_characters(&self) -> &str {
        &self.illegal_characters
    }

    pub fn header(&self) -> &'static [&'static str; 10] {
        &FLAT_HEADER
    }

    pub fn append(&mut self, record: FlatRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [FlatRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize as CSV with the fixed header, one row per record.
    pub fn write_csv<W: Write>(&self, writer: W) -> SheetResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if self.records.is_empty() {
            wtr.write_record(self.header())?;
        }
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> SheetResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> SheetResult<()> {
        let file = File::create(path.as_ref())?;
        self.write_csv(file)
    }

    /// Tab-delimited view with one line per column and one column per record.
    pub fn transpose(&self) -> String {
        let header = self.header();
        let mut lines = Vec::with_capacity(header.len());
        for (i, name) in header.iter().enumerate() {
            let mut line = vec![*name];
            line.extend(self.records.iter().map(|r| r.values()[i]));
            lines.push(line.join("\t"));
        }
        lines.join("\n")
    }

    /// Directories and FASTQ stems bcl2fastq will produce for these records.
    pub fn predict_output(&self) -> PredictedOutput {
        let mut projects = PredictedOutput::new();
        for record in &self.records {
            let index = if record.index.is_empty() {
                "NoIndex"
            } else {
                record.index.as_str()
            };
            let fastq = format!("{}_{}_{}", record.sample_id, index, record.lane_label());
            projects
                .entry(format!("Project_{}", record.sample_project))
                .or_default()
                .entry(format!("Sample_{}", record.sample_id))
                .or_default()
                .push(fastq);
        }
        projects
    }
}
