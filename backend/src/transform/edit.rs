//! In-place edits on CASAVA records.
//!
//! Nothing here re-runs validation; call [`crate::validation`] again
//! after editing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::barcode::truncate_barcode;
use crate::error::BarcodeResult;
use crate::logs::Reporter;
use crate::models::FlatSheet;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

impl FlatSheet {
    /// Truncate every index tag to `length` bases.
    ///
    /// Either all records are updated or, on a malformed tag, none are.
    pub fn truncate_barcodes(&mut self, length: usize, reporter: &dyn Reporter) -> BarcodeResult<()> {
        let truncated = self
            .records
            .iter()
            .map(|r| truncate_barcode(&r.index, length))
            .collect::<BarcodeResult<Vec<_>>>()?;

        for (record, barcode) in self.records.iter_mut().zip(truncated) {
            reporter.info(&format!(
                "Lane {} '{}/{}': barcode '{}' -> '{}'",
                record.lane, record.sample_project, record.sample_id, record.index, barcode
            ));
            record.index = barcode;
        }
        Ok(())
    }

    /// Use the SampleID as project name wherever SampleProject is empty.
    pub fn backfill_empty_projects(&mut self) {
        for record in self.records.iter_mut().filter(|r| r.sample_project.is_empty()) {
            record.sample_project = record.sample_id.clone();
        }
    }

    /// Replace whitespace in SampleID and SampleProject with underscores.
    pub fn fix_spaces(&mut self) {
        for record in self.records.iter_mut() {
            record.sample_id = WHITESPACE.replace_all(record.sample_id.trim(), "_").into_owned();
            record.sample_project = WHITESPACE
                .replace_all(record.sample_project.trim(), "_")
                .into_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::BarcodeError;
    use crate::logs::{LogLevel, MemoryReporter, NullReporter};
    use crate::models::{FlatRecord, FlatSheet};

    fn record(id: &str, index: &str, project: &str) -> FlatRecord {
        FlatRecord {
            fcid: "FC1".into(),
            lane: "1".into(),
            sample_id: id.into(),
            index: index.into(),
            sample_project: project.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_truncate_barcodes_logs_each_change() {
        let reporter = MemoryReporter::new();
        let mut sheet = FlatSheet::from_records(vec![
            record("DR1", "TAAGGCGA-TAGATCGC", "DR"),
            record("DR2", "CGTACTAG", "DR"),
        ]);
        sheet.truncate_barcodes(6, &reporter).unwrap();

        assert_eq!(sheet.records()[0].index, "TAAGGC-TAGATC");
        assert_eq!(sheet.records()[1].index, "CGTACT");
        assert_eq!(
            reporter.messages(LogLevel::Info)[0],
            "Lane 1 'DR/DR1': barcode 'TAAGGCGA-TAGATCGC' -> 'TAAGGC-TAGATC'"
        );
    }

    #[test]
    fn test_truncate_barcodes_malformed_leaves_sheet_untouched() {
        let mut sheet = FlatSheet::from_records(vec![
            record("DR1", "TAAGGCGA", "DR"),
            record("DR2", "AC-GT-TT", "DR"),
        ]);
        let before = sheet.clone();
        let err = sheet.truncate_barcodes(2, &NullReporter).unwrap_err();
        assert!(matches!(err, BarcodeError::Malformed { hyphens: 2, .. }));
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_backfill_empty_projects() {
        let mut sheet = FlatSheet::from_records(vec![
            record("DR1", "", ""),
            record("EP1", "", "EP"),
        ]);
        sheet.backfill_empty_projects();
        assert_eq!(sheet.records()[0].sample_project, "DR1");
        assert_eq!(sheet.records()[1].sample_project, "EP");
    }

    #[test]
    fn test_backfill_is_idempotent() {
        let mut once = FlatSheet::from_records(vec![
            record("DR1", "", ""),
            record("", "", ""),
            record("EP1", "", "EP"),
        ]);
        once.backfill_empty_projects();
        let mut twice = once.clone();
        twice.backfill_empty_projects();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fix_spaces() {
        let mut sheet = FlatSheet::from_records(vec![record(" DR 1 ", "", "Dave  R\tProject")]);
        sheet.fix_spaces();
        assert_eq!(sheet.records()[0].sample_id, "DR_1");
        assert_eq!(sheet.records()[0].sample_project, "Dave_R_Project");
    }
}
