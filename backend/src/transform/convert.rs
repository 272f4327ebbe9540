//! IEM `[Data]` section to CASAVA rows.
//!
//! ```text
//! [Data]                                        CASAVA
//! Sample_ID,index,index2,Sample_Project    →    FC1,1,DR1,,AAAA-CCCC,,,,,DR
//! DR1,AAAA,CCCC,DR
//! ```

use indexmap::IndexMap;

use super::barcode::extract_initials;
use crate::error::{FormatError, FormatResult};
use crate::models::{FlatRecord, FlatSheet, SectionedSheet, DEFAULT_LANE};

/// Convert the samples of an IEM sheet to a CASAVA sheet.
///
/// `Sample_ID` and `Description` columns are required. With
/// `fix_empty_projects`, a blank `Sample_Project` is replaced by the
/// initials at the start of `Sample_ID`.
pub fn to_flat(
    sheet: &SectionedSheet,
    flowcell_id: &str,
    fix_empty_projects: bool,
) -> FormatResult<FlatSheet> {
    let mut flat = FlatSheet::new();

    for (i, sample) in sheet.samples().iter().enumerate() {
        let row = i + 1;
        let sample_id = required(sample, "Sample_ID", row)?;
        let description = required(sample, "Description", row)?;
        let project = sample.get("Sample_Project").map(String::as_str).unwrap_or("");

        let sample_project = if project.is_empty() && fix_empty_projects {
            extract_initials(sample_id)
        } else {
            project.to_string()
        };

        flat.append(FlatRecord {
            fcid: flowcell_id.to_string(),
            lane: sample
                .get("Lane")
                .cloned()
                .unwrap_or_else(|| DEFAULT_LANE.to_string()),
            sample_id: sample_id.to_string(),
            index: index_tag(sample),
            description: description.to_string(),
            sample_project,
            ..Default::default()
        });
    }

    Ok(flat)
}

/// `index-index2` when both columns exist, `index` alone, or empty.
fn index_tag(sample: &IndexMap<String, String>) -> String {
    match (sample.get("index"), sample.get("index2")) {
        (Some(i7), Some(i5)) => format!("{}-{}", i7.trim(), i5.trim()),
        (Some(i7), None) => i7.trim().to_string(),
        (None, _) => String::new(),
    }
}

fn required<'a>(
    sample: &'a IndexMap<String, String>,
    column: &str,
    row: usize,
) -> FormatResult<&'a str> {
    sample
        .get(column)
        .map(String::as_str)
        .ok_or_else(|| FormatError::MissingColumn { column: column.to_string(), row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::NullReporter;
    use crate::parser::sectioned::parse_str;

    fn sheet(data: &str) -> SectionedSheet {
        parse_str(&format!("[Data]\n{}", data), &NullReporter).unwrap()
    }

    #[test]
    fn test_dual_index_and_defaults() {
        let s = sheet(
            "Sample_ID,index,index2,Sample_Project,Description\n\
             DR1,TAAGGCGA,TAGATCGC,DR,first\n",
        );
        let flat = to_flat(&s, "000000000-A1B2C", false).unwrap();
        let r = &flat.records()[0];
        assert_eq!(r.fcid, "000000000-A1B2C");
        assert_eq!(r.lane, "1");
        assert_eq!(r.index, "TAAGGCGA-TAGATCGC");
        assert_eq!(r.sample_id, "DR1");
        assert_eq!(r.description, "first");
        assert_eq!(r.sample_project, "DR");
        assert_eq!(r.sample_ref, "");
        assert_eq!(r.control, "");
    }

    #[test]
    fn test_lane_column_used() {
        let s = sheet("Lane,Sample_ID,index,Sample_Project,Description\n3,DR1,ACGT,DR,\n");
        let flat = to_flat(&s, "FC1", false).unwrap();
        assert_eq!(flat.records()[0].lane, "3");
        assert_eq!(flat.records()[0].index, "ACGT");
    }

    #[test]
    fn test_no_index_columns() {
        let s = sheet("Sample_ID,Sample_Project,Description\nDR1,DR,\n");
        let flat = to_flat(&s, "FC1", false).unwrap();
        assert_eq!(flat.records()[0].index, "");
    }

    #[test]
    fn test_index2_without_index_is_ignored() {
        let s = sheet("Sample_ID,index2,Sample_Project,Description\nDR1,ACGT,DR,\n");
        let flat = to_flat(&s, "FC1", false).unwrap();
        assert_eq!(flat.records()[0].index, "");
    }

    #[test]
    fn test_empty_project_left_without_flag() {
        let s = sheet("Sample_ID,Sample_Project,Description\nEP_NCYC2669,,\n");
        let flat = to_flat(&s, "FC1", false).unwrap();
        assert_eq!(flat.records()[0].sample_project, "");
    }

    #[test]
    fn test_empty_project_fixed_from_initials() {
        let s = sheet(
            "Sample_ID,Sample_Project,Description\nEP_NCYC2669,,\n123x,,\nDR1,Other,\n",
        );
        let flat = to_flat(&s, "FC1", true).unwrap();
        let projects: Vec<&str> =
            flat.records().iter().map(|r| r.sample_project.as_str()).collect();
        assert_eq!(projects, vec!["EP", "", "Other"]);
    }

    #[test]
    fn test_missing_required_column() {
        let s = sheet("Sample_ID,Sample_Project\nDR1,DR\n");
        let err = to_flat(&s, "FC1", false).unwrap_err();
        match err {
            FormatError::MissingColumn { column, row } => {
                assert_eq!(column, "Description");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
