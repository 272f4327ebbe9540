//! IEM (Illumina Experiment Manager) sample sheet parser.
//!
//! ```text
//! [Header]
//! IEMFileVersion,4
//! [Reads]
//! 151
//! [Settings]
//! Adapter,CTGTCTCTTATACACATCT
//! [Data]
//! Sample_ID,Sample_Name,index,Sample_Project,Description
//! DR1,DR1,TAAGGCGA,DR,
//! ```

use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;

use super::{read_sheet_file, records};
use crate::error::{FormatError, FormatResult, SheetResult};
use crate::logs::Reporter;
use crate::models::SectionedSheet;

/// Section opened by a `[Name]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Header,
    Reads,
    Settings,
    Data,
    Unknown(String),
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name {
            "Header" => Self::Header,
            "Reads" => Self::Reads,
            "Settings" => Self::Settings,
            "Data" => Self::Data,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Parse an IEM sample sheet from a reader.
///
/// Fails on the first line that sits outside any section or under an
/// unrecognised one. A `[Section` line without its closing bracket is
/// reported as a warning and handled as an ordinary line of the section
/// already open.
pub fn parse<R: Read>(reader: R, reporter: &dyn Reporter) -> FormatResult<SectionedSheet> {
    let mut sheet = SectionedSheet::default();
    let mut section: Option<Section> = None;

    for result in records(reader) {
        let (line, mut fields) = result?;

        if fields[0].starts_with('[') {
            match fields[0].find(']') {
                Some(end) => {
                    section = Some(Section::from_name(&fields[0][1..end]));
                    continue;
                }
                None => reporter.warning(&format!("Bad line {}: {}", line, fields[0])),
            }
        }

        match &section {
            Some(Section::Header) => {
                let (key, value) = key_value(fields);
                sheet.header.insert(key, value);
            }
            Some(Section::Reads) => {
                sheet.reads.push(fields.swap_remove(0));
            }
            Some(Section::Settings) => {
                let (key, value) = key_value(fields);
                sheet.settings.insert(key, value);
            }
            Some(Section::Data) => {
                if sheet.content_headers.is_empty() {
                    sheet.content_headers = fields;
                } else {
                    sheet.content.push(fields);
                }
            }
            Some(Section::Unknown(name)) => {
                return Err(FormatError::UnknownSection { line, name: name.clone() });
            }
            None => return Err(FormatError::NoSection { line }),
        }
    }

    if !sheet.content.is_empty() {
        sheet.records = sheet
            .content
            .iter()
            .map(|row| zip_row(&sheet.content_headers, row))
            .collect();
    }

    Ok(sheet)
}

pub fn parse_str(content: &str, reporter: &dyn Reporter) -> FormatResult<SectionedSheet> {
    parse(content.as_bytes(), reporter)
}

/// Read, decode and parse an IEM sample sheet file.
pub fn parse_file<P: AsRef<Path>>(path: P, reporter: &dyn Reporter) -> SheetResult<SectionedSheet> {
    let content = read_sheet_file(path)?;
    Ok(parse_str(&content, reporter)?)
}

/// `KEY,VALUE[,padding...]`; a lone key gets an empty value.
fn key_value(fields: Vec<String>) -> (String, String) {
    let mut it = fields.into_iter();
    let key = it.next().unwrap_or_default();
    let value = it.next().unwrap_or_default();
    (key, value)
}

/// Pair a data row with the column names. Short rows are padded with
/// empty values, extra trailing fields are dropped.
fn zip_row(headers: &[String], row: &[String]) -> IndexMap<String, String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let value = row
                .get(i)
                .map(|v| v.trim_matches(|c: char| c.is_ascii_whitespace()))
                .unwrap_or("");
            (name.clone(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::{LogLevel, MemoryReporter, NullReporter};

    const MISEQ_SHEET: &str = "\
[Header]
IEMFileVersion,4
Investigator Name,DR
Experiment Name,MiSeq_Run_01
Date,10/14/2026
Workflow,GenerateFASTQ

[Reads]
101
101

[Settings]
ReverseComplement,0
Adapter,CTGTCTCTTATACACATCT

[Data]
Sample_ID,Sample_Name,Sample_Plate,Sample_Well,I7_Index_ID,index,I5_Index_ID,index2,Sample_Project,Description
DR1,DR1,,,N701,TAAGGCGA,S501,TAGATCGC,DR,
EP_NCYC2669,EP_NCYC2669,,,N702, CGTACTAG ,S502,CTCTCTAT,EP,yeast
";

    #[test]
    fn test_parse_miseq_sheet() {
        let sheet = parse_str(MISEQ_SHEET, &NullReporter).unwrap();

        let header: Vec<&str> = sheet.header_items().collect();
        assert_eq!(
            header,
            vec!["IEMFileVersion", "Investigator Name", "Experiment Name", "Date", "Workflow"]
        );
        assert_eq!(sheet.header()["Experiment Name"], "MiSeq_Run_01");
        assert_eq!(sheet.reads(), &["101", "101"]);
        assert_eq!(sheet.settings()["Adapter"], "CTGTCTCTTATACACATCT");
        assert_eq!(sheet.content_headers().len(), 10);
        assert_eq!(sheet.content().len(), 2);

        let samples = sheet.samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0]["Sample_ID"], "DR1");
        assert_eq!(samples[0]["Description"], "");
        assert_eq!(samples[1]["index"], "CGTACTAG");
        assert_eq!(samples[1]["Description"], "yeast");
    }

    #[test]
    fn test_section_order_does_not_matter() {
        let reordered = "\
[Data]
Sample_ID,index,Sample_Project,Description
DR1,TAAGGCGA,DR,
[Settings]
Adapter,CTGTCTCTTATACACATCT
[Reads]
101
[Header]
IEMFileVersion,4
";
        let canonical = "\
[Header]
IEMFileVersion,4
[Reads]
101
[Settings]
Adapter,CTGTCTCTTATACACATCT
[Data]
Sample_ID,index,Sample_Project,Description
DR1,TAAGGCGA,DR,
";
        let a = parse_str(reordered, &NullReporter).unwrap();
        let b = parse_str(canonical, &NullReporter).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_trim_ascii_whitespace_only() {
        let text = "[Data]\r\nSample_ID,index,Description\r\n\u{a0}DR1 , ACGT\t,\"a, b\"\r\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        let record = &sheet.samples()[0];
        assert_eq!(record["Sample_ID"], "\u{a0}DR1");
        assert_eq!(record["index"], "ACGT");
        assert_eq!(record["Description"], "a, b");
    }

    #[test]
    fn test_records_have_every_column() {
        let text = "[Data]\nSample_ID,index,Sample_Project,Description\nDR1,ACGT\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        let record = &sheet.samples()[0];
        assert_eq!(record.len(), 4);
        assert_eq!(record["Sample_Project"], "");
        assert_eq!(record["Description"], "");
    }

    #[test]
    fn test_padded_header_lines() {
        let text = "[Header],,,\nIEMFileVersion,4,,,\nChemistry,Amplicon,,,\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        assert_eq!(sheet.header()["IEMFileVersion"], "4");
        assert_eq!(sheet.header()["Chemistry"], "Amplicon");
    }

    #[test]
    fn test_duplicate_header_keys_overwrite() {
        let text = "[Header]\nDate,1/1/2026\nWorkflow,GenerateFASTQ\nDate,2/2/2026\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        let keys: Vec<&str> = sheet.header_items().collect();
        assert_eq!(keys, vec!["Date", "Workflow"]);
        assert_eq!(sheet.header()["Date"], "2/2/2026");
    }

    #[test]
    fn test_content_before_section_fails() {
        let text = "IEMFileVersion,4\n[Header]\n";
        let err = parse_str(text, &NullReporter).unwrap_err();
        assert!(matches!(err, FormatError::NoSection { line: 1 }));
    }

    #[test]
    fn test_unknown_section_fails() {
        let text = "[Header]\nIEMFileVersion,4\n[Manifests]\nA,manifest.txt\n";
        let err = parse_str(text, &NullReporter).unwrap_err();
        match err {
            FormatError::UnknownSection { name, line } => {
                assert_eq!(name, "Manifests");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_unknown_section_is_allowed() {
        let text = "[Manifests]\n[Reads]\n151\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        assert_eq!(sheet.reads(), &["151"]);
    }

    #[test]
    fn test_unclosed_bracket_keeps_current_section() {
        let reporter = MemoryReporter::new();
        let text = "[Reads]\n101\n[Settings\n151\n";
        let sheet = parse_str(text, &reporter).unwrap();

        assert_eq!(sheet.reads(), &["101", "[Settings", "151"]);
        assert!(sheet.settings().is_empty());
        let warnings = reporter.messages(LogLevel::Warning);
        assert_eq!(warnings, vec!["Bad line 3: [Settings"]);
    }

    #[test]
    fn test_unclosed_bracket_before_any_section_fails() {
        let reporter = MemoryReporter::new();
        let err = parse_str("[Header\nIEMFileVersion,4\n", &reporter).unwrap_err();
        assert!(matches!(err, FormatError::NoSection { line: 1 }));
        assert_eq!(reporter.messages(LogLevel::Warning).len(), 1);
    }

    #[test]
    fn test_no_data_rows_no_records() {
        let text = "[Data]\nSample_ID,index\n";
        let sheet = parse_str(text, &NullReporter).unwrap();
        assert_eq!(sheet.content_headers(), &["Sample_ID", "index"]);
        assert!(sheet.samples().is_empty());
    }
}
