//! CASAVA sample sheet parser.

use std::io::Read;
use std::path::Path;

use super::{read_sheet_file, records};
use crate::error::{FormatError, FormatResult, SheetResult};
use crate::models::{FlatRecord, FlatSheet, FLAT_HEADER};

/// Parse a CASAVA sample sheet from a reader.
///
/// The first non-blank row is the header. In every later row, fields are
/// stripped of double quotes and any field then starting with `#` is
/// dropped; the remaining fields are zipped against [`FLAT_HEADER`].
///
/// NOTE: the header check rejects a header that *equals* [`FLAT_HEADER`],
/// so only sheets with a differently named header row get through.
pub fn parse<R: Read>(reader: R) -> FormatResult<FlatSheet> {
    let mut headers: Option<Vec<String>> = None;
    let mut content: Vec<Vec<String>> = Vec::new();

    for result in records(reader) {
        let (_, fields) = result?;
        if headers.is_none() {
            headers = Some(fields);
            continue;
        }
        content.push(
            fields
                .iter()
                .map(|f| f.trim_matches('"'))
                .filter(|f| !f.starts_with('#'))
                .map(String::from)
                .collect(),
        );
    }

    let headers = headers.ok_or(FormatError::NoHeader)?;
    if headers.iter().map(String::as_str).eq(FLAT_HEADER.iter().copied()) {
        return Err(FormatError::HeaderMatch { header: headers.join(",") });
    }

    Ok(FlatSheet::from_records(
        content.into_iter().map(FlatRecord::from_fields).collect(),
    ))
}

pub fn parse_str(content: &str) -> FormatResult<FlatSheet> {
    parse(content.as_bytes())
}

/// Read, decode and parse a CASAVA sample sheet file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> SheetResult<FlatSheet> {
    let content = read_sheet_file(path)?;
    Ok(parse_str(&content)?)
}
