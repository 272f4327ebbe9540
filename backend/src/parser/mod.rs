//! Sample sheet parsing.
//!
//! - [`sectioned`] - IEM sheets with `[Header]`, `[Reads]`, `[Settings]`, `[Data]`
//! - [`flat`] - single-table CASAVA sheets
//!
//! Files are read as raw bytes and decoded here first: sheets saved on
//! instrument PCs are often Windows-1252 rather than UTF-8.

use std::io::Read;
use std::path::Path;

use crate::error::{FormatResult, SheetError, SheetResult};

pub mod flat;
pub mod sectioned;

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Invalid UTF-8 is re-read as Windows-1252. A leading BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> SheetResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => return Err(SheetError::Encoding(format!("unsupported encoding '{}'", other))),
        },
    };

    Ok(match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    })
}

/// Read a sheet file and decode it to text.
pub fn read_sheet_file<P: AsRef<Path>>(path: P) -> SheetResult<String> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SheetError::NotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    if std::str::from_utf8(&bytes).is_ok() {
        return decode_content(&bytes, "utf-8");
    }
    // Labels chardet reports but encoding_rs doesn't know: assume Windows-1252
    let encoding = detect_encoding(&bytes);
    decode_content(&bytes, &encoding).or_else(|_| decode_content(&bytes, "windows-1252"))
}

/// Stream non-blank CSV records together with their 1-based line number.
///
/// A record whose fields are all empty (`,,,,` padding) counts as blank.
pub(crate) fn records<R: Read>(
    reader: R,
) -> impl Iterator<Item = FormatResult<(usize, Vec<String>)>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .filter_map(|result| match result {
            Ok(record) => {
                if record.iter().all(str::is_empty) {
                    return None;
                }
                let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
                Some(Ok((line, record.iter().map(String::from).collect())))
            }
            Err(e) => Some(Err(e.into())),
        })
}
