//! Index tag and sample name helpers.

use crate::error::{BarcodeError, BarcodeResult};

/// Truncate an index tag to `length` bases.
///
/// A dual index `AAAA-CCCC` is truncated half by half. Halves already
/// shorter than `length` are left alone.
///
/// # Example
/// ```
/// use samplesheet::truncate_barcode;
///
/// assert_eq!(truncate_barcode("ACGT-TTTT", 2).unwrap(), "AC-TT");
/// assert_eq!(truncate_barcode("ACGTACGT", 4).unwrap(), "ACGT");
/// assert_eq!(truncate_barcode("AC-TTTT", 5).unwrap(), "AC-TTTT");
/// ```
pub fn truncate_barcode(sequence: &str, length: usize) -> BarcodeResult<String> {
    match sequence.matches('-').count() {
        0 => Ok(truncate(sequence, length)),
        1 => {
            let (index1, index2) = sequence.split_once('-').unwrap_or((sequence, ""));
            Ok(format!("{}-{}", truncate(index1, length), truncate(index2, length)))
        }
        hyphens => Err(BarcodeError::Malformed {
            barcode: sequence.to_string(),
            hyphens,
        }),
    }
}

fn truncate(s: &str, length: usize) -> String {
    s.chars().take(length).collect()
}

/// Leading initials from a sample name.
///
/// By convention the experimenter's initials start the name,
/// e.g. `DR` for `DR1`, `EP` for `EP_NCYC2669`, `CW` for `CW_TI`.
pub fn extract_initials(name: &str) -> String {
    name.chars().take_while(|c| c.is_alphabetic()).collect()
}
