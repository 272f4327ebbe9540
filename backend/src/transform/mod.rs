//! Transformation module.
//!
//! This module handles IEM to CASAVA transformation:
//! - Convert: `[Data]` samples to CASAVA rows
//! - Barcode: index tag truncation and name initials
//! - Edit: in-place fixes on CASAVA rows
//! - Pipeline: main preparation pipeline

pub mod barcode;
pub mod convert;
pub mod edit;
pub mod pipeline;

pub use barcode::{extract_initials, truncate_barcode};
pub use convert::to_flat;
pub use pipeline::*;
