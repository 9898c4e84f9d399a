//! # Data Module
//!
//! Upload parsing and timestamp handling.

mod timestamps;
mod upload;

pub use timestamps::parse_timestamp;
pub use upload::{parse_text_lines, CsvTable, UploadKind};
