//! Report parsing: sanitization, segmentation, classification, and the
//! block grammar.

mod blocks;
mod cell;
pub mod classify;
mod inline;
mod options;
mod report;
mod sanitize;
mod segment;

pub use blocks::parse_blocks;
pub use cell::{process_cell, CellPolicy};
pub use classify::classify;
pub use inline::parse_inline;
pub use options::ParseOptions;
pub use report::ReportParser;
pub use sanitize::{SanitizeOptions, SanitizePipeline, TRUNCATION_MARKER};
pub use segment::{segment, RawSection};
