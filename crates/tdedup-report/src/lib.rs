//! Output writers for temporal deduplication runs.

pub mod analysis;
pub mod common;
pub mod diff;
pub mod raw;

pub use analysis::{ANALYSIS_COLUMNS, analysis_header, analysis_row, write_analysis};
pub use common::OutputPaths;
pub use diff::{FieldDiff, diff_records};
pub use raw::write_raw_records;
