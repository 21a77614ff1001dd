//! Data ingestion for temporal deduplication.
//!
//! Reads the tab-delimited dataset (header row first, ragged rows allowed)
//! and the truth file listing the ids of known duplicate records.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tdedup_ingest::{read_dataset, read_truth_ids};
//!
//! let dataset = read_dataset(Path::new("data/sessions.tsv"))?;
//! let truth = read_truth_ids(Path::new("data/sessions_truth.tsv"))?;
//! ```

mod dataset;
mod error;
mod truth;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use dataset::{Dataset, read_dataset};
pub use truth::read_truth_ids;
