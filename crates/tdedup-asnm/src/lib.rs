//! Comparison baselines for temporal deduplication.
//!
//! The [`ComparisonMethod`] trait is the seam for alternative duplicate
//! detectors that run independently of the temporal pipeline. [`Asnm`] is
//! the adaptive sorted neighborhood method.

pub mod asnm;
pub mod blocking;
pub mod similarity;

use std::time::Duration;

use tdedup_model::{PredictedDuplicates, Record, Result};

pub use asnm::{Asnm, BlockedRecords};
pub use blocking::{block_distance, block_ranges, comparison_blocks};
pub use similarity::{integer_set, jaccard};

/// One prediction produced by a comparison method.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Human-readable name of the run, e.g. `ASNM (threshold = 0.9)`.
    pub label: String,
    pub threshold: Option<f64>,
    pub predicted: PredictedDuplicates,
    /// Records found similar to at least one other record.
    pub similar_records: usize,
    pub duration: Duration,
}

/// A duplicate detector evaluated side by side with the temporal pipeline.
///
/// Implementations work on their own copy of the records and never mutate
/// the caller's set.
pub trait ComparisonMethod: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Comparison method"
    }

    /// Run the method and return one prediction per configured variant.
    ///
    /// # Errors
    ///
    /// Returns an error when the method's configuration is invalid for the
    /// given dataset.
    fn compare(&self, headers: &[String], records: &[Record]) -> Result<Vec<Prediction>>;
}
