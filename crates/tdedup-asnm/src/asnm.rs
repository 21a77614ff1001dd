//! Adaptive Sorted Neighborhood Method.
//!
//! Yan, Lee, Kan & Giles (2007), "Adaptive sorted neighborhood methods for
//! efficient record linkage", JCDL 2007. Records are sorted on a blocking
//! key, split into variable-size non-overlapping blocks, and every pair
//! within a block is compared by Jaccard similarity.

use std::collections::HashSet;
use std::ops::Range;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use tdedup_model::{AsnmOptions, PredictedDuplicates, Record, Result};

use crate::blocking::{block_ranges, comparison_blocks};
use crate::similarity::{integer_set, jaccard};
use crate::{ComparisonMethod, Prediction};

/// Records sorted on the blocking key, split into comparison blocks.
#[derive(Debug, Clone)]
pub struct BlockedRecords {
    /// Deep copy of the input, stable-sorted on the blocking key.
    pub records: Vec<Record>,
    pub blocking_key_index: Option<usize>,
    pub blocks: Vec<Range<usize>>,
}

/// ASNM comparator configured by [`AsnmOptions`].
#[derive(Debug, Clone, Default)]
pub struct Asnm {
    options: AsnmOptions,
}

impl Asnm {
    pub fn new(options: AsnmOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &AsnmOptions {
        &self.options
    }

    /// Column of the blocking key, matched case-insensitively.
    ///
    /// `None` without a blocking key. An unknown name falls back to the
    /// first column.
    pub fn blocking_key_index(&self, headers: &[String]) -> Option<usize> {
        let key = self.options.blocking_key.as_deref()?;
        let index = headers.iter().position(|h| h.eq_ignore_ascii_case(key));
        if index.is_none() {
            warn!(blocking_key = key, "blocking key not found in headers; using column 0");
        }
        Some(index.unwrap_or(0))
    }

    /// Copy and sort `records` on the blocking key and find the blocks.
    ///
    /// Without a blocking key the whole dataset is one block.
    pub fn sort_and_block(&self, headers: &[String], records: &[Record]) -> BlockedRecords {
        let blocking_key_index = self.blocking_key_index(headers);
        let sort_column = blocking_key_index.unwrap_or(0);

        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| {
            a.value(sort_column)
                .unwrap_or("")
                .cmp(b.value(sort_column).unwrap_or(""))
        });

        let blocks = match blocking_key_index {
            Some(column) => {
                let keys: Vec<&str> = sorted
                    .iter()
                    .map(|record| record.value(column).unwrap_or(""))
                    .collect();
                let starts = comparison_blocks(&keys, self.options.block_distance_threshold);
                block_ranges(&starts, sorted.len())
            }
            None if sorted.is_empty() => Vec::new(),
            None => vec![0..sorted.len()],
        };

        BlockedRecords {
            records: sorted,
            blocking_key_index,
            blocks,
        }
    }

    /// Flag every record with a same-block partner at or above `threshold`.
    ///
    /// `sets[i]` is the integer set of `blocked.records[i]`. Blocks are
    /// scanned in parallel.
    pub fn scan(
        blocked: &BlockedRecords,
        sets: &[HashSet<i64>],
        threshold: f64,
    ) -> (PredictedDuplicates, usize) {
        let mut flagged: Vec<usize> = blocked
            .blocks
            .par_iter()
            .flat_map_iter(|block| {
                block.clone().filter(move |&review| {
                    block
                        .clone()
                        .filter(|&other| other != review)
                        .any(|other| jaccard(&sets[review], &sets[other]) >= threshold)
                })
            })
            .collect();
        flagged.sort_unstable();

        let predicted = flagged
            .iter()
            .map(|&index| blocked.records[index].id())
            .collect();
        (predicted, flagged.len())
    }
}

impl ComparisonMethod for Asnm {
    fn name(&self) -> &'static str {
        "ASNM"
    }

    fn description(&self) -> &'static str {
        "Adaptive sorted neighborhood with Jaccard similarity"
    }

    fn compare(&self, headers: &[String], records: &[Record]) -> Result<Vec<Prediction>> {
        let span = info_span!("asnm", records = records.len());
        let _guard = span.enter();

        let start = Instant::now();
        let blocked = self.sort_and_block(headers, records);
        let sets: Vec<HashSet<i64>> = blocked.records.par_iter().map(integer_set).collect();
        let setup = start.elapsed();
        info!(
            blocks = blocked.blocks.len(),
            blocking_key_index = blocked.blocking_key_index,
            duration_ms = setup.as_millis(),
            "records sorted and blocked"
        );

        let thresholds = self.options.effective_thresholds();
        if self.options.thresholds.is_empty() {
            info!(?thresholds, "no similarity thresholds given; applying defaults");
        }

        let predictions = thresholds
            .into_iter()
            .map(|threshold| {
                let start = Instant::now();
                let (predicted, similar_records) = Self::scan(&blocked, &sets, threshold);
                let duration = setup + start.elapsed();
                info!(
                    threshold,
                    similar_records,
                    duration_ms = duration.as_millis(),
                    "similarity scan complete"
                );
                debug!(predicted = predicted.len(), "threshold prediction");
                Prediction {
                    label: format!("{} (threshold = {threshold})", self.name()),
                    threshold: Some(threshold),
                    predicted,
                    similar_records,
                    duration,
                }
            })
            .collect();

        Ok(predictions)
    }
}
