//! Configuration options for the deduplication pipeline and the ASNM baseline.

use serde::{Deserialize, Serialize};

use crate::error::{DedupError, Result};
use crate::granularity::TimestampGranularity;

/// Minimum unconstrained sequence length for an order match.
pub const DEFAULT_MIN_UNCONSTRAINED_LENGTH: usize = 8;

/// Similarity thresholds used by ASNM when none are supplied.
pub const DEFAULT_SIMILARITY_THRESHOLDS: [f64; 7] = [0.8, 0.9, 0.95, 0.927, 0.963, 0.981, 1.0];

/// Normalized edit distance at or below which two blocking keys share a block.
pub const DEFAULT_BLOCK_DISTANCE_THRESHOLD: f64 = 0.05;

/// Upper bound on LCS samples collected per record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleCap {
    /// Sample the whole eligible population (max-sampling).
    #[default]
    Max,
    /// Stop after this many samples.
    Count(usize),
}

/// How submitted sequences are selected as samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Take every Nth submitted sequence, starting with the first.
    EveryNth(usize),
    /// Take each submitted sequence with probability one half.
    Random { seed: Option<u64> },
}

impl Default for Selection {
    fn default() -> Self {
        Self::EveryNth(1)
    }
}

/// LCS sampling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LcsSampling {
    pub cap: SampleCap,
    pub selection: Selection,
}

/// Sampling policy with the cap resolved against a concrete population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSampling {
    pub cap: usize,
    pub selection: Selection,
}

impl LcsSampling {
    pub fn max() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, cap: SampleCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn is_max(&self) -> bool {
        matches!(self.cap, SampleCap::Max)
    }

    /// Resolves the cap for `population` records.
    ///
    /// Max-sampling caps at the population and always takes every
    /// sequence, whatever selection was configured.
    pub fn resolve(&self, population: usize) -> ResolvedSampling {
        match self.cap {
            SampleCap::Max => ResolvedSampling {
                cap: population,
                selection: Selection::EveryNth(1),
            },
            SampleCap::Count(count) => ResolvedSampling {
                cap: count,
                selection: self.selection,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cap == SampleCap::Count(0) {
            return Err(DedupError::InvalidSampling(
                "sample count must be at least 1".to_string(),
            ));
        }
        if self.selection == Selection::EveryNth(0) {
            return Err(DedupError::InvalidSampling(
                "skip rate must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which timestamp granularities are precise enough for elapsed-time matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElapsedTimePolicy {
    /// Only time-of-day and exact timestamps.
    #[default]
    RequireFineGranularity,
    /// Every granularity, including dates.
    Always,
}

impl ElapsedTimePolicy {
    pub fn trusts(self, granularity: TimestampGranularity) -> bool {
        match self {
            Self::Always => true,
            Self::RequireFineGranularity => matches!(
                granularity,
                TimestampGranularity::TimeOfDay | TimestampGranularity::Exact
            ),
        }
    }
}

/// Model parameters for the deduplication pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    /// Sampling used to build each record type's LCS.
    pub sampling: LcsSampling,

    /// Shortest unconstrained sequence considered by the order match.
    pub min_unconstrained_length: usize,

    pub elapsed_time_policy: ElapsedTimePolicy,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            sampling: LcsSampling::default(),
            min_unconstrained_length: DEFAULT_MIN_UNCONSTRAINED_LENGTH,
            elapsed_time_policy: ElapsedTimePolicy::default(),
        }
    }
}

impl DedupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sampling(mut self, sampling: LcsSampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_min_unconstrained_length(mut self, length: usize) -> Self {
        self.min_unconstrained_length = length;
        self
    }

    pub fn with_elapsed_time_policy(mut self, policy: ElapsedTimePolicy) -> Self {
        self.elapsed_time_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()
    }
}

/// Parameters for the ASNM comparison baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsnmOptions {
    /// Header name of the blocking key; `None` treats the dataset as one block.
    pub blocking_key: Option<String>,

    /// Similarity thresholds; empty means [`DEFAULT_SIMILARITY_THRESHOLDS`].
    pub thresholds: Vec<f64>,

    pub block_distance_threshold: f64,
}

impl Default for AsnmOptions {
    fn default() -> Self {
        Self {
            blocking_key: None,
            thresholds: Vec::new(),
            block_distance_threshold: DEFAULT_BLOCK_DISTANCE_THRESHOLD,
        }
    }
}

impl AsnmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the blocking key; a blank name disables blocking.
    pub fn with_blocking_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let key = key.trim();
        self.blocking_key = (!key.is_empty()).then(|| key.to_string());
        self
    }

    pub fn with_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_block_distance_threshold(mut self, threshold: f64) -> Self {
        self.block_distance_threshold = threshold;
        self
    }

    pub fn effective_thresholds(&self) -> Vec<f64> {
        if self.thresholds.is_empty() {
            DEFAULT_SIMILARITY_THRESHOLDS.to_vec()
        } else {
            self.thresholds.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for &value in self
            .thresholds
            .iter()
            .chain(std::iter::once(&self.block_distance_threshold))
        {
            if !(0.0..=1.0).contains(&value) {
                return Err(DedupError::InvalidThreshold { value });
            }
        }
        Ok(())
    }
}
