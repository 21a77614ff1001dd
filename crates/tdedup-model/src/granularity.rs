//! Timestamp granularity of logical attributes and records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Granularity of the timestamp carried by a logical attribute.
///
/// The timestamp may come from a date column, a time-of-day column, or an
/// exact (integer) timestamp column. Variants are ordered from coarsest to
/// finest, with `Unknown` (no timestamp resolved yet) last.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimestampGranularity {
    /// Calendar date only.
    Date,
    /// Time of day.
    TimeOfDay,
    /// Exact integer timestamp.
    Exact,
    /// No timestamp resolved.
    #[default]
    Unknown,
}

impl TimestampGranularity {
    /// Classifies a header name as a timestamp source.
    ///
    /// `timestamp` wins over `time`, which wins over `date`; matching is a
    /// case-insensitive substring test.
    pub fn from_header(header: &str) -> Option<Self> {
        let lower = header.to_lowercase();
        if lower.contains("timestamp") {
            Some(Self::Exact)
        } else if lower.contains("time") {
            Some(Self::TimeOfDay)
        } else if lower.contains("date") {
            Some(Self::Date)
        } else {
            None
        }
    }

    /// Returns true when `candidate` is at the same or a finer level than `self`.
    ///
    /// Anything is accepted while no timestamp has been resolved.
    pub fn accepts(self, candidate: Self) -> bool {
        match self {
            Self::Unknown => true,
            current => candidate != Self::Unknown && candidate >= current,
        }
    }

    /// Returns the finer of two granularities, ignoring `Unknown`.
    pub fn finest(self, other: Self) -> Self {
        match (self, other) {
            (Self::Unknown, g) | (g, Self::Unknown) => g,
            (a, b) => a.max(b),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::TimeOfDay => "TIME_OF_DAY",
            Self::Exact => "EXACT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TimestampGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
