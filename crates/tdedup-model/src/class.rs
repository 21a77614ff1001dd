//! Duplication classes assigned to matched record pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of redundancy observed between two records X and Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DuplicationClass {
    /// All attribute values match between X and Y.
    #[serde(rename = "EXACT")]
    Exact,
    /// All attribute values match except the key attribute(s).
    #[serde(rename = "NONKEY")]
    NonKey,
    /// Same key, inconsistent attribute values (multiple pulls of an edited record).
    #[serde(rename = "MODIFIED")]
    ModifiedValues,
    /// Same delta between earliest and latest timestamps.
    #[serde(rename = "ELAPSED_TIME")]
    ElapsedTime,
    /// Same sequence of logical attributes that are not bound to the record-type order.
    #[serde(rename = "ORDER")]
    UnconstrainedOrder,
}

impl DuplicationClass {
    /// Short code used in analysis output.
    pub fn code(self) -> &'static str {
        match self {
            Self::Exact => "EXACT",
            Self::NonKey => "NONKEY",
            Self::ModifiedValues => "MODIFIED",
            Self::ElapsedTime => "ELAPSED_TIME",
            Self::UnconstrainedOrder => "ORDER",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Exact => "exact duplicate",
            Self::NonKey => "key value differs",
            Self::ModifiedValues => "modified attribute values",
            Self::ElapsedTime => "elapsed time match",
            Self::UnconstrainedOrder => "unconstrained order match",
        }
    }
}

impl fmt::Display for DuplicationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
