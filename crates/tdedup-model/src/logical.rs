//! Logical attributes: repeating column groups within a record.

use serde::{Deserialize, Serialize};

use crate::granularity::TimestampGranularity;

/// One instance of the record's repeating attribute group.
///
/// Holds the raw values of its columns plus the timestamp resolved from
/// them. When several columns of the group carry time information, the
/// finest granularity with a non-zero value wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalAttribute {
    relative_index: usize,
    values: Vec<String>,
    timestamp: i64,
    granularity: TimestampGranularity,
    timestamp_column: Option<usize>,
}

impl LogicalAttribute {
    pub fn new(relative_index: usize) -> Self {
        Self {
            relative_index,
            values: Vec::new(),
            timestamp: 0,
            granularity: TimestampGranularity::Unknown,
            timestamp_column: None,
        }
    }

    /// Position of this attribute within the record's repeating group.
    pub fn relative_index(&self) -> usize {
        self.relative_index
    }

    pub fn push_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Offers a resolved timestamp taken from absolute column `column`.
    ///
    /// The offer is kept only when `granularity` is the same or finer than
    /// the current one and `timestamp` is positive. Returns whether the
    /// timestamp was taken.
    pub fn offer_timestamp(
        &mut self,
        timestamp: i64,
        granularity: TimestampGranularity,
        column: usize,
    ) -> bool {
        if !self.granularity.accepts(granularity) || timestamp <= 0 {
            return false;
        }
        self.timestamp = timestamp;
        self.granularity = granularity;
        self.timestamp_column = Some(column);
        true
    }

    /// Resolved timestamp; 0 means none.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp > 0
    }

    pub fn granularity(&self) -> TimestampGranularity {
        self.granularity
    }

    /// Absolute column index the timestamp was resolved from.
    pub fn timestamp_column(&self) -> Option<usize> {
        self.timestamp_column
    }
}
