//! Data records: raw values plus the fields derived from them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::class::DuplicationClass;
use crate::granularity::TimestampGranularity;
use crate::key::KeyAttribute;
use crate::logical::LogicalAttribute;
use crate::sequence::{EventSequence, LcsAssessment};

/// Record type shared by every record when no key could be inferred.
///
/// Records carrying it are comparable with any other record carrying it.
pub const GLOBAL_RECORD_TYPE: &str = "GlobalCommonRecordType";

/// One entry of a record's match log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchAnnotation {
    pub record_id: usize,
    pub class: DuplicationClass,
}

/// A single data record with its raw values and aggregated information.
///
/// Records are built incrementally while a dataset is read and finalized by
/// [`Record::finish_read`]. Cloning is a deep copy; only the key descriptor
/// is shared.
#[derive(Debug, Clone)]
pub struct Record {
    id: usize,
    values: Vec<String>,
    key: Arc<KeyAttribute>,
    key_values: Vec<String>,
    logical_attributes: Vec<LogicalAttribute>,
    record_type: String,
    earliest: i64,
    latest: i64,
    elapsed_time: i64,
    granularity: TimestampGranularity,
    event_sequence: EventSequence,
    lcs: Option<EventSequence>,
    constrained: EventSequence,
    unconstrained: EventSequence,
    lcs_adhered: bool,
    matches: Vec<MatchAnnotation>,
    truth_duplicate: bool,
}

impl Record {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            values: Vec::new(),
            key: Arc::new(KeyAttribute::Empty),
            key_values: Vec::new(),
            logical_attributes: Vec::new(),
            record_type: String::new(),
            earliest: 0,
            latest: 0,
            elapsed_time: 0,
            granularity: TimestampGranularity::Unknown,
            event_sequence: EventSequence::default(),
            lcs: None,
            constrained: EventSequence::default(),
            unconstrained: EventSequence::default(),
            lcs_adhered: true,
            matches: Vec::new(),
            truth_duplicate: false,
        }
    }

    /// Builds a finished record without logical attributes.
    pub fn with_values<I, S>(id: usize, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new(id);
        for value in values {
            record.push_value(value);
        }
        record.finish_read();
        record
    }

    pub fn push_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Appends a logical attribute and folds its timestamp into the
    /// earliest/latest bounds and the record granularity.
    pub fn push_logical_attribute(&mut self, attribute: LogicalAttribute) {
        if attribute.has_timestamp() {
            let ts = attribute.timestamp();
            if self.earliest == 0 || ts < self.earliest {
                self.earliest = ts;
            }
            if ts > self.latest {
                self.latest = ts;
            }
            self.granularity = self.granularity.finest(attribute.granularity());
        }
        self.logical_attributes.push(attribute);
    }

    /// Computes elapsed time and the event sequence once all values are in.
    ///
    /// Key and record type are not known yet at this point.
    pub fn finish_read(&mut self) {
        self.elapsed_time = self.latest - self.earliest;

        let mut timed: Vec<&LogicalAttribute> = self
            .logical_attributes
            .iter()
            .filter(|attribute| attribute.has_timestamp())
            .collect();
        timed.sort_by_key(|attribute| attribute.timestamp());
        self.event_sequence = timed
            .into_iter()
            .map(LogicalAttribute::relative_index)
            .collect();
        self.unconstrained = self.event_sequence.clone();
    }

    pub fn apply_key(&mut self, key: Arc<KeyAttribute>) {
        self.key_values = key.extract(&self.values);
        self.key = key;
    }

    /// Uses the value at `index` as the record type (blank when absent).
    pub fn apply_record_type(&mut self, index: usize) {
        self.record_type = self.values.get(index).cloned().unwrap_or_default();
    }

    pub fn apply_global_record_type(&mut self) {
        self.record_type = GLOBAL_RECORD_TYPE.to_string();
    }

    /// True when every raw value, and the value count, are equal.
    pub fn exact_match(&self, other: &Record) -> bool {
        self.values == other.values
    }

    /// True when the value counts agree and every non-key value is equal.
    pub fn equals_ignoring_key(&self, other: &Record) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .enumerate()
                .all(|(index, (a, b))| self.key.contains_index(index) || a == b)
    }

    /// True when both records carry the same non-empty key descriptor and
    /// equal key values.
    pub fn shares_same_key(&self, other: &Record) -> bool {
        !self.key.is_empty() && self.key == other.key && self.key_values == other.key_values
    }

    /// True when the record has logical attributes and all of them carry a timestamp.
    pub fn all_timestamped(&self) -> bool {
        !self.logical_attributes.is_empty()
            && self
                .logical_attributes
                .iter()
                .all(LogicalAttribute::has_timestamp)
    }

    pub fn any_timestamped(&self) -> bool {
        self.logical_attributes
            .iter()
            .any(LogicalAttribute::has_timestamp)
    }

    pub fn timestamp_count(&self) -> usize {
        self.logical_attributes
            .iter()
            .filter(|attribute| attribute.has_timestamp())
            .count()
    }

    pub fn add_match(&mut self, record_id: usize, class: DuplicationClass) {
        self.matches.push(MatchAnnotation { record_id, class });
    }

    pub fn contains_match(&self, record_id: usize) -> bool {
        self.matches.iter().any(|m| m.record_id == record_id)
    }

    pub fn has_known_duplicate(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn mark_truth_duplicate(&mut self) {
        self.truth_duplicate = true;
    }

    pub fn is_truth_duplicate(&self) -> bool {
        self.truth_duplicate
    }

    /// Stores the outcome of scoring this record against its type's LCS.
    pub fn apply_lcs(&mut self, assessment: LcsAssessment) {
        self.lcs = assessment.lcs;
        self.constrained = assessment.constrained;
        self.unconstrained = assessment.unconstrained;
        self.lcs_adhered = assessment.adhered;
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn key(&self) -> &KeyAttribute {
        &self.key
    }

    pub fn key_values(&self) -> &[String] {
        &self.key_values
    }

    pub fn logical_attributes(&self) -> &[LogicalAttribute] {
        &self.logical_attributes
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn earliest(&self) -> i64 {
        self.earliest
    }

    pub fn latest(&self) -> i64 {
        self.latest
    }

    pub fn elapsed_time(&self) -> i64 {
        self.elapsed_time
    }

    pub fn granularity(&self) -> TimestampGranularity {
        self.granularity
    }

    pub fn event_sequence(&self) -> &EventSequence {
        &self.event_sequence
    }

    /// The record-type LCS applied to this record, if any.
    pub fn lcs(&self) -> Option<&EventSequence> {
        self.lcs.as_ref()
    }

    pub fn constrained_sequence(&self) -> &EventSequence {
        &self.constrained
    }

    pub fn unconstrained_sequence(&self) -> &EventSequence {
        &self.unconstrained
    }

    pub fn lcs_adhered(&self) -> bool {
        self.lcs_adhered
    }

    pub fn matches(&self) -> &[MatchAnnotation] {
        &self.matches
    }
}

/// Records a `class` match between records `a` and `b` on both of them.
///
/// Records are addressed by id, which equals their position in `records`.
pub fn link_records(records: &mut [Record], a: usize, b: usize, class: DuplicationClass) {
    if let Some(record) = records.get_mut(a) {
        record.add_match(b, class);
    }
    if let Some(record) = records.get_mut(b) {
        record.add_match(a, class);
    }
}
