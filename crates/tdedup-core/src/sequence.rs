//! Temporal sequence modeling: a representative event order per record type.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use tdedup_model::{EventSequence, Record, ResolvedSampling, Selection};

use crate::lcs;

/// Decides which submitted sequences become samples.
#[derive(Debug)]
pub struct Sampler {
    selection: Selection,
    rng: Option<StdRng>,
}

impl Sampler {
    pub fn new(selection: Selection) -> Self {
        let rng = match selection {
            Selection::Random { seed: Some(seed) } => Some(StdRng::seed_from_u64(seed)),
            Selection::Random { seed: None } => Some(StdRng::from_entropy()),
            Selection::EveryNth(_) => None,
        };
        Self { selection, rng }
    }

    /// Whether the submission numbered `submission` (from 0) is taken.
    pub fn take(&mut self, submission: usize) -> bool {
        match (self.selection, self.rng.as_mut()) {
            (Selection::Random { .. }, Some(rng)) => rng.gen_bool(0.5),
            (Selection::EveryNth(n), _) => n > 0 && submission % n == 0,
            (Selection::Random { .. }, None) => false,
        }
    }
}

/// Sampled event sequences of one record type and their running LCS.
#[derive(Debug, Clone)]
pub struct RecordTypeSequence {
    record_type: String,
    samples: Vec<EventSequence>,
    submissions: usize,
    cap: usize,
}

impl RecordTypeSequence {
    pub fn new(record_type: impl Into<String>, cap: usize) -> Self {
        Self {
            record_type: record_type.into(),
            samples: Vec::new(),
            submissions: 0,
            cap,
        }
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Offer a sequence; ignored once the sample cap has been reached.
    pub fn submit(&mut self, sequence: &EventSequence, sampler: &mut Sampler) {
        if !self.is_complete() && sampler.take(self.submissions) {
            self.samples.push(sequence.clone());
        }
        self.submissions += 1;
    }

    pub fn is_complete(&self) -> bool {
        self.samples.len() >= self.cap
    }

    pub fn samples(&self) -> &[EventSequence] {
        &self.samples
    }

    /// LCS folded across the samples in submission order.
    pub fn lcs(&self) -> Option<EventSequence> {
        lcs::fold_lcs(&self.samples)
    }
}

/// Representative LCS per record type.
pub type SequenceModel = BTreeMap<String, Option<EventSequence>>;

/// Build the record-type LCS model.
///
/// Records already flagged as duplicates are skipped. Fully timestamped
/// records feed the primary pool; records with some timestamps feed a
/// contingency pool that is used only for record types absent from the
/// primary pool.
pub fn build_model(records: &[Record], sampling: ResolvedSampling) -> SequenceModel {
    let mut sampler = Sampler::new(sampling.selection);
    let mut primary: BTreeMap<&str, RecordTypeSequence> = BTreeMap::new();
    let mut contingency: BTreeMap<&str, RecordTypeSequence> = BTreeMap::new();

    for record in records.iter().filter(|r| !r.has_known_duplicate()) {
        let pool = if record.all_timestamped() {
            &mut primary
        } else if record.any_timestamped() {
            &mut contingency
        } else {
            continue;
        };
        pool.entry(record.record_type())
            .or_insert_with(|| RecordTypeSequence::new(record.record_type(), sampling.cap))
            .submit(record.event_sequence(), &mut sampler);
    }

    for (record_type, sequence) in contingency {
        if !primary.contains_key(record_type) {
            debug!(record_type, "using contingency sequences");
            primary.insert(record_type, sequence);
        }
    }

    primary
        .into_iter()
        .map(|(record_type, sequence)| {
            debug!(
                record_type,
                samples = sequence.samples().len(),
                "record type sequence sampled"
            );
            (record_type.to_string(), sequence.lcs())
        })
        .collect()
}

/// Outcome of applying the model to every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcsApplication {
    /// Records with an unconstrained token that also occurs in their LCS.
    pub not_adhered: usize,
    /// Record types whose LCS was missing or too short to apply.
    pub ignored_types: BTreeSet<String>,
}

/// Score every record against its record type's LCS.
///
/// A missing or single-token LCS is reported once per record type and the
/// affected records are treated as adherent.
pub fn apply_model(records: &mut [Record], model: &SequenceModel) -> LcsApplication {
    let mut outcome = LcsApplication::default();

    for record in records.iter_mut() {
        let type_lcs = model.get(record.record_type()).and_then(Option::as_ref);
        let usable = type_lcs.filter(|candidate| lcs::is_usable(candidate));
        if usable.is_none() && !outcome.ignored_types.contains(record.record_type()) {
            match type_lcs {
                None => warn!(
                    record_type = record.record_type(),
                    "no LCS acquired for record type"
                ),
                Some(short) => warn!(
                    record_type = record.record_type(),
                    length = short.len(),
                    "ignoring LCS shorter than two events"
                ),
            }
            outcome.ignored_types.insert(record.record_type().to_string());
        }

        let assessment = lcs::assess(record.event_sequence(), usable);
        if !assessment.adhered {
            outcome.not_adhered += 1;
        }
        record.apply_lcs(assessment);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_model::{DuplicationClass, LogicalAttribute, TimestampGranularity};

    fn record(id: usize, kind: &str, stamps: &[i64]) -> Record {
        let mut record = Record::new(id);
        record.push_value(kind);
        for (relative, &ts) in stamps.iter().enumerate() {
            let mut attr = LogicalAttribute::new(relative);
            attr.offer_timestamp(ts, TimestampGranularity::Exact, relative + 1);
            record.push_logical_attribute(attr);
        }
        record.finish_read();
        record.apply_record_type(0);
        record
    }

    fn every(cap: usize, n: usize) -> ResolvedSampling {
        ResolvedSampling {
            cap,
            selection: Selection::EveryNth(n),
        }
    }

    #[test]
    fn every_nth_sampling_stops_at_cap() {
        let mut sampler = Sampler::new(Selection::EveryNth(2));
        let mut sequence = RecordTypeSequence::new("g", 2);
        for i in 0..10 {
            sequence.submit(&EventSequence::new(vec![i]), &mut sampler);
        }
        assert!(sequence.is_complete());
        assert_eq!(
            sequence.samples(),
            &[EventSequence::new(vec![0]), EventSequence::new(vec![2])]
        );
    }

    #[test]
    fn seeded_random_sampling_is_reproducible() {
        let take = |seed| {
            let mut sampler = Sampler::new(Selection::Random { seed: Some(seed) });
            (0..64).map(|i| sampler.take(i)).collect::<Vec<_>>()
        };
        assert_eq!(take(7), take(7));
        assert!(take(7).iter().any(|&t| t));
    }

    #[test]
    fn model_uses_primary_pool_and_promotes_contingency() {
        let records = vec![
            record(0, "a", &[10, 20, 30]),
            record(1, "a", &[10, 30, 20]),
            record(2, "b", &[10, 0, 30]),
            record(3, "b", &[5, 0, 1]),
            record(4, "c", &[0, 0]),
        ];
        let model = build_model(&records, every(10, 1));

        assert_eq!(model.get("a"), Some(&Some("0 2".parse().expect("seq"))));
        // "b" has no fully timestamped record; contingency "0 2" and "2 0"
        assert_eq!(model.get("b").map(|l| l.as_ref().map(EventSequence::len)), Some(Some(1)));
        assert!(!model.contains_key("c"));
    }

    #[test]
    fn flagged_duplicates_are_not_sampled() {
        let mut records = vec![record(0, "a", &[1, 2, 3]), record(1, "a", &[3, 2, 1])];
        records[1].add_match(0, DuplicationClass::ModifiedValues);
        let model = build_model(&records, every(10, 1));
        assert_eq!(model.get("a"), Some(&Some("0 1 2".parse().expect("seq"))));
    }

    #[test]
    fn apply_reports_ignored_types_once() {
        let mut records = vec![
            record(0, "a", &[1, 2, 3]),
            record(1, "a", &[1, 3, 2]),
            record(2, "z", &[1, 2]),
            record(3, "z", &[2, 1]),
        ];
        let mut model = SequenceModel::new();
        model.insert("a".to_string(), Some("0 1 2".parse().expect("seq")));
        let outcome = apply_model(&mut records, &model);

        assert_eq!(outcome.not_adhered, 1);
        assert_eq!(outcome.ignored_types.len(), 1);
        assert!(outcome.ignored_types.contains("z"));
        assert_eq!(records[1].unconstrained_sequence().to_string(), "1");
        assert_eq!(records[3].unconstrained_sequence().to_string(), "1 0");
        assert!(records[3].lcs_adhered());
    }
}
