//! Base match engine: exact, non-key, modified-value, and elapsed-time matches.

use rayon::prelude::*;

use tdedup_model::{
    DuplicationClass, ElapsedTimePolicy, PredictedDuplicates, Record, link_records,
};

/// A classified record pair, `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PairMatch {
    pub first: usize,
    pub second: usize,
    pub class: DuplicationClass,
}

/// Classify one pair, checking the base classes in priority order.
pub fn classify_pair(
    review: &Record,
    candidate: &Record,
    policy: ElapsedTimePolicy,
) -> Option<DuplicationClass> {
    if review.exact_match(candidate) {
        Some(DuplicationClass::Exact)
    } else if review.equals_ignoring_key(candidate) {
        Some(DuplicationClass::NonKey)
    } else if review.shares_same_key(candidate) {
        Some(DuplicationClass::ModifiedValues)
    } else if elapsed_time_match(review, candidate, policy) {
        Some(DuplicationClass::ElapsedTime)
    } else {
        None
    }
}

/// Both records span the same positive elapsed time within the same record
/// type, at a shared granularity the policy trusts.
fn elapsed_time_match(review: &Record, candidate: &Record, policy: ElapsedTimePolicy) -> bool {
    review.elapsed_time() > 0
        && review.elapsed_time() == candidate.elapsed_time()
        && review.granularity() == candidate.granularity()
        && policy.trusts(review.granularity())
        && review.record_type() == candidate.record_type()
}

/// Evaluate every pair `(i, j)`, `j > i`, with `classify`.
///
/// Rows are split across the rayon pool; each worker buffers its matches
/// and the combined result is returned in ascending `(i, j)` order.
pub fn scan_pairs<F>(records: &[Record], classify: F) -> Vec<PairMatch>
where
    F: Fn(&Record, &Record) -> Option<DuplicationClass> + Sync,
{
    let mut matches: Vec<PairMatch> = (0..records.len())
        .into_par_iter()
        .fold(Vec::new, |mut buffer, first| {
            let review = &records[first];
            for (offset, candidate) in records[first + 1..].iter().enumerate() {
                if let Some(class) = classify(review, candidate) {
                    buffer.push(PairMatch {
                        first,
                        second: first + 1 + offset,
                        class,
                    });
                }
            }
            buffer
        })
        .flatten()
        .collect();
    matches.sort_unstable();
    matches
}

/// Annotate both records of each match and register them as predicted.
pub fn apply_matches(
    records: &mut [Record],
    matches: &[PairMatch],
    predicted: &mut PredictedDuplicates,
) {
    for m in matches {
        link_records(records, m.first, m.second, m.class);
        predicted.insert_pair(records[m.first].id(), records[m.second].id());
    }
}

/// Run the base techniques over all record pairs.
///
/// Returns the matches applied, in pair order.
pub fn apply_base_techniques(
    records: &mut [Record],
    policy: ElapsedTimePolicy,
    predicted: &mut PredictedDuplicates,
) -> Vec<PairMatch> {
    let matches = scan_pairs(records, |review, candidate| {
        classify_pair(review, candidate, policy)
    });
    apply_matches(records, &matches, predicted);
    matches
}
