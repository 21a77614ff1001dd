//! Unconstrained-order match: duplicates that share the part of their event
//! order not explained by the record-type LCS.

use std::collections::BTreeSet;

use tdedup_model::{DuplicationClass, PredictedDuplicates, Record};

use crate::matching::{PairMatch, apply_matches, scan_pairs};

/// Whether `review` and `candidate` form an unconstrained-order match.
///
/// Pairs already matched by an earlier stage are never re-classified.
pub fn is_order_match(review: &Record, candidate: &Record, min_length: usize) -> bool {
    !review.contains_match(candidate.id())
        && review.record_type() == candidate.record_type()
        && review.unconstrained_sequence().len() >= min_length
        && review.unconstrained_sequence() == candidate.unconstrained_sequence()
}

/// Flag every unconstrained-order match and return the ids of the records
/// flagged by this stage.
pub fn apply_order_match(
    records: &mut [Record],
    min_length: usize,
    predicted: &mut PredictedDuplicates,
) -> BTreeSet<usize> {
    let matches: Vec<PairMatch> = scan_pairs(records, |review, candidate| {
        is_order_match(review, candidate, min_length)
            .then_some(DuplicationClass::UnconstrainedOrder)
    });
    apply_matches(records, &matches, predicted);

    matches
        .iter()
        .flat_map(|m| [records[m.first].id(), records[m.second].id()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_model::{EventSequence, LcsAssessment};

    fn with_residue(id: usize, kind: &str, residue: &str) -> Record {
        let mut record = Record::with_values(id, [kind.to_string(), format!("v{id}")]);
        record.apply_record_type(0);
        let sequence: EventSequence = residue.parse().expect("sequence");
        record.apply_lcs(LcsAssessment::unconstrained(&sequence));
        record
    }

    #[test]
    fn equal_long_residues_match() {
        let mut records = vec![
            with_residue(0, "g", "3 1 4 1 5"),
            with_residue(1, "g", "3 1 4 1 5"),
            with_residue(2, "h", "3 1 4 1 5"),
            with_residue(3, "g", "3 1 4"),
        ];
        let mut predicted = PredictedDuplicates::new();
        let flagged = apply_order_match(&mut records, 3, &mut predicted);

        assert_eq!(flagged.into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert!(records[1].contains_match(0));
        assert_eq!(
            records[0].matches()[0].class,
            DuplicationClass::UnconstrainedOrder
        );
        assert!(!records[3].has_known_duplicate());
    }

    #[test]
    fn short_residues_and_prior_matches_are_skipped() {
        let mut records = vec![
            with_residue(0, "g", "1 2"),
            with_residue(1, "g", "1 2"),
            with_residue(2, "g", "7 8 9"),
            with_residue(3, "g", "7 8 9"),
        ];
        records[2].add_match(3, DuplicationClass::ElapsedTime);
        records[3].add_match(2, DuplicationClass::ElapsedTime);
        let mut predicted = PredictedDuplicates::new();
        let flagged = apply_order_match(&mut records, 3, &mut predicted);

        assert!(flagged.is_empty());
        assert!(predicted.is_empty());
        assert_eq!(records[2].matches().len(), 1);
    }
}
