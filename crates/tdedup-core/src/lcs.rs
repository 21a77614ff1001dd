//! Longest common subsequence over event sequences, and scoring of a
//! record's sequence against its record-type LCS.

use tdedup_model::{EventSequence, LcsAssessment};

/// Longest common subsequence of `a` and `b`.
///
/// Standard O(m·n) table. During reconstruction, when skipping either
/// element would keep the same length, the element of `b` is skipped.
pub fn longest_common_subsequence<T: PartialEq + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let (m, n) = (a.len(), b.len());
    if m == 0 || n == 0 {
        return Vec::new();
    }

    let mut table = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut common = Vec::with_capacity(table[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            common.push(a[i - 1].clone());
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] > table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    common.reverse();
    common
}

/// LCS of two event sequences.
pub fn sequence_lcs(a: &EventSequence, b: &EventSequence) -> EventSequence {
    EventSequence::new(longest_common_subsequence(a.tokens(), b.tokens()))
}

/// Fold pairwise LCS across `sequences` in order.
///
/// A single sequence is its own LCS; an empty input has none.
pub fn fold_lcs<'a, I>(sequences: I) -> Option<EventSequence>
where
    I: IntoIterator<Item = &'a EventSequence>,
{
    let mut iter = sequences.into_iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |acc, next| sequence_lcs(&acc, next)))
}

/// Whether an LCS carries enough order information to be applied.
pub fn is_usable(lcs: &EventSequence) -> bool {
    lcs.len() > 1
}

/// Split `sequence` into the part that follows `lcs` and the residue.
///
/// Each token is matched against the LCS at or after the position following
/// the last match; matched tokens are constrained, the rest unconstrained.
/// The record adheres when no unconstrained token occurs in the LCS at all.
/// Without a usable LCS the whole sequence is unconstrained and the record
/// adheres trivially.
pub fn assess(sequence: &EventSequence, lcs: Option<&EventSequence>) -> LcsAssessment {
    let Some(lcs) = lcs.filter(|lcs| is_usable(lcs)) else {
        return LcsAssessment::unconstrained(sequence);
    };

    let pattern = lcs.tokens();
    let mut next = 0;
    let mut constrained = EventSequence::default();
    let mut unconstrained = EventSequence::default();

    for &token in sequence.tokens() {
        match pattern[next..].iter().position(|&p| p == token) {
            Some(offset) => {
                constrained.push(token);
                next += offset + 1;
            }
            None => unconstrained.push(token),
        }
    }

    let adhered = !unconstrained.tokens().iter().any(|&t| lcs.contains(t));
    LcsAssessment {
        lcs: Some(lcs.clone()),
        constrained,
        unconstrained,
        adhered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> EventSequence {
        s.parse().expect("valid sequence")
    }

    #[test]
    fn lcs_of_simple_sequences() {
        assert_eq!(sequence_lcs(&seq("1 2 3"), &seq("1 3")), seq("1 3"));
        assert_eq!(sequence_lcs(&seq("1 2 3 4"), &seq("2 4 3")), seq("2 4"));
        assert_eq!(sequence_lcs(&seq(""), &seq("1 2")), seq(""));
    }

    #[test]
    fn ties_skip_the_second_sequence_first() {
        // both [1] and [2] have maximal length; skipping in b first keeps 2
        assert_eq!(longest_common_subsequence(&[1, 2], &[2, 1]), vec![2]);
    }

    #[test]
    fn fold_over_samples() {
        let samples = [seq("0 1 2 3"), seq("0 1 3"), seq("1 2 3")];
        assert_eq!(fold_lcs(&samples), Some(seq("1 3")));
        assert_eq!(fold_lcs(&samples[..1]), Some(seq("0 1 2 3")));
        assert_eq!(fold_lcs(&Vec::<EventSequence>::new()), None);
    }

    #[test]
    fn assess_splits_constrained_and_unconstrained() {
        let lcs = seq("1 3");
        let result = assess(&seq("1 2 3"), Some(&lcs));
        assert_eq!(result.constrained, seq("1 3"));
        assert_eq!(result.unconstrained, seq("2"));
        assert!(result.adhered);
        assert_eq!(result.lcs, Some(lcs));
    }

    #[test]
    fn out_of_order_token_breaks_adherence() {
        let lcs = seq("0 1 2");
        let result = assess(&seq("0 2 1"), Some(&lcs));
        assert_eq!(result.constrained, seq("0 2"));
        assert_eq!(result.unconstrained, seq("1"));
        assert!(!result.adhered);
    }

    #[test]
    fn short_or_missing_lcs_is_ignored() {
        let sequence = seq("4 5 6");
        for lcs in [None, Some(seq("5")), Some(seq(""))] {
            let result = assess(&sequence, lcs.as_ref());
            assert_eq!(result.unconstrained, sequence);
            assert!(result.constrained.is_empty());
            assert!(result.adhered);
            assert_eq!(result.lcs, None);
        }
    }
}
