//! Adaptive block boundary detection over blocking-key-sorted records.
//!
//! Accumulatively-adaptive SNM: a window grows while the blocking keys at
//! its two ends stay close, then retrenches and creeps until it straddles a
//! boundary between dissimilar keys.

use std::ops::Range;

use rapidfuzz::distance::levenshtein;

const INITIAL_WINDOW: usize = 2;
const GROWTH_FACTOR: usize = 2;

/// Normalized edit distance between the keys at `first` and `second`.
///
/// `levenshtein / max(len)` in characters. Two empty keys are identical;
/// an index past the end is maximally distant.
pub fn block_distance(keys: &[&str], first: usize, second: usize) -> f64 {
    let (Some(a), Some(b)) = (keys.get(first), keys.get(second)) else {
        return 1.0;
    };
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein::distance(a.chars(), b.chars()) as f64 / longest as f64
}

/// Start index of every comparison block over sorted `keys`.
///
/// Starts strictly increase from 0 and the blocks they define cover every
/// key exactly once. Empty input yields no blocks.
pub fn comparison_blocks(keys: &[&str], threshold: f64) -> Vec<usize> {
    let count = keys.len();
    let close = |first: usize, last: usize| block_distance(keys, first, last) <= threshold;

    let mut starts = Vec::new();
    let mut first = 0;
    let mut last = first + INITIAL_WINDOW - 1;

    while last <= count {
        starts.push(first);
        let mut size = INITIAL_WINDOW;

        // enlarge
        while close(first, last) {
            size *= GROWTH_FACTOR;
            first = last;
            last = first + size - 1;
        }

        // retrench
        while size > INITIAL_WINDOW {
            if close(first, last) {
                first = last;
                last = first + size - 1;
            } else {
                size /= GROWTH_FACTOR;
                last = first + size - 1;
            }
        }

        // creep
        while close(first, last) {
            first += 1;
            last += 1;
        }

        // the window now straddles a boundary; the block ends at `first`
        first += 1;
        last = first + INITIAL_WINDOW - 1;
    }

    starts
}

/// Half-open index range of each block given its start indices.
pub fn block_ranges(starts: &[usize], count: usize) -> Vec<Range<usize>> {
    starts
        .iter()
        .enumerate()
        .map(|(pos, &start)| start..starts.get(pos + 1).copied().unwrap_or(count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_normalized() {
        let keys = ["kitten", "sitting", "", ""];
        assert!((block_distance(&keys, 0, 1) - 3.0 / 7.0).abs() < 1e-12);
        assert_eq!(block_distance(&keys, 2, 3), 0.0);
        assert_eq!(block_distance(&keys, 0, 2), 1.0);
        assert_eq!(block_distance(&keys, 0, 9), 1.0);
    }

    #[test]
    fn dissimilar_tail_gets_its_own_block() {
        let keys = ["aaa", "aaa", "zzz"];
        let starts = comparison_blocks(&keys, 0.05);
        assert_eq!(starts, vec![0, 2]);
        assert_eq!(block_ranges(&starts, keys.len()), vec![0..2, 2..3]);
    }

    #[test]
    fn long_runs_are_one_block() {
        let keys = ["a", "a", "a", "a", "a", "a", "a", "b", "b", "c"];
        let starts = comparison_blocks(&keys, 0.05);
        assert_eq!(starts, vec![0, 7, 9]);
    }

    #[test]
    fn distinct_keys_are_singletons() {
        let keys = ["a", "b", "c"];
        assert_eq!(comparison_blocks(&keys, 0.05), vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(comparison_blocks(&[], 0.05).is_empty());
        assert!(block_ranges(&[], 0).is_empty());
    }
}
