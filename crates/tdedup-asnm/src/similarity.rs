//! Record similarity as the Jaccard index of per-record integer sets.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tdedup_model::{Record, TimestampGranularity};

/// Integer representation of every raw value of a record.
///
/// Columns backing an exact-granularity timestamp contribute the resolved
/// timestamp, `true`/`false` (any case) contribute 1/0, and every other
/// value contributes a hash of its text.
pub fn integer_set(record: &Record) -> HashSet<i64> {
    let exact_timestamps: Vec<(usize, i64)> = record
        .logical_attributes()
        .iter()
        .filter(|attribute| attribute.granularity() == TimestampGranularity::Exact)
        .filter_map(|attribute| {
            attribute
                .timestamp_column()
                .map(|column| (column, attribute.timestamp()))
        })
        .collect();

    record
        .values()
        .iter()
        .enumerate()
        .map(|(column, value)| {
            if let Some(&(_, timestamp)) = exact_timestamps.iter().find(|(c, _)| *c == column) {
                timestamp
            } else if value.eq_ignore_ascii_case("true") {
                1
            } else if value.eq_ignore_ascii_case("false") {
                0
            } else {
                text_hash(value)
            }
        })
        .collect()
}

fn text_hash(value: &str) -> i64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as i64
}

/// `|a ∩ b| / |a ∪ b|`; 0 when both sets are empty.
pub fn jaccard(a: &HashSet<i64>, b: &HashSet<i64>) -> f64 {
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_model::LogicalAttribute;

    fn set(values: &[i64]) -> HashSet<i64> {
        values.iter().copied().collect()
    }

    #[test]
    fn jaccard_index() {
        assert_eq!(jaccard(&set(&[1, 2, 3]), &set(&[2, 3, 4])), 0.5);
        assert_eq!(jaccard(&set(&[1]), &set(&[1])), 1.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
    }

    #[test]
    fn booleans_and_exact_timestamps_map_to_integers() {
        let mut record = Record::new(0);
        for value in ["TRUE", "false", "1500"] {
            record.push_value(value);
        }
        let mut attribute = LogicalAttribute::new(0);
        attribute.push_value("1500");
        attribute.offer_timestamp(1500, TimestampGranularity::Exact, 2);
        record.push_logical_attribute(attribute);
        record.finish_read();

        assert_eq!(integer_set(&record), set(&[1, 0, 1500]));
    }

    #[test]
    fn equal_text_hashes_equally() {
        let a = Record::with_values(0, ["x", "y"]);
        let b = Record::with_values(1, ["y", "x"]);
        assert_eq!(integer_set(&a), integer_set(&b));
    }
}
