//! Key and record-type inference from observed value cardinalities.

use std::collections::HashSet;

use serde::Serialize;

use tdedup_model::{KeyAttribute, Record};

/// Separator joining two column values into one composite key value.
const PAIR_SEPARATOR: &str = " :: ";

/// Where a record's type (temporal grouping value) comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordTypeSource {
    /// The value of this column.
    Column { name: String, index: usize },
    /// One global type shared by every record.
    Global,
}

fn distinct_values(records: &[Record], column: usize) -> usize {
    records
        .iter()
        .map(|record| record.value(column).unwrap_or(""))
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_pairs(records: &[Record], first: usize, second: usize) -> usize {
    records
        .iter()
        .map(|record| {
            format!(
                "{}{PAIR_SEPARATOR}{}",
                record.value(first).unwrap_or(""),
                record.value(second).unwrap_or("")
            )
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Infer the primary or candidate key among `eligible` columns.
///
/// A single column whose values are all distinct is the key. Failing that,
/// the first pair of columns whose combined values are all distinct is the
/// key. Otherwise the candidate with the most distinct values wins, singles
/// ranked ahead of pairs, so a pair must strictly beat the best single.
/// Earlier candidates win ties.
pub fn infer_key(headers: &[String], records: &[Record], eligible: &[usize]) -> KeyAttribute {
    let total = records.len();
    let name = |index: usize| headers.get(index).cloned().unwrap_or_default();

    let mut best_single: Option<(usize, usize)> = None;
    for &column in eligible {
        let distinct = distinct_values(records, column);
        if distinct == total {
            return KeyAttribute::single(name(column), column);
        }
        if best_single.is_none_or(|(_, best)| distinct > best) {
            best_single = Some((column, distinct));
        }
    }

    let mut best_pair: Option<(usize, usize, usize)> = None;
    for (pos, &first) in eligible.iter().enumerate() {
        for &second in &eligible[pos + 1..] {
            let distinct = distinct_pairs(records, first, second);
            if distinct == total {
                return KeyAttribute::pair(name(first), first, name(second), second);
            }
            if best_pair.is_none_or(|(_, _, best)| distinct > best) {
                best_pair = Some((first, second, distinct));
            }
        }
    }

    match (best_pair, best_single) {
        (Some((first, second, pair_count)), single)
            if single.is_none_or(|(_, single_count)| pair_count > single_count) =>
        {
            KeyAttribute::pair(name(first), first, name(second), second)
        }
        (_, Some((column, _))) => KeyAttribute::single(name(column), column),
        (_, None) => KeyAttribute::Empty,
    }
}

/// Infer which column supplies the record type.
///
/// A single-column key is itself the record type. Of a two-column key, the
/// column with fewer distinct values is used, the second one on a tie. With
/// no key every record shares one global type.
pub fn infer_record_type(key: &KeyAttribute, records: &[Record]) -> RecordTypeSource {
    match key {
        KeyAttribute::Empty => RecordTypeSource::Global,
        KeyAttribute::Single(column) => RecordTypeSource::Column {
            name: column.name.clone(),
            index: column.index,
        },
        KeyAttribute::Pair(first, second) => {
            let first_count = distinct_values(records, first.index);
            let chosen = if first_count < distinct_values(records, second.index) {
                first
            } else {
                second
            };
            RecordTypeSource::Column {
                name: chosen.name.clone(),
                index: chosen.index,
            }
        }
    }
}
