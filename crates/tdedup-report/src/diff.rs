//! Per-column differences between two records.

use std::fmt;

use tdedup_model::Record;

/// One column where two records disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub column: usize,
    pub left_id: usize,
    pub left: String,
    pub right_id: usize,
    pub right: String,
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attribute#{}, ID:{} {}\tID:{} {}",
            self.column, self.left_id, self.left, self.right_id, self.right
        )
    }
}

/// Columns whose raw values differ; the shorter record reads as blank past
/// its end.
pub fn diff_records(left: &Record, right: &Record) -> Vec<FieldDiff> {
    let width = left.values().len().max(right.values().len());
    (0..width)
        .filter_map(|column| {
            let a = left.value(column).unwrap_or("");
            let b = right.value(column).unwrap_or("");
            (a != b).then(|| FieldDiff {
                column,
                left_id: left.id(),
                left: a.to_string(),
                right_id: right.id(),
                right: b.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_changed_and_missing_columns() {
        let a = Record::with_values(3, ["x", "y"]);
        let b = Record::with_values(8, ["x", "z", "w"]);
        let diffs = diff_records(&a, &b);

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].to_string(), "Attribute#1, ID:3 y\tID:8 z");
        assert_eq!(diffs[1].column, 2);
        assert_eq!(diffs[1].left, "");
        assert_eq!(diffs[1].right, "w");
    }

    #[test]
    fn identical_records_have_no_diffs() {
        let a = Record::with_values(0, ["x"]);
        assert!(diff_records(&a, &a.clone()).is_empty());
    }
}
