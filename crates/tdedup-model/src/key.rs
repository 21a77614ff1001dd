//! Key attribute descriptor (zero, one, or two columns).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A column participating in the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyColumn {
    pub name: String,
    pub index: usize,
}

impl KeyColumn {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// The dataset's primary or candidate key.
///
/// Established once by key inference and shared read-only by every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAttribute {
    /// No key could be established.
    #[default]
    Empty,
    Single(KeyColumn),
    Pair(KeyColumn, KeyColumn),
}

impl KeyAttribute {
    pub fn single(name: impl Into<String>, index: usize) -> Self {
        Self::Single(KeyColumn::new(name, index))
    }

    pub fn pair(
        first: impl Into<String>,
        first_index: usize,
        second: impl Into<String>,
        second_index: usize,
    ) -> Self {
        Self::Pair(
            KeyColumn::new(first, first_index),
            KeyColumn::new(second, second_index),
        )
    }

    /// Number of key columns (0, 1, or 2).
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Pair(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn columns(&self) -> Vec<&KeyColumn> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(column) => vec![column],
            Self::Pair(first, second) => vec![first, second],
        }
    }

    pub fn contains_index(&self, index: usize) -> bool {
        self.columns().iter().any(|column| column.index == index)
    }

    /// Extracts this key's values from a record's raw values.
    ///
    /// Columns missing from a short row read as blank.
    pub fn extract(&self, values: &[String]) -> Vec<String> {
        self.columns()
            .iter()
            .map(|column| values.get(column.index).cloned().unwrap_or_default())
            .collect()
    }
}

impl fmt::Display for KeyAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no key attributes established"),
            Self::Single(column) => write!(f, "[{} @ index {}]", column.name, column.index),
            Self::Pair(first, second) => write!(
                f,
                "[{} @ index {}], [{} @ index {}]",
                first.name, first.index, second.name, second.index
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn extracts_pair_values_in_key_order() {
        let key = KeyAttribute::pair("user", 2, "game", 0);
        assert_eq!(key.extract(&row(&["g1", "x", "u1"])), vec!["u1", "g1"]);
        assert!(key.contains_index(0));
        assert!(!key.contains_index(1));
    }

    #[test]
    fn missing_columns_extract_blank() {
        let key = KeyAttribute::single("id", 5);
        assert_eq!(key.extract(&row(&["a"])), vec![String::new()]);
    }

    #[test]
    fn display_lists_columns() {
        let key = KeyAttribute::pair("a", 0, "b", 3);
        assert_eq!(key.to_string(), "[a @ index 0], [b @ index 3]");
        assert_eq!(KeyAttribute::Empty.len(), 0);
    }
}
