//! Predicted duplicate record ids.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ordered set of record ids flagged as duplicates. Insertion is idempotent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictedDuplicates(BTreeSet<usize>);

impl PredictedDuplicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `id`, returning false when it was already present.
    pub fn insert(&mut self, id: usize) -> bool {
        self.0.insert(id)
    }

    pub fn insert_pair(&mut self, a: usize, b: usize) {
        self.0.insert(a);
        self.0.insert(b);
    }

    pub fn contains(&self, id: usize) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_set(&self) -> &BTreeSet<usize> {
        &self.0
    }
}

impl FromIterator<usize> for PredictedDuplicates {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<usize> for PredictedDuplicates {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
