//! Event sequences: logical-attribute relative indices in timestamp order.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ordered sequence of logical-attribute relative indices.
///
/// Rendered as space-delimited tokens (`"0 2 1"`), which is also the form
/// accepted by [`FromStr`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventSequence(Vec<usize>);

impl EventSequence {
    pub fn new(tokens: Vec<usize>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: usize) -> bool {
        self.0.contains(&token)
    }

    pub fn push(&mut self, token: usize) {
        self.0.push(token);
    }
}

impl From<Vec<usize>> for EventSequence {
    fn from(tokens: Vec<usize>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<usize> for EventSequence {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for EventSequence {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for EventSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, token) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Result of scoring one record's event sequence against its record-type LCS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsAssessment {
    /// The record-type LCS that was applied; `None` when absent or ignored.
    pub lcs: Option<EventSequence>,
    /// Tokens matched, in order, against the LCS.
    pub constrained: EventSequence,
    /// Tokens left over after matching.
    pub unconstrained: EventSequence,
    /// False when an unconstrained token also appears in the LCS.
    pub adhered: bool,
}

impl LcsAssessment {
    /// Assessment for a record whose type has no usable LCS: the whole
    /// sequence is unconstrained and the record trivially adheres.
    pub fn unconstrained(sequence: &EventSequence) -> Self {
        Self {
            lcs: None,
            constrained: EventSequence::default(),
            unconstrained: sequence.clone(),
            adhered: true,
        }
    }
}
