use thiserror::Error;

/// Errors raised by the deduplication model and engine.
#[derive(Debug, Error)]
pub enum DedupError {
    /// A record id does not address a record of the dataset.
    #[error("record id {id} is out of range (dataset has {count} records)")]
    RecordOutOfRange { id: usize, count: usize },

    /// A similarity threshold outside `[0, 1]`.
    #[error("invalid similarity threshold {value}: expected a value within [0, 1]")]
    InvalidThreshold { value: f64 },

    /// A sampling parameter that can never yield a sample.
    #[error("invalid LCS sampling parameter: {0}")]
    InvalidSampling(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, DedupError>;
