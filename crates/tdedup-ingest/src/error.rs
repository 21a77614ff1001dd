//! Error types for dataset and truth-file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse a tab-delimited row.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Dataset file has no header row.
    #[error("dataset file is empty: {path}")]
    EmptyDataset { path: PathBuf },

    /// A truth-file row whose first field is not a record id.
    #[error("invalid record id '{value}' on line {line} of {path}")]
    InvalidRecordId {
        path: PathBuf,
        line: u64,
        value: String,
    },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = err.kind()
            && io.kind() == std::io::ErrorKind::NotFound
        {
            return Self::FileNotFound {
                path: path.to_path_buf(),
            };
        }
        Self::Parse {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
