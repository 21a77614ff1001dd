//! Truth-file reading.

use std::path::Path;

use tracing::debug;

use crate::dataset::tab_reader;
use crate::error::{IngestError, Result};

/// Read the ids of records known to be duplicates.
///
/// The file is tab-delimited with a header row; the first field of every
/// non-blank row is a record id. Ids are returned in file order, repeats
/// included.
pub fn read_truth_ids(path: &Path) -> Result<Vec<usize>> {
    let mut reader = tab_reader(path)?;
    let mut ids = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IngestError::from_csv(path, e))?;
        if row == 0 {
            continue;
        }
        let Some(value) = record.get(0).map(str::trim) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        let line = record
            .position()
            .map_or(row as u64 + 1, |position| position.line());
        let id = value
            .parse::<usize>()
            .map_err(|_| IngestError::InvalidRecordId {
                path: path.to_path_buf(),
                line,
                value: value.to_string(),
            })?;
        ids.push(id);
    }

    debug!(path = %path.display(), ids = ids.len(), "read truth ids");
    Ok(ids)
}
