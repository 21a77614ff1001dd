//! Tab-delimited dataset reading.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// A dataset as read from disk: its header row and raw data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Source file.
    pub path: PathBuf,
    /// Header names in column order.
    pub headers: Vec<String>,
    /// Data rows; rows may be shorter or longer than the header row.
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Build the tab-delimited reader shared by dataset and truth loading.
///
/// Quotes carry no meaning in these files and rows may be ragged.
pub(crate) fn tab_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    Ok(ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file))
}

fn to_values(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// Read a tab-delimited dataset whose first line is the header row.
///
/// Blank lines are skipped. Every remaining line becomes one row, in file
/// order, so row positions double as record ids.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = tab_reader(path)?;
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| IngestError::from_csv(path, e))?,
        None => {
            return Err(IngestError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }
    };
    let headers = to_values(&header);

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| IngestError::from_csv(path, e))?;
        if record.len() == 1 && record.get(0).is_some_and(|v| v.trim().is_empty()) {
            continue;
        }
        rows.push(to_values(&record));
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read dataset"
    );

    Ok(Dataset {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn reads_header_and_ragged_rows() {
        let file = write_temp("id\tname\tdate\n1\t\"quoted\tx\n2\n\n3\ta\t2020-01-01\n");
        let dataset = read_dataset(file.path()).expect("read dataset");

        assert_eq!(dataset.headers, vec!["id", "name", "date"]);
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.rows[0], vec!["1", "\"quoted", "x"]);
        assert_eq!(dataset.rows[1], vec!["2"]);
        assert_eq!(dataset.rows[2][2], "2020-01-01");
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_temp("");
        let err = read_dataset(file.path()).expect_err("empty dataset");
        assert!(matches!(err, IngestError::EmptyDataset { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_dataset(Path::new("/definitely/not/here.tsv")).expect_err("missing file");
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
