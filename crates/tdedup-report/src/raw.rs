//! Raw echo of the dataset as the records hold it.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tdedup_model::Record;

use crate::common::tab_writer;

/// Write the header row and every record's raw values.
///
/// With `with_ids` each row is prefixed by the record id and the header by
/// an `ID` column.
pub fn write_raw_records(
    path: &Path,
    headers: &[String],
    records: &[Record],
    with_ids: bool,
) -> Result<()> {
    let mut writer = tab_writer(path)?;

    let id_column = with_ids.then(|| "ID".to_string());
    writer
        .write_record(id_column.iter().chain(headers))
        .with_context(|| format!("write header to {}", path.display()))?;

    for record in records {
        let id = with_ids.then(|| record.id().to_string());
        writer
            .write_record(id.iter().chain(record.values()))
            .with_context(|| format!("write record {} to {}", record.id(), path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), with_ids, "raw records written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_with_and_without_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let headers = vec!["a".to_string(), "b".to_string()];
        let records = vec![
            Record::with_values(0, ["1", "x"]),
            Record::with_values(1, ["2"]),
        ];

        let plain = dir.path().join("plain.tsv");
        write_raw_records(&plain, &headers, &records, false).expect("write");
        assert_eq!(
            std::fs::read_to_string(&plain).expect("read"),
            "a\tb\n1\tx\n2\n"
        );

        let with_ids = dir.path().join("ids.tsv");
        write_raw_records(&with_ids, &headers, &records, true).expect("write");
        assert_eq!(
            std::fs::read_to_string(&with_ids).expect("read"),
            "ID\ta\tb\n0\t1\tx\n1\t2\n"
        );
    }
}
