//! Analysis file: each record's derived fields followed by its raw values.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tdedup_model::Record;

use crate::common::{join_spaced, tab_writer};

/// Column titles preceding the raw headers, in output order.
pub const ANALYSIS_COLUMNS: [&str; 15] = [
    "ID",
    "Truth Data Duplicate",
    "# Matches",
    "Duplicate IDs",
    "Detected By Duplicate Class",
    "# Timestamps",
    "Earliest Timestamp",
    "Latest Timestamp",
    "Elapsed Time",
    "Record Type LCS",
    "LCS Length",
    "Event Sequence",
    "LCS Adherence",
    "Unconstrained Sequence",
    "Unconstrained Sequence Length",
];

/// Header row of the analysis file.
pub fn analysis_header(headers: &[String]) -> Vec<String> {
    ANALYSIS_COLUMNS
        .iter()
        .map(|title| (*title).to_string())
        .chain(headers.iter().cloned())
        .collect()
}

/// Analysis fields of one record, aligned with [`analysis_header`].
pub fn analysis_row(record: &Record) -> Vec<String> {
    let lcs = record.lcs();
    let mut row = vec![
        record.id().to_string(),
        record.is_truth_duplicate().to_string(),
        record.matches().len().to_string(),
        join_spaced(record.matches().iter().map(|m| m.record_id)),
        join_spaced(record.matches().iter().map(|m| m.class.code())),
        record.timestamp_count().to_string(),
        record.earliest().to_string(),
        record.latest().to_string(),
        record.elapsed_time().to_string(),
        lcs.map(ToString::to_string).unwrap_or_default(),
        lcs.map_or(0, |l| l.len()).to_string(),
        record.event_sequence().to_string(),
        record.lcs_adhered().to_string(),
        record.unconstrained_sequence().to_string(),
        record.unconstrained_sequence().len().to_string(),
    ];
    row.extend(record.values().iter().cloned());
    row
}

/// Write the analysis file for `records`.
pub fn write_analysis(path: &Path, headers: &[String], records: &[Record]) -> Result<()> {
    let mut writer = tab_writer(path)?;
    writer
        .write_record(analysis_header(headers))
        .with_context(|| format!("write header to {}", path.display()))?;
    for record in records {
        writer
            .write_record(analysis_row(record))
            .with_context(|| format!("write record {} to {}", record.id(), path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "analysis written");
    Ok(())
}
