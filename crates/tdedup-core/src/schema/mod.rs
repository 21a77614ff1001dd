//! Schema inference: logical attributes, key, and record type.
//!
//! Everything is derived from the header row and the observed values; no
//! domain configuration is needed.

mod key;
mod layout;

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, info_span};

use tdedup_model::{KeyAttribute, Record};

pub use key::{RecordTypeSource, infer_key, infer_record_type};
pub use layout::{LogicalLayout, is_temporal_header, longest_repeated_temporal_span};

/// Outcome of schema inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInference {
    pub layout: LogicalLayout,
    pub key: Arc<KeyAttribute>,
    pub record_type: RecordTypeSource,
}

impl SchemaInference {
    /// Human-readable logical-attribute template, e.g. `level, timestamp`.
    pub fn template_description(&self) -> String {
        self.layout.template.join(", ")
    }
}

/// Records built from a dataset together with the inferred schema.
#[derive(Debug, Clone)]
pub struct InferredDataset {
    pub schema: SchemaInference,
    pub records: Vec<Record>,
}

/// Infer the schema of a dataset and build its records.
///
/// Record ids follow row order starting at 0. Each record gets the shared
/// key descriptor and its record type applied.
pub fn infer(headers: &[String], rows: &[Vec<String>]) -> InferredDataset {
    let span = info_span!("schema_inference", columns = headers.len(), rows = rows.len());
    let _guard = span.enter();
    let start = Instant::now();

    let layout = LogicalLayout::infer(headers);
    if layout.is_empty() {
        info!("no repeating temporal attribute group found");
    } else {
        info!(
            width = layout.width(),
            instances = layout.starts.len(),
            template = %layout.template.join(", "),
            "logical attribute inferred"
        );
    }

    let mut records: Vec<Record> = rows
        .iter()
        .enumerate()
        .map(|(id, row)| layout.build_record(id, headers, row))
        .collect();

    let eligible = layout.scalar_columns(headers.len());
    let key = Arc::new(infer_key(headers, &records, &eligible));
    info!(key = %key, "primary key inferred");

    let record_type = infer_record_type(&key, &records);
    match &record_type {
        RecordTypeSource::Column { name, index } => {
            info!(column = %name, index, "record type inferred");
        }
        RecordTypeSource::Global => {
            info!("no key established; all records share the global record type");
        }
    }

    for record in &mut records {
        record.apply_key(Arc::clone(&key));
        match &record_type {
            RecordTypeSource::Column { index, .. } => record.apply_record_type(*index),
            RecordTypeSource::Global => record.apply_global_record_type(),
        }
    }

    info!(
        records = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "schema inference complete"
    );

    InferredDataset {
        schema: SchemaInference {
            layout,
            key,
            record_type,
        },
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_model::GLOBAL_RECORD_TYPE;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn infers_full_schema() {
        let headers = strings(&["user", "game", "lvl", "timestamp", "lvl", "timestamp"]);
        let rows = vec![
            strings(&["u1", "g1", "a", "100", "b", "200"]),
            strings(&["u1", "g2", "a", "150", "b", "120"]),
            strings(&["u2", "g1", "a", "300", "b", "400"]),
        ];
        let dataset = infer(&headers, &rows);

        assert_eq!(dataset.schema.layout.starts, vec![2, 4]);
        assert_eq!(dataset.schema.template_description(), "lvl, timestamp");
        assert_eq!(*dataset.schema.key, KeyAttribute::pair("user", 0, "game", 1));
        // user: 2 distinct, game: 2 distinct -> tie goes to game
        assert_eq!(dataset.records[0].record_type(), "g1");
        assert_eq!(dataset.records[1].event_sequence().to_string(), "1 0");
        assert_eq!(dataset.records[2].key_values(), &["u2", "g1"]);
    }

    #[test]
    fn keyless_dataset_uses_global_record_type() {
        let headers = strings(&["time", "time"]);
        let rows = vec![strings(&["10:00:00", "11:00:00"])];
        let dataset = infer(&headers, &rows);
        assert_eq!(dataset.schema.record_type, RecordTypeSource::Global);
        assert!(dataset.schema.key.is_empty());
        assert_eq!(dataset.records[0].record_type(), GLOBAL_RECORD_TYPE);
        assert_eq!(dataset.records[0].elapsed_time(), 3600);
    }
}
