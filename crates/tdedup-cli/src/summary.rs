use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tdedup_core::{RecordTypeSource, SchemaInference};
use tdedup_model::{LcsSampling, SampleCap, Selection};

use crate::types::{EvaluationRound, InferResult, OptionsFile, RunResult};

pub fn print_infer_summary(result: &InferResult) {
    println!("Dataset: {}", result.dataset.display());
    println!(
        "Records: {}  Columns: {}",
        result.records,
        result.headers.len()
    );
    println!("{}", schema_table(&result.schema));
}

pub fn print_run_summary(result: &RunResult) {
    println!("Dataset: {}", result.dataset.display());
    println!(
        "Records: {}  Columns: {}",
        result.records.len(),
        result.headers.len()
    );
    println!("{}", parameters_table(&result.options));
    println!("{}", schema_table(&result.schema));
    println!("{}", timings_table(result));

    for record_type in &result.report.ignored_types {
        println!("Record type '{record_type}' has no usable LCS; its records were not constrained");
    }
    println!(
        "--- {} records did not adhere to LCS and {} records were flagged as duplicate for unconstrained order match",
        result.report.not_adhered,
        result.report.order_matched.len()
    );

    println!();
    println!("{}", confusion_table(&result.rounds));
    for round in &result.rounds {
        println!("{}", round.label);
        println!(
            "  False positives: {}",
            format_id_list(&round.assessment.false_positives)
        );
        println!(
            "  False negatives: {}",
            format_id_list(&round.assessment.false_negatives)
        );
    }

    if !result.outputs.is_empty() {
        println!();
        println!("Outputs:");
        for path in &result.outputs {
            println!("- {}", path.display());
        }
    }
}

fn parameters_table(options: &OptionsFile) -> Table {
    let dedup = &options.dedup;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Parameter"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("LCS sampling"),
        Cell::new(describe_sampling(&dedup.sampling)),
    ]);
    table.add_row(vec![
        Cell::new("Minimum unconstrained length"),
        Cell::new(dedup.min_unconstrained_length),
    ]);
    table.add_row(vec![
        Cell::new("Elapsed time policy"),
        Cell::new(format!("{:?}", dedup.elapsed_time_policy)),
    ]);
    table.add_row(vec![
        Cell::new("Blocking key"),
        Cell::new(options.asnm.blocking_key.as_deref().unwrap_or("-")),
    ]);
    table
}

fn schema_table(schema: &SchemaInference) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Schema"), header_cell("Inferred")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Key"), Cell::new(schema.key.to_string())]);

    let record_type = match &schema.record_type {
        RecordTypeSource::Column { name, index } => format!("[{name} @ index {index}]"),
        RecordTypeSource::Global => "global (no key)".to_string(),
    };
    table.add_row(vec![Cell::new("Record type"), Cell::new(record_type)]);

    let layout = &schema.layout;
    let logical = if layout.is_empty() {
        dim_cell("none")
    } else {
        let starts: Vec<String> = layout.starts.iter().map(ToString::to_string).collect();
        Cell::new(format!(
            "[{}] x{} at columns {}",
            schema.template_description(),
            layout.starts.len(),
            starts.join(", ")
        ))
    };
    table.add_row(vec![Cell::new("Logical attribute"), logical]);
    table
}

fn timings_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("ms")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for timing in &result.report.timings {
        table.add_row(vec![
            Cell::new(timing.stage),
            Cell::new(timing.duration.as_millis()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.report.total_duration().as_millis()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// One row per evaluation round with its counts and metrics.
pub fn confusion_table(rounds: &[EvaluationRound]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Method"),
        header_cell("Predicted"),
        header_cell("Actual"),
        header_cell("TP"),
        header_cell("FP"),
        header_cell("FN"),
        header_cell("TN"),
        header_cell("Precision"),
        header_cell("Recall"),
        header_cell("F1"),
        header_cell("MCC"),
        header_cell("ms"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..12 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for round in rounds {
        let assessment = &round.assessment;
        let counts = &assessment.counts;
        table.add_row(vec![
            Cell::new(&round.label).add_attribute(Attribute::Bold),
            Cell::new(assessment.predicted),
            Cell::new(assessment.actual),
            count_cell(counts.true_positives, Color::Green),
            count_cell(counts.false_positives, Color::Red),
            count_cell(counts.false_negatives, Color::Yellow),
            Cell::new(counts.true_negatives),
            metric_cell(assessment.precision),
            metric_cell(assessment.recall),
            metric_cell(assessment.f1),
            metric_cell(assessment.mcc),
            Cell::new(round.duration_ms),
        ]);
    }
    table
}

fn describe_sampling(sampling: &LcsSampling) -> String {
    let cap = match sampling.cap {
        SampleCap::Max => return "max-sampling".to_string(),
        SampleCap::Count(count) => format!("{count} per record type"),
    };
    match sampling.selection {
        Selection::EveryNth(1) => cap,
        Selection::EveryNth(n) => format!("{cap}, every nth (n = {n})"),
        Selection::Random { seed: Some(seed) } => format!("{cap}, random (seed {seed})"),
        Selection::Random { seed: None } => format!("{cap}, random"),
    }
}

/// Metric with four decimals; NaN renders as `undefined`.
pub fn format_metric(value: f64) -> String {
    if value.is_nan() {
        "undefined".to_string()
    } else {
        format!("{value:.4}")
    }
}

/// Space-separated ids, or `none`.
pub fn format_id_list(ids: &[usize]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn metric_cell(value: f64) -> Cell {
    if value.is_nan() {
        dim_cell(format_metric(value))
    } else {
        Cell::new(format_metric(value))
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_core::{Assessment, ConfusionCounts};

    fn round(label: &str, precision: f64) -> EvaluationRound {
        EvaluationRound {
            label: label.to_string(),
            assessment: Assessment {
                total_records: 10,
                actual: 2,
                predicted: 2,
                counts: ConfusionCounts {
                    true_positives: 1,
                    false_positives: 1,
                    false_negatives: 1,
                    true_negatives: 7,
                },
                precision,
                recall: 0.5,
                f1: 0.5,
                mcc: 0.375,
                false_positives: vec![7],
                false_negatives: vec![5],
            },
            duration_ms: 3,
        }
    }

    #[test]
    fn metrics_render_undefined_for_nan() {
        assert_eq!(format_metric(f64::NAN), "undefined");
        assert_eq!(format_metric(0.5), "0.5000");
    }

    #[test]
    fn id_lists_render_none_when_empty() {
        assert_eq!(format_id_list(&[]), "none");
        assert_eq!(format_id_list(&[3, 9]), "3 9");
    }

    #[test]
    fn confusion_table_has_a_row_per_round() {
        let table = confusion_table(&[round("TemporalDedup", 0.5), round("ASNM", f64::NAN)]);
        let rendered = table.to_string();
        assert!(rendered.contains("TemporalDedup"));
        assert!(rendered.contains("undefined"));
        assert!(rendered.contains("0.3750"));
    }

    #[test]
    fn sampling_descriptions() {
        assert_eq!(describe_sampling(&LcsSampling::max()), "max-sampling");
        let every = LcsSampling::default()
            .with_cap(SampleCap::Count(50))
            .with_selection(Selection::EveryNth(3));
        assert_eq!(describe_sampling(&every), "50 per record type, every nth (n = 3)");
    }
}
