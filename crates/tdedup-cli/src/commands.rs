use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tdedup_asnm::{Asnm, ComparisonMethod};
use tdedup_core::{ConfusionMatrix, InferredDataset, infer, run_dedup};
use tdedup_ingest::{Dataset, read_dataset, read_truth_ids};
use tdedup_model::{ElapsedTimePolicy, Record, SampleCap, Selection};
use tdedup_report::{OutputPaths, write_analysis, write_raw_records};

use crate::cli::{InferArgs, RunArgs};
use crate::types::{EvaluationRound, InferResult, OptionsFile, RunResult};

/// Label of the temporal pipeline's evaluation round.
pub const PIPELINE_LABEL: &str = "TemporalDedup";

/// Options file contents with explicit flags applied on top.
pub fn resolve_options(args: &RunArgs) -> Result<OptionsFile> {
    let mut options = match &args.options {
        Some(path) => OptionsFile::load(path)?,
        None => OptionsFile::default(),
    };

    let sampling = &mut options.dedup.sampling;
    if args.lcs_max {
        sampling.cap = SampleCap::Max;
    }
    if let Some(count) = args.lcs_samples {
        sampling.cap = SampleCap::Count(count);
    }
    if args.lcs_random {
        sampling.selection = Selection::Random {
            seed: args.lcs_seed,
        };
    }
    if let Some(every) = args.lcs_every {
        sampling.selection = Selection::EveryNth(every);
    }
    if let Some(length) = args.min_seq_length {
        options.dedup.min_unconstrained_length = length;
    }
    if args.force_elapsed_time {
        options.dedup.elapsed_time_policy = ElapsedTimePolicy::Always;
    }

    if let Some(words) = args.compare.as_ref().filter(|words| !words.is_empty()) {
        options.asnm = options.asnm.with_blocking_key(words.join(" "));
    }
    if !args.thresholds.is_empty() {
        options.asnm.thresholds.clone_from(&args.thresholds);
    }

    options.dedup.validate().context("invalid deduplication options")?;
    options.asnm.validate().context("invalid comparison options")?;
    Ok(options)
}

pub fn run_infer(args: &InferArgs) -> Result<InferResult> {
    let dataset = load_dataset(&args.dataset)?;
    let InferredDataset { schema, records } = infer(&dataset.headers, &dataset.rows);
    Ok(InferResult {
        dataset: args.dataset.clone(),
        headers: dataset.headers,
        records: records.len(),
        schema,
    })
}

pub fn run(args: &RunArgs) -> Result<RunResult> {
    let run_span = info_span!("run", dataset = %args.dataset.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let options = resolve_options(args)?;

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let dataset = load_dataset(&args.dataset)?;
    let truth = read_truth_ids(&args.truth)
        .with_context(|| format!("read truth file {}", args.truth.display()))?;

    // =========================================================================
    // Stage 2: Schema inference
    // =========================================================================
    let InferredDataset {
        schema,
        mut records,
    } = infer(&dataset.headers, &dataset.rows);
    let matrix = ConfusionMatrix::new(&truth, &mut records).context("load truth data")?;

    // =========================================================================
    // Stage 3: Temporal pipeline
    // =========================================================================
    let report = run_dedup(&mut records, &options.dedup).context("run deduplication")?;
    let mut rounds = vec![EvaluationRound {
        label: PIPELINE_LABEL.to_string(),
        assessment: matrix
            .assess(&report.predicted)
            .context("assess deduplication")?,
        duration_ms: report.total_duration().as_millis(),
    }];

    // =========================================================================
    // Stage 4: Comparison baseline
    // =========================================================================
    let comparisons = if args.compare.is_some() {
        let asnm = Asnm::new(options.asnm.clone()).context("configure ASNM")?;
        let predictions = asnm
            .compare(&dataset.headers, &records)
            .context("run ASNM comparison")?;
        for prediction in &predictions {
            rounds.push(EvaluationRound {
                label: prediction.label.clone(),
                assessment: matrix
                    .assess(&prediction.predicted)
                    .with_context(|| format!("assess {}", prediction.label))?,
                duration_ms: prediction.duration.as_millis(),
            });
        }
        predictions
    } else {
        Vec::new()
    };

    // =========================================================================
    // Stage 5: Output
    // =========================================================================
    let outputs = write_outputs(args, &dataset, &records)?;

    info!(
        records = records.len(),
        predicted = report.predicted.len(),
        rounds = rounds.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunResult {
        dataset: args.dataset.clone(),
        headers: dataset.headers,
        schema,
        options,
        records,
        report,
        rounds,
        comparisons,
        outputs,
    })
}

fn load_dataset(path: &std::path::Path) -> Result<Dataset> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let dataset =
        read_dataset(path).with_context(|| format!("read dataset {}", path.display()))?;
    info!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        duration_ms = start.elapsed().as_millis(),
        "dataset read"
    );
    Ok(dataset)
}

fn write_outputs(args: &RunArgs, dataset: &Dataset, records: &[Record]) -> Result<Vec<PathBuf>> {
    let paths = OutputPaths::for_dataset(&args.dataset, &args.output_dir);
    let mut written = Vec::new();

    if args.raw_output {
        write_raw_records(&paths.raw, &dataset.headers, records, false)?;
        write_raw_records(&paths.raw_with_ids, &dataset.headers, records, true)?;
        written.push(paths.raw);
        written.push(paths.raw_with_ids);
    }
    if args.analysis {
        write_analysis(&paths.analysis, &dataset.headers, records)?;
        written.push(paths.analysis);
    }
    Ok(written)
}
