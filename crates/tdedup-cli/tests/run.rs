//! End-to-end runs of the `run` command over files in a temp directory.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use tdedup_cli::cli::{Cli, Command, RunArgs};
use tdedup_cli::commands::{PIPELINE_LABEL, run, run_infer};
use tdedup_cli::types::OptionsFile;

const DATASET: &str = "id\tkind\tstep\ttime\tstep\ttime\n\
                       7\tg\ta\t10:00:00\tb\t10:05:00\n\
                       8\tg\tc\t11:00:00\td\t11:20:00\n\
                       7\tg\ta\t10:00:00\tb\t10:05:00\n";

struct Fixture {
    dir: TempDir,
    dataset: PathBuf,
    truth: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let dataset = dir.path().join("sessions.tsv");
    let truth = dir.path().join("truth.tsv");
    std::fs::write(&dataset, DATASET).expect("write dataset");
    std::fs::write(&truth, "Record ID\n2\n").expect("write truth");
    Fixture {
        dir,
        dataset,
        truth,
    }
}

fn run_args(fixture: &Fixture, extra: &[&str]) -> RunArgs {
    let output = fixture.dir.path().join("out");
    let mut argv = vec![
        "temporal-dedup".to_string(),
        "run".to_string(),
        path_arg(&fixture.dataset),
        "--truth".to_string(),
        path_arg(&fixture.truth),
        "--output-dir".to_string(),
        path_arg(&output),
    ];
    argv.extend(extra.iter().map(|arg| (*arg).to_string()));
    match Cli::try_parse_from(argv).expect("parse").command {
        Command::Run(args) => args,
        Command::Infer(_) => panic!("expected run"),
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn pipeline_round_is_scored_against_truth() {
    let fixture = fixture();
    let result = run(&run_args(&fixture, &[])).expect("run");

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.rounds.len(), 1);
    let round = &result.rounds[0];
    assert_eq!(round.label, PIPELINE_LABEL);
    assert_eq!(round.assessment.counts.true_positives, 1);
    assert_eq!(round.assessment.counts.false_positives, 1);
    assert_eq!(round.assessment.counts.false_negatives, 0);
    assert_eq!(round.assessment.false_positives, vec![0]);
    assert!(result.outputs.is_empty());
}

#[test]
fn compare_adds_one_round_per_threshold() {
    let fixture = fixture();
    let args = run_args(&fixture, &["--threshold", "0.5", "1.0", "--compare"]);
    let result = run(&args).expect("run");

    assert_eq!(result.rounds.len(), 3);
    assert_eq!(result.comparisons.len(), 2);
    assert!(result.rounds[1].label.starts_with("ASNM"));
    let strict: Vec<usize> = result.comparisons[1].predicted.iter().collect();
    assert_eq!(strict, vec![0, 2]);
}

#[test]
fn requested_outputs_are_written() {
    let fixture = fixture();
    let result = run(&run_args(&fixture, &["--raw-output", "--analysis"])).expect("run");

    assert_eq!(result.outputs.len(), 3);
    for path in &result.outputs {
        assert!(path.exists(), "missing {}", path.display());
    }
    let raw = std::fs::read_to_string(&result.outputs[0]).expect("read raw output");
    assert_eq!(raw.lines().count(), 4);
}

#[test]
fn options_file_is_overridden_by_flags() {
    let fixture = fixture();
    let options = fixture.dir.path().join("options.json");
    std::fs::write(
        &options,
        r#"{"min_unconstrained_length": 3, "asnm": {"blocking_key": "kind"}}"#,
    )
    .expect("write options");
    let options_arg = path_arg(&options);

    let args = run_args(&fixture, &["--options", &options_arg, "--min-seq-length", "5"]);
    let resolved = tdedup_cli::commands::resolve_options(&args).expect("resolve");
    assert_eq!(resolved.dedup.min_unconstrained_length, 5);
    assert_eq!(resolved.asnm.blocking_key.as_deref(), Some("kind"));
    assert_ne!(resolved, OptionsFile::default());
}

#[test]
fn out_of_range_truth_id_fails_the_run() {
    let fixture = fixture();
    std::fs::write(&fixture.truth, "Record ID\n12\n").expect("write truth");
    assert!(run(&run_args(&fixture, &[])).is_err());
}

#[test]
fn infer_reports_the_schema() {
    let fixture = fixture();
    let result = run_infer(&tdedup_cli::cli::InferArgs {
        dataset: fixture.dataset.clone(),
    })
    .expect("infer");
    assert_eq!(result.records, 3);
    assert_eq!(result.schema.layout.starts, vec![2, 4]);
}
