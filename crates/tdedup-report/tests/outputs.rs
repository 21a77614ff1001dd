//! File-level tests for the output writers.

use std::path::Path;

use tdedup_model::{DuplicationClass, Record, link_records};
use tdedup_report::{OutputPaths, write_analysis, write_raw_records};

fn headers() -> Vec<String> {
    vec!["user".to_string(), "time".to_string()]
}

fn records() -> Vec<Record> {
    let mut records = vec![
        Record::with_values(0, ["u1", "10:00:00"]),
        Record::with_values(1, ["u1", "10:00:00"]),
    ];
    link_records(&mut records, 0, 1, DuplicationClass::Exact);
    records
}

#[test]
fn writes_every_output_into_a_new_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("nested").join("output");
    let paths = OutputPaths::for_dataset(Path::new("games.txt"), &out);

    write_raw_records(&paths.raw, &headers(), &records(), false).expect("raw");
    write_raw_records(&paths.raw_with_ids, &headers(), &records(), true).expect("raw ids");
    write_analysis(&paths.analysis, &headers(), &records()).expect("analysis");

    let analysis = std::fs::read_to_string(&paths.analysis).expect("read analysis");
    let lines: Vec<&str> = analysis.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID\tTruth Data Duplicate\t# Matches\t"));
    assert!(lines[0].ends_with("Unconstrained Sequence Length\tuser\ttime"));
    assert_eq!(
        lines[1],
        "0\tfalse\t1\t1\tEXACT\t0\t0\t0\t0\t\t0\t\ttrue\t\t0\tu1\t10:00:00"
    );

    let raw = std::fs::read_to_string(&paths.raw).expect("read raw");
    assert_eq!(raw, "user\ttime\nu1\t10:00:00\nu1\t10:00:00\n");
    assert!(paths.raw_with_ids.exists());
}
