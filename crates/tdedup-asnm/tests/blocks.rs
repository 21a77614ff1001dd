//! Block coverage and end-to-end ASNM behavior.

use proptest::prelude::*;

use tdedup_asnm::{Asnm, ComparisonMethod, block_ranges, comparison_blocks};
use tdedup_model::{AsnmOptions, Record};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn blocks_cover_sorted_records_once(
        mut keys in prop::collection::vec("[ab]{0,3}", 1..40),
        threshold in 0.0f64..=1.0,
    ) {
        keys.sort();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let starts = comparison_blocks(&refs, threshold);

        prop_assert_eq!(starts.first().copied(), Some(0));
        prop_assert!(starts.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(starts.iter().all(|&s| s < refs.len()));

        let covered: Vec<usize> = block_ranges(&starts, refs.len())
            .into_iter()
            .flatten()
            .collect();
        prop_assert_eq!(covered, (0..refs.len()).collect::<Vec<_>>());
    }
}

#[test]
fn dissimilar_key_starts_a_new_block() {
    assert_eq!(comparison_blocks(&["aaa", "aaa", "zzz"], 0.05), vec![0, 2]);
}

#[test]
fn records_in_different_blocks_are_never_compared() {
    let headers: Vec<String> = ["city", "v"].iter().map(|h| (*h).to_string()).collect();
    let records = vec![
        Record::with_values(0, ["paris", "same"]),
        Record::with_values(1, ["tokyo", "same"]),
    ];

    let blocked = Asnm::new(
        AsnmOptions::new()
            .with_blocking_key("city")
            .with_thresholds(vec![0.3]),
    )
    .expect("options");
    let unblocked = Asnm::new(AsnmOptions::new().with_thresholds(vec![0.3])).expect("options");

    let split = blocked.compare(&headers, &records).expect("compare");
    let whole = unblocked.compare(&headers, &records).expect("compare");
    assert!(split[0].predicted.is_empty());
    assert_eq!(whole[0].predicted.len(), 2);
}

#[test]
fn default_thresholds_yield_one_prediction_each() {
    let headers = vec!["k".to_string()];
    let records = vec![Record::with_values(0, ["x"])];
    let predictions = Asnm::default().compare(&headers, &records).expect("compare");
    assert_eq!(predictions.len(), 7);
}
