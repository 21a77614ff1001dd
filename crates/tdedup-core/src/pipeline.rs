//! Deduplication pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Base**: exact, non-key, modified-value, and elapsed-time matches
//! 2. **Baseline sort**: records ordered by elapsed time, timed for reference
//! 3. **Sequence model**: record-type LCS from sampled event sequences
//! 4. **LCS application**: constrained/unconstrained split per record
//! 5. **Order match**: duplicates sharing their unconstrained sequence
//!
//! Stages mutate the shared record set in place; later stages depend on the
//! match annotations left by earlier ones.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use tdedup_model::{DedupOptions, PredictedDuplicates, Record, Result};

use crate::matching::{PairMatch, apply_base_techniques};
use crate::sequence::{SequenceModel, apply_model, build_model};
use crate::unconstrained::apply_order_match;

/// Wall-clock time of one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: &'static str,
    pub duration: Duration,
}

/// Everything the pipeline produced besides the record annotations.
#[derive(Debug, Clone, Default)]
pub struct DedupReport {
    /// Ids flagged by any stage.
    pub predicted: PredictedDuplicates,
    /// Base-stage matches in pair order.
    pub base_matches: Vec<PairMatch>,
    /// Ids flagged by the unconstrained-order stage.
    pub order_matched: BTreeSet<usize>,
    /// Records with an unconstrained token that also occurs in their LCS.
    pub not_adhered: usize,
    /// Record types without a usable LCS.
    pub ignored_types: BTreeSet<String>,
    pub model: SequenceModel,
    pub timings: Vec<StageTiming>,
}

impl DedupReport {
    pub fn total_duration(&self) -> Duration {
        self.timings.iter().map(|t| t.duration).sum()
    }
}

/// Run every stage over `records` with `options`.
///
/// `records` must already carry their key and record type (see
/// [`crate::schema::infer`]); ids must equal positions.
pub fn run_dedup(records: &mut [Record], options: &DedupOptions) -> Result<DedupReport> {
    options.validate()?;

    let span = info_span!("dedup", records = records.len());
    let _guard = span.enter();
    let mut report = DedupReport::default();

    // ========================================================================
    // Stage 1: Base techniques
    // ========================================================================
    report.base_matches = timed(&mut report.timings, "base", || {
        apply_base_techniques(
            records,
            options.elapsed_time_policy,
            &mut report.predicted,
        )
    });
    info!(
        matches = report.base_matches.len(),
        predicted = report.predicted.len(),
        "base techniques applied"
    );

    // ========================================================================
    // Stage 2: Baseline sort by elapsed time
    // ========================================================================
    timed(&mut report.timings, "baseline_sort", || {
        let mut order: Vec<(i64, usize)> = records
            .iter()
            .map(|record| (record.elapsed_time(), record.id()))
            .collect();
        order.sort_unstable();
        debug!(
            shortest = order.first().map(|(elapsed, _)| *elapsed),
            longest = order.last().map(|(elapsed, _)| *elapsed),
            "records sorted by elapsed time"
        );
    });

    // ========================================================================
    // Stage 3: Sequence model
    // ========================================================================
    let sampling = options.sampling.resolve(records.len());
    report.model = timed(&mut report.timings, "sequence_model", || {
        build_model(records, sampling)
    });
    info!(
        record_types = report.model.len(),
        cap = sampling.cap,
        "record type sequences modeled"
    );

    // ========================================================================
    // Stage 4: LCS application
    // ========================================================================
    let application = timed(&mut report.timings, "lcs_application", || {
        apply_model(records, &report.model)
    });
    report.not_adhered = application.not_adhered;
    report.ignored_types = application.ignored_types;
    info!(
        not_adhered = report.not_adhered,
        ignored_types = report.ignored_types.len(),
        "record type LCS applied"
    );

    // ========================================================================
    // Stage 5: Unconstrained-order match
    // ========================================================================
    report.order_matched = timed(&mut report.timings, "order_match", || {
        apply_order_match(
            records,
            options.min_unconstrained_length,
            &mut report.predicted,
        )
    });
    info!(
        flagged = report.order_matched.len(),
        predicted = report.predicted.len(),
        duration_ms = report.total_duration().as_millis(),
        "deduplication complete"
    );

    Ok(report)
}

fn timed<T>(timings: &mut Vec<StageTiming>, stage: &'static str, run: impl FnOnce() -> T) -> T {
    let span = info_span!("stage", stage);
    let _guard = span.enter();
    let start = Instant::now();
    let output = run();
    let duration = start.elapsed();
    debug!(duration_ms = duration.as_millis(), "stage finished");
    timings.push(StageTiming { stage, duration });
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdedup_model::{DuplicationClass, LcsSampling, SampleCap};

    use crate::schema::infer;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn stages_run_in_order() {
        let headers = strings(&["id", "kind", "a", "time", "b", "time"]);
        let rows = vec![
            strings(&["1", "g", "x", "10:00:00", "y", "11:00:00"]),
            strings(&["2", "g", "x", "10:00:00", "y", "11:00:00"]),
            strings(&["3", "g", "p", "09:00:00", "q", "09:30:00"]),
            strings(&["4", "h", "p", "09:00:00", "q", "08:30:00"]),
        ];
        let mut dataset = infer(&headers, &rows);
        let report = run_dedup(&mut dataset.records, &DedupOptions::default()).expect("run");

        assert_eq!(
            report.timings.iter().map(|t| t.stage).collect::<Vec<_>>(),
            vec![
                "base",
                "baseline_sort",
                "sequence_model",
                "lcs_application",
                "order_match"
            ]
        );
        assert!(report.predicted.contains(0));
        assert!(report.predicted.contains(1));
        assert!(
            dataset.records[0]
                .matches()
                .iter()
                .any(|m| m.record_id == 1 && m.class == DuplicationClass::NonKey)
        );
    }

    #[test]
    fn invalid_options_are_rejected() {
        let options = DedupOptions::default()
            .with_sampling(LcsSampling::default().with_cap(SampleCap::Count(0)));
        let mut records = Vec::new();
        assert!(run_dedup(&mut records, &options).is_err());
    }
}
