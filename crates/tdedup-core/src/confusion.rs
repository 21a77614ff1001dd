//! Confusion-matrix evaluation of predicted duplicates against truth data.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use tdedup_model::{DedupError, PredictedDuplicates, Record, Result};

/// True/false positive/negative counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub true_negatives: usize,
}

impl ConfusionCounts {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
    }

    /// TP / (TP + FP); NaN when nothing was predicted.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN); NaN when there are no actual duplicates.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        let (precision, recall) = (self.precision(), self.recall());
        2.0 * precision * recall / (precision + recall)
    }

    /// Matthews correlation coefficient.
    pub fn mcc(&self) -> f64 {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let fn_ = self.false_negatives as f64;
        let tn = self.true_negatives as f64;
        (tp * tn - fp * fn_) / ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt()
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        f64::NAN
    } else {
        numerator as f64 / denominator as f64
    }
}

/// One scored prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub total_records: usize,
    pub actual: usize,
    pub predicted: usize,
    pub counts: ConfusionCounts,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub mcc: f64,
    /// Predicted but not in the truth data, ascending.
    pub false_positives: Vec<usize>,
    /// In the truth data but not predicted, ascending.
    pub false_negatives: Vec<usize>,
}

/// Truth data for one dataset.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    truth: Vec<usize>,
    actual: BTreeSet<usize>,
    total: usize,
}

impl ConfusionMatrix {
    /// Load the truth ids and mark each referenced record as a truth duplicate.
    ///
    /// Repeated ids are kept once, in first-seen order. An id outside the
    /// record range is an error.
    pub fn new(truth_ids: &[usize], records: &mut [Record]) -> Result<Self> {
        let total = records.len();
        let mut truth = Vec::new();
        let mut actual = BTreeSet::new();

        for &id in truth_ids {
            let record = records
                .get_mut(id)
                .ok_or(DedupError::RecordOutOfRange { id, count: total })?;
            if actual.insert(id) {
                truth.push(id);
                record.mark_truth_duplicate();
            }
        }

        info!(actual = truth.len(), total, "truth data loaded");
        Ok(Self {
            truth,
            actual,
            total,
        })
    }

    /// Truth ids in first-seen order.
    pub fn truth_ids(&self) -> &[usize] {
        &self.truth
    }

    pub fn total_records(&self) -> usize {
        self.total
    }

    /// Score `predicted` against the truth data.
    ///
    /// Every predicted id must name a record, like the truth ids.
    pub fn assess(&self, predicted: &PredictedDuplicates) -> Result<Assessment> {
        let predicted_set = predicted.as_set();
        if let Some(&id) = predicted_set.range(self.total..).next() {
            return Err(DedupError::RecordOutOfRange {
                id,
                count: self.total,
            });
        }
        let false_positives: Vec<usize> = predicted_set.difference(&self.actual).copied().collect();
        let false_negatives: Vec<usize> = self.actual.difference(predicted_set).copied().collect();
        let true_positives = predicted_set.intersection(&self.actual).count();

        let counts = ConfusionCounts {
            true_positives,
            false_positives: false_positives.len(),
            false_negatives: false_negatives.len(),
            true_negatives: self.total
                - (true_positives + false_positives.len() + false_negatives.len()),
        };

        let assessment = Assessment {
            total_records: self.total,
            actual: self.actual.len(),
            predicted: predicted.len(),
            counts,
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
            mcc: counts.mcc(),
            false_positives,
            false_negatives,
        };

        info!(
            predicted = assessment.predicted,
            actual = assessment.actual,
            tp = counts.true_positives,
            fp = counts.false_positives,
            fn_ = counts.false_negatives,
            tn = counts.true_negatives,
            precision = assessment.precision,
            recall = assessment.recall,
            f1 = assessment.f1,
            mcc = assessment.mcc,
            "prediction assessed"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<Record> {
        (0..count)
            .map(|id| Record::with_values(id, [id.to_string()]))
            .collect()
    }

    #[test]
    fn scores_prediction() {
        let mut records = records(10);
        let matrix = ConfusionMatrix::new(&[2, 5, 2], &mut records).expect("truth");
        assert_eq!(matrix.truth_ids(), &[2, 5]);
        assert!(records[5].is_truth_duplicate());

        let predicted: PredictedDuplicates = [2, 7].into_iter().collect();
        let result = matrix.assess(&predicted).expect("assess");
        assert_eq!(
            result.counts,
            ConfusionCounts {
                true_positives: 1,
                false_positives: 1,
                false_negatives: 1,
                true_negatives: 7,
            }
        );
        assert_eq!(result.false_positives, vec![7]);
        assert_eq!(result.false_negatives, vec![5]);
        assert!((result.precision - 0.5).abs() < 1e-12);
        assert!((result.recall - 0.5).abs() < 1e-12);
        assert!((result.f1 - 0.5).abs() < 1e-12);
        assert!((result.mcc - 0.375).abs() < 1e-12);
    }

    #[test]
    fn empty_prediction_yields_undefined_precision() {
        let mut records = records(4);
        let matrix = ConfusionMatrix::new(&[1], &mut records).expect("truth");
        let result = matrix.assess(&PredictedDuplicates::new()).expect("assess");
        assert!(result.precision.is_nan());
        assert_eq!(result.recall, 0.0);
        assert_eq!(result.counts.total(), 4);
    }

    #[test]
    fn out_of_range_predicted_id_is_rejected() {
        let mut records = records(3);
        let matrix = ConfusionMatrix::new(&[1], &mut records).expect("truth");
        let predicted: PredictedDuplicates = [1, 4].into_iter().collect();
        let err = matrix.assess(&predicted).expect_err("out of range");
        assert!(matches!(
            err,
            DedupError::RecordOutOfRange { id: 4, count: 3 }
        ));
    }

    #[test]
    fn out_of_range_truth_id_is_fatal() {
        let mut records = records(3);
        let err = ConfusionMatrix::new(&[0, 3], &mut records).expect_err("out of range");
        assert!(matches!(
            err,
            DedupError::RecordOutOfRange { id: 3, count: 3 }
        ));
    }
}
