//! Record model for temporal deduplication.

pub mod class;
pub mod error;
pub mod granularity;
pub mod key;
pub mod logical;
pub mod options;
pub mod predicted;
pub mod record;
pub mod sequence;

pub use class::DuplicationClass;
pub use error::{DedupError, Result};
pub use granularity::TimestampGranularity;
pub use key::{KeyAttribute, KeyColumn};
pub use logical::LogicalAttribute;
pub use options::{
    AsnmOptions, DEFAULT_BLOCK_DISTANCE_THRESHOLD, DEFAULT_MIN_UNCONSTRAINED_LENGTH,
    DEFAULT_SIMILARITY_THRESHOLDS, DedupOptions, ElapsedTimePolicy, LcsSampling,
    ResolvedSampling, SampleCap, Selection,
};
pub use predicted::PredictedDuplicates;
pub use record::{GLOBAL_RECORD_TYPE, MatchAnnotation, Record, link_records};
pub use sequence::{EventSequence, LcsAssessment};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplication_class_serializes_with_short_codes() {
        let json = serde_json::to_string(&DuplicationClass::UnconstrainedOrder)
            .expect("serialize class");
        assert_eq!(json, "\"ORDER\"");
        assert_eq!(DuplicationClass::NonKey.to_string(), "NONKEY");
    }

    #[test]
    fn options_serialize() {
        let options = DedupOptions::new().with_min_unconstrained_length(3);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: DedupOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round, options);
    }
}
