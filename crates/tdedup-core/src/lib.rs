//! Temporal deduplication engine.
//!
//! Schema inference, the layered match stages, record-type sequence modeling
//! and confusion-matrix evaluation over a [`tdedup_model::Record`] set.

pub mod confusion;
pub mod lcs;
pub mod matching;
pub mod pipeline;
pub mod schema;
pub mod sequence;
pub mod timestamp;
pub mod unconstrained;

pub use confusion::{Assessment, ConfusionCounts, ConfusionMatrix};
pub use lcs::{assess, fold_lcs, longest_common_subsequence, sequence_lcs};
pub use matching::{PairMatch, apply_base_techniques, apply_matches, classify_pair, scan_pairs};
pub use pipeline::{DedupReport, StageTiming, run_dedup};
pub use schema::{
    InferredDataset, LogicalLayout, RecordTypeSource, SchemaInference, infer, infer_key,
    infer_record_type,
};
pub use sequence::{
    LcsApplication, RecordTypeSequence, Sampler, SequenceModel, apply_model, build_model,
};
pub use unconstrained::{apply_order_match, is_order_match};
