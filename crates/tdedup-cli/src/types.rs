//! Options file and run results shared by the commands and the summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tdedup_asnm::Prediction;
use tdedup_core::{Assessment, DedupReport, SchemaInference};
use tdedup_model::{AsnmOptions, DedupOptions, Record};

/// Contents of a `--options` JSON file.
///
/// Deduplication parameters sit at the top level, so a bare
/// [`DedupOptions`] document is accepted; comparison parameters go under
/// `asnm`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    #[serde(flatten)]
    pub dedup: DedupOptions,
    pub asnm: AsnmOptions,
}

impl OptionsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read options file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parse options file {}", path.display()))
    }
}

/// One scored prediction: the temporal pipeline or a comparison variant.
#[derive(Debug, Clone)]
pub struct EvaluationRound {
    pub label: String,
    pub assessment: Assessment,
    pub duration_ms: u128,
}

#[derive(Debug)]
pub struct RunResult {
    pub dataset: PathBuf,
    pub headers: Vec<String>,
    pub schema: SchemaInference,
    pub options: OptionsFile,
    pub records: Vec<Record>,
    pub report: DedupReport,
    pub rounds: Vec<EvaluationRound>,
    pub comparisons: Vec<Prediction>,
    pub outputs: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InferResult {
    pub dataset: PathBuf,
    pub headers: Vec<String>,
    pub records: usize,
    pub schema: SchemaInference,
}
