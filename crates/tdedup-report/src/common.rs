//! Shared helpers for the tab-delimited writers and output naming.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{QuoteStyle, Writer, WriterBuilder};

/// Tab-delimited writer that emits fields verbatim.
pub(crate) fn tab_writer(path: &Path) -> Result<Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))
}

/// Space-joined rendering of a list.
pub(crate) fn join_spaced<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| ToString::to_string(&item))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paths of every output file derived from one dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub raw: PathBuf,
    pub raw_with_ids: PathBuf,
    pub analysis: PathBuf,
}

impl OutputPaths {
    /// `<stem>_<suffix>.<ext>` for each output, placed in `output_dir`.
    ///
    /// A dataset without an extension yields outputs without one.
    pub fn for_dataset(dataset: &Path, output_dir: &Path) -> Self {
        let stem = dataset
            .file_stem()
            .map_or_else(|| "dataset".to_string(), |s| s.to_string_lossy().into_owned());
        let extension = dataset
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let named = |suffix: &str| output_dir.join(format!("{stem}_{suffix}{extension}"));

        Self {
            raw: named("raw_output"),
            raw_with_ids: named("raw_with_rowids_output"),
            analysis: named("analysis_output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_keep_stem_and_extension() {
        let paths = OutputPaths::for_dataset(Path::new("data/games.tsv"), Path::new("out"));
        assert_eq!(paths.raw, Path::new("out/games_raw_output.tsv"));
        assert_eq!(
            paths.raw_with_ids,
            Path::new("out/games_raw_with_rowids_output.tsv")
        );
        assert_eq!(paths.analysis, Path::new("out/games_analysis_output.tsv"));
    }

    #[test]
    fn output_names_without_extension() {
        let paths = OutputPaths::for_dataset(Path::new("games"), Path::new("out"));
        assert_eq!(paths.analysis, Path::new("out/games_analysis_output"));
    }

    #[test]
    fn joins_with_spaces() {
        assert_eq!(join_spaced([1, 2, 3]), "1 2 3");
        assert_eq!(join_spaced(Vec::<usize>::new()), "");
    }
}
