//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use reading_level_core::DocumentAnalysis;

pub mod directory;
pub mod file;
pub mod info;
pub mod infobox;

/// Load and analyze one file, failing loudly on any read problem.
pub fn analyze_input_file(
    path: &Utf8Path,
    max_bytes: Option<u64>,
) -> anyhow::Result<DocumentAnalysis> {
    reading_level_core::analyze_file(path, max_bytes)
        .with_context(|| format!("failed to analyze {path}"))
}
