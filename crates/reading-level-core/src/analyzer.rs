//! Per-document pipeline: load, classify, estimate, score, and grade.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::complexity::{self, ComplexityMetrics};
use crate::content;
use crate::error::{AnalysisError, AnalysisResult};
use crate::level::{self, ReadingLevel};
use crate::reading_time::{self, ReadingTime};
use crate::report::{self, Suggestion};

/// Default input size limit (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;

/// A markdown file and its text. Read fresh on every analysis.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the text came from.
    pub path: Utf8PathBuf,
    /// Raw file contents.
    pub content: String,
}

impl Document {
    /// Read a document, refusing files larger than `max_bytes` when set.
    pub fn load(path: &Utf8Path, max_bytes: Option<u64>) -> AnalysisResult<Self> {
        let read_err = |source: std::io::Error| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        };

        // Preflight: check file size via metadata before reading into memory.
        let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
        if let Some(limit) = max_bytes
            && metadata.len() > limit
        {
            return Err(AnalysisError::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit,
            });
        }

        let content = std::fs::read_to_string(path.as_std_path()).map_err(read_err)?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }
}

/// Everything derived from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Path as given by the caller.
    pub file: String,
    /// Estimated reading time.
    pub reading_time: ReadingTime,
    /// Readability and density statistics.
    pub metrics: ComplexityMetrics,
    /// Level classification.
    pub level: ReadingLevel,
    /// Topics for the info box.
    pub key_topics: Vec<String>,
    /// Improvement suggestions.
    pub suggestions: Vec<Suggestion>,
}

impl DocumentAnalysis {
    /// Render the reading-guide info box for this document.
    pub fn info_box(&self) -> String {
        report::render_info_box(&self.reading_time, &self.level, &self.metrics, &self.key_topics)
    }
}

/// Run the full pipeline over already-loaded text.
#[tracing::instrument(skip(content), fields(text_len = content.len()))]
pub fn analyze(file: &str, content: &str) -> DocumentAnalysis {
    let breakdown = content::classify(content);
    let reading_time = reading_time::estimate(&breakdown);
    let metrics = complexity::score(&breakdown);
    let level = level::classify(&metrics);
    let key_topics = report::key_topics(&metrics);
    let suggestions = report::suggestions(&metrics, level.level);

    DocumentAnalysis {
        file: file.to_string(),
        reading_time,
        metrics,
        level,
        key_topics,
        suggestions,
    }
}

/// Load a document from disk and analyze it.
pub fn analyze_file(path: &Utf8Path, max_bytes: Option<u64>) -> AnalysisResult<DocumentAnalysis> {
    let document = Document::load(path, max_bytes)?;
    Ok(analyze(document.path.as_str(), &document.content))
}
