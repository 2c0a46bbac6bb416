//! Batch runner: analyze every markdown file under a directory.
//!
//! Files are analyzed one at a time. A file that cannot be read is recorded
//! as a [`FileFailure`] and the walk continues; only a bad root is fatal.

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::analyzer::{self, DocumentAnalysis};
use crate::error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
use crate::level::Level;
use crate::text::round1;

/// Default length of each ranking in the summary.
pub const DEFAULT_TOP: usize = 5;

/// Settings for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Per-file size limit in bytes.
    pub max_input_bytes: Option<u64>,
    /// Paths (relative to the root) to skip.
    pub exclude: GlobSet,
    /// Length of each ranking.
    pub top: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(analyzer::DEFAULT_MAX_INPUT_BYTES),
            exclude: GlobSet::empty(),
            top: DEFAULT_TOP,
        }
    }
}

impl BatchOptions {
    /// Compile `exclude` glob patterns.
    pub fn with_exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> ConfigResult<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidExclude {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
        }
        self.exclude = builder
            .build()
            .map_err(|source| ConfigError::InvalidExclude {
                pattern: patterns
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(","),
                source,
            })?;
        Ok(self)
    }
}

/// A file the batch could not analyze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path that failed.
    pub path: Utf8PathBuf,
    /// What went wrong.
    pub message: String,
}

/// Document counts per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDistribution {
    /// Beginner documents.
    pub beginner: usize,
    /// Intermediate documents.
    pub intermediate: usize,
    /// Advanced documents.
    pub advanced: usize,
}

impl LevelDistribution {
    /// Count for one level.
    pub const fn get(&self, level: Level) -> usize {
        match level {
            Level::Beginner => self.beginner,
            Level::Intermediate => self.intermediate,
            Level::Advanced => self.advanced,
        }
    }

    fn record(&mut self, level: Level) {
        match level {
            Level::Beginner => self.beginner += 1,
            Level::Intermediate => self.intermediate += 1,
            Level::Advanced => self.advanced += 1,
        }
    }
}

/// Mean values across analyzed documents, one decimal each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    /// Mean reading time in minutes.
    pub reading_time: f64,
    /// Mean grade level.
    pub grade_level: f64,
    /// Mean technical density (percent).
    pub technical_density: f64,
}

/// Ranking entry for the most complex documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexEntry {
    /// Document path.
    pub file: String,
    /// Its grade level.
    pub grade_level: f64,
    /// Its level.
    pub level: Level,
}

/// Ranking entry for the longest reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongReadEntry {
    /// Document path.
    pub file: String,
    /// Its reading time.
    pub minutes: u32,
    /// Its level.
    pub level: Level,
}

/// Aggregate view of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Documents analyzed successfully.
    pub total_documents: usize,
    /// Files that could not be analyzed.
    pub failed: usize,
    /// Documents per level.
    pub distribution_by_level: LevelDistribution,
    /// Means across analyzed documents.
    pub averages: Averages,
    /// Highest grade levels first.
    pub most_complex: Vec<ComplexEntry>,
    /// Longest reading times first.
    pub longest_reads: Vec<LongReadEntry>,
}

/// Result of a batch run: per-document analyses, the summary, and failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The aggregate report.
    pub summary: SummaryReport,
    /// Every successful analysis, in discovery order.
    #[serde(skip)]
    pub documents: Vec<DocumentAnalysis>,
    /// Files or directories that could not be processed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

/// Aggregate analyses into a summary. Order of `documents` only breaks ties.
pub fn summarize(documents: &[DocumentAnalysis], failed: usize, top: usize) -> SummaryReport {
    let mut distribution = LevelDistribution::default();
    for doc in documents {
        distribution.record(doc.level.level);
    }

    let averages = if documents.is_empty() {
        Averages::default()
    } else {
        let n = documents.len() as f64;
        let sum = |f: fn(&DocumentAnalysis) -> f64| documents.iter().map(f).sum::<f64>() / n;
        Averages {
            reading_time: round1(sum(|d| f64::from(d.reading_time.minutes))),
            grade_level: round1(sum(|d| d.metrics.grade_level)),
            technical_density: round1(sum(|d| d.metrics.technical_density)),
        }
    };

    let mut by_grade: Vec<&DocumentAnalysis> = documents.iter().collect();
    by_grade.sort_by(|a, b| b.metrics.grade_level.total_cmp(&a.metrics.grade_level));
    let most_complex = by_grade
        .into_iter()
        .take(top)
        .map(|d| ComplexEntry {
            file: d.file.clone(),
            grade_level: d.metrics.grade_level,
            level: d.level.level,
        })
        .collect();

    let mut by_time: Vec<&DocumentAnalysis> = documents.iter().collect();
    by_time.sort_by(|a, b| b.reading_time.minutes.cmp(&a.reading_time.minutes));
    let longest_reads = by_time
        .into_iter()
        .take(top)
        .map(|d| LongReadEntry {
            file: d.file.clone(),
            minutes: d.reading_time.minutes,
            level: d.level.level,
        })
        .collect();

    SummaryReport {
        total_documents: documents.len(),
        failed,
        distribution_by_level: distribution,
        averages,
        most_complex,
        longest_reads,
    }
}

/// Find markdown files under `root`, skipping hidden and excluded entries.
///
/// Symlinks are followed, so a linked `.md` file or directory is analyzed
/// like a regular one. Walk errors, including symlink loops, are returned
/// alongside the paths rather than stopping the walk.
pub fn discover_markdown_files(
    root: &Utf8Path,
    exclude: &GlobSet,
) -> (Vec<Utf8PathBuf>, Vec<FileFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    let walker = WalkDir::new(root.as_std_path())
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped(entry, root, exclude));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .and_then(Utf8Path::from_path)
                    .map_or_else(|| root.to_path_buf(), Utf8Path::to_path_buf);
                tracing::warn!(%path, error = %err, "skipping unreadable entry");
                failures.push(FileFailure {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };
        if path.extension() == Some("md") {
            files.push(path.to_path_buf());
        }
    }

    (files, failures)
}

fn is_skipped(entry: &DirEntry, root: &Utf8Path, exclude: &GlobSet) -> bool {
    if entry.file_name().to_string_lossy().starts_with('.') {
        return true;
    }
    let relative = entry
        .path()
        .strip_prefix(root.as_std_path())
        .unwrap_or_else(|_| entry.path());
    exclude.is_match(relative)
}

/// Analyze every markdown file under `root`.
///
/// `on_file` is called before each file is analyzed, for progress reporting.
#[tracing::instrument(skip(options, on_file), fields(root = %root))]
pub fn analyze_directory<F>(
    root: &Utf8Path,
    options: &BatchOptions,
    mut on_file: F,
) -> AnalysisResult<BatchOutcome>
where
    F: FnMut(&Utf8Path, usize, usize),
{
    if !root.is_dir() {
        return Err(AnalysisError::NotADirectory(root.to_path_buf()));
    }

    let (files, mut failures) = discover_markdown_files(root, &options.exclude);
    tracing::info!(files = files.len(), "discovered markdown files");

    let total = files.len();
    let mut documents = Vec::with_capacity(total);
    for (index, path) in files.iter().enumerate() {
        on_file(path, index, total);
        match analyzer::analyze_file(path, options.max_input_bytes) {
            Ok(analysis) => documents.push(analysis),
            Err(err) => {
                tracing::warn!(%path, error = %err, "skipping file");
                failures.push(FileFailure {
                    path: path.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    let summary = summarize(&documents, failures.len(), options.top);
    tracing::info!(
        analyzed = summary.total_documents,
        failed = summary.failed,
        "batch complete"
    );
    Ok(BatchOutcome {
        summary,
        documents,
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EASY: &str = "# Intro\n\nThe cat sat on the mat. The dog ran fast.\n";

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    fn long_doc(sentences: usize) -> String {
        "Short words make easy reading. ".repeat(sentences)
    }

    #[test]
    fn discovers_only_visible_markdown() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guides/nested")).unwrap();
        fs::create_dir_all(root.join(".hidden")).unwrap();
        fs::write(root.join("README.md"), EASY).unwrap();
        fs::write(root.join("guides/nested/deep.md"), EASY).unwrap();
        fs::write(root.join("guides/notes.txt"), EASY).unwrap();
        fs::write(root.join("guides/.draft.md"), EASY).unwrap();
        fs::write(root.join(".hidden/secret.md"), EASY).unwrap();
        fs::write(root.join("upper.MD"), EASY).unwrap();

        let (files, failures) = discover_markdown_files(&utf8(root), &GlobSet::empty());
        assert!(failures.is_empty());
        let names: Vec<_> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["README.md", "deep.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_markdown_is_discovered() {
        use std::os::unix::fs::symlink;

        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("shared.md"), EASY).unwrap();

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("local.md"), EASY).unwrap();
        symlink(outside.path().join("shared.md"), root.join("linked.md")).unwrap();

        let (files, failures) = discover_markdown_files(&utf8(root), &GlobSet::empty());
        assert!(failures.is_empty());
        let names: Vec<_> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["linked.md", "local.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_a_failure_not_a_hang() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs/page.md"), EASY).unwrap();
        symlink(root.join("docs"), root.join("docs/again")).unwrap();

        let (files, failures) = discover_markdown_files(&utf8(root), &GlobSet::empty());
        assert_eq!(files.len(), 1);
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn exclude_patterns_prune_paths() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("keep.md"), EASY).unwrap();
        fs::write(root.join("vendor/skip.md"), EASY).unwrap();

        let options = BatchOptions::default().with_exclude(&["vendor"]).unwrap();
        let (files, _) = discover_markdown_files(&utf8(root), &options.exclude);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.md"));
    }

    #[test]
    fn invalid_exclude_pattern_errors() {
        let result = BatchOptions::default().with_exclude(&["a[b"]);
        assert!(matches!(result, Err(ConfigError::InvalidExclude { .. })));
    }

    #[test]
    fn unreadable_file_does_not_stop_batch() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for name in ["a.md", "b.md", "c.md", "d.md"] {
            fs::write(root.join(name), EASY).unwrap();
        }
        fs::write(root.join("broken.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let mut seen = 0;
        let outcome =
            analyze_directory(&utf8(root), &BatchOptions::default(), |_, _, _| seen += 1).unwrap();

        assert_eq!(seen, 5);
        assert_eq!(outcome.summary.total_documents, 4);
        assert_eq!(outcome.summary.failed, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].path.ends_with("broken.md"));
    }

    #[test]
    fn missing_root_is_fatal() {
        let result = analyze_directory(
            Utf8Path::new("/nonexistent/docs"),
            &BatchOptions::default(),
            |_, _, _| {},
        );
        assert!(matches!(result, Err(AnalysisError::NotADirectory(_))));
    }

    #[test]
    fn empty_directory_summarizes_to_zero() {
        let tmp = TempDir::new().unwrap();
        let outcome =
            analyze_directory(&utf8(tmp.path()), &BatchOptions::default(), |_, _, _| {}).unwrap();
        assert_eq!(outcome.summary.total_documents, 0);
        assert_eq!(outcome.summary.averages, Averages::default());
        assert!(outcome.summary.most_complex.is_empty());
    }

    #[test]
    fn rankings_are_sorted_and_capped() {
        let docs: Vec<_> = (1..=7)
            .map(|n| analyzer::analyze(&format!("doc{n}.md"), &long_doc(n * 80)))
            .collect();
        let summary = summarize(&docs, 0, 5);

        assert_eq!(summary.total_documents, 7);
        assert_eq!(summary.longest_reads.len(), 5);
        assert_eq!(summary.longest_reads[0].file, "doc7.md");
        assert!(
            summary
                .longest_reads
                .windows(2)
                .all(|w| w[0].minutes >= w[1].minutes)
        );
        assert_eq!(summary.most_complex.len(), 5);
        assert!(
            summary
                .most_complex
                .windows(2)
                .all(|w| w[0].grade_level >= w[1].grade_level)
        );
    }

    #[test]
    fn distribution_and_averages() {
        let easy = analyzer::analyze("easy.md", EASY);
        let hard = analyzer::analyze(
            "hard.md",
            "OAuth JWT CORS API schema. Redis cache query index.\n\n```java\nx();\n```\n",
        );
        let summary = summarize(&[easy.clone(), hard.clone()], 0, DEFAULT_TOP);

        // Dense jargon plus Java code escalates the hard document twice.
        assert_eq!(easy.level.level, Level::Beginner);
        assert_eq!(hard.level.level, Level::Advanced);
        let dist = summary.distribution_by_level;
        assert_eq!(dist.get(Level::Beginner), 1);
        assert_eq!(dist.get(Level::Intermediate), 0);
        assert_eq!(dist.get(Level::Advanced), 1);
        let expected = round1((easy.metrics.grade_level + hard.metrics.grade_level) / 2.0);
        assert!((summary.averages.grade_level - expected).abs() < f64::EPSILON);
    }
}
