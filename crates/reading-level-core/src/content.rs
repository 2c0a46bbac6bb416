//! Content classification: split a markdown document into typed segments.
//!
//! A single pass over the lines with a small fence state machine. Outside a
//! fenced block each non-blank line lands in exactly one bucket, checked in
//! order: header, list item, table row, plain text.
//!
//! An unterminated fence at end of input is dropped without error; its
//! lines belong to no bucket.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::text;

/// Opening/closing marker for fenced code blocks.
const FENCE: &str = "```";

/// Bullet (`-`, `*`, `+`) or numbered (`12.`) list marker followed by whitespace.
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+\.)\s").expect("valid regex"));

/// A fenced code block and its language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Lower-cased tag from the opening fence; empty when untagged.
    pub language: String,
    /// Interior lines, each followed by `\n`.
    pub content: String,
    /// Words in `content` under the shared counting rule.
    pub word_count: usize,
}

/// A document decomposed into segment categories, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBreakdown {
    /// Plain prose lines.
    pub text: Vec<String>,
    /// Finalized fenced code blocks.
    pub code_blocks: Vec<CodeBlock>,
    /// Heading lines (including the `#` markers).
    pub headers: Vec<String>,
    /// List item lines (including the markers).
    pub lists: Vec<String>,
    /// Table rows, separator rows included.
    pub tables: Vec<String>,
}

impl ContentBreakdown {
    /// Returns `true` when no category holds anything.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.code_blocks.is_empty()
            && self.headers.is_empty()
            && self.lists.is_empty()
            && self.tables.is_empty()
    }
}

/// Fence state threaded through the scan.
enum Fence {
    Outside,
    Inside { language: String, content: String },
}

/// Classify every line of `content`.
#[tracing::instrument(skip_all, fields(input_len = content.len()))]
pub fn classify(content: &str) -> ContentBreakdown {
    let mut breakdown = ContentBreakdown::default();
    let mut fence = Fence::Outside;

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix(FENCE) {
            fence = match fence {
                Fence::Outside => Fence::Inside {
                    language: rest.trim().to_lowercase(),
                    content: String::new(),
                },
                Fence::Inside { language, content } => {
                    let word_count = text::count_words(&content);
                    breakdown.code_blocks.push(CodeBlock {
                        language,
                        content,
                        word_count,
                    });
                    Fence::Outside
                }
            };
            continue;
        }

        if let Fence::Inside { content, .. } = &mut fence {
            content.push_str(line);
            content.push('\n');
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let bucket = if trimmed.starts_with('#') {
            &mut breakdown.headers
        } else if LIST_ITEM.is_match(line) {
            &mut breakdown.lists
        } else if line.contains('|') {
            &mut breakdown.tables
        } else {
            &mut breakdown.text
        };
        bucket.push(trimmed.to_string());
    }

    if let Fence::Inside { language, .. } = fence {
        tracing::debug!(%language, "dropping unterminated code fence");
    }

    tracing::debug!(
        text = breakdown.text.len(),
        code_blocks = breakdown.code_blocks.len(),
        headers = breakdown.headers.len(),
        lists = breakdown.lists.len(),
        tables = breakdown.tables.len(),
        "content classified"
    );
    breakdown
}
