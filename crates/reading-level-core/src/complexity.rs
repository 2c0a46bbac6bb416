//! Complexity scoring: word/sentence statistics, technical density, and
//! the Flesch Reading Ease / Flesch-Kincaid Grade Level formulas.
//!
//! Only headings, prose, and list items are scored. Code blocks and tables
//! are left out so that examples and data do not skew readability.
//!
//! Formulas:
//! - Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//! - Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Sentence and word denominators are floored at 1, so empty documents
//! score without dividing by zero.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::content::ContentBreakdown;
use crate::text::{self, round1};
use crate::vocabulary::{SIMPLE_CODE_LANGUAGES, TECHNICAL_TERMS};

static VOWEL_CLUSTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

/// Readability and density statistics for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Words in the scored text.
    pub total_words: usize,
    /// Non-empty fragments between `.`, `!`, `?` runs.
    pub sentences: usize,
    /// `total_words / sentences`, one decimal.
    pub avg_words_per_sentence: f64,
    /// Matched vocabulary entries per hundred words, one decimal.
    pub technical_density: f64,
    /// Number of distinct vocabulary entries present.
    pub technical_terms: usize,
    /// The vocabulary entries present, in vocabulary order.
    pub unique_technical_terms: Vec<String>,
    /// Flesch Reading Ease, one decimal.
    pub flesch_score: f64,
    /// Flesch-Kincaid Grade Level, one decimal.
    pub grade_level: f64,
    /// Number of fenced code blocks.
    pub code_blocks: usize,
    /// Any code block tagged with a language outside json/yaml/yml/http.
    pub has_complex_code: bool,
}

/// Build the lower-cased text that readability is scored on.
///
/// Headings come first: they carry no terminal punctuation, so they run
/// into the following sentence instead of forming a trailing fragment.
pub fn analysis_text(breakdown: &ContentBreakdown) -> String {
    breakdown
        .headers
        .iter()
        .chain(&breakdown.text)
        .chain(&breakdown.lists)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Score a classified document.
#[tracing::instrument(skip_all)]
pub fn score(breakdown: &ContentBreakdown) -> ComplexityMetrics {
    let text = analysis_text(breakdown);

    let sentences = text::split_sentences(&text).len();
    let total_words = text::count_words(&text);
    let unique_technical_terms = find_technical_terms(&text);
    let technical_terms = unique_technical_terms.len();
    let syllables = count_syllables(&text);

    let sentence_divisor = sentences.max(1) as f64;
    let word_divisor = total_words.max(1) as f64;
    let words_per_sentence = total_words as f64 / sentence_divisor;
    let syllables_per_word = syllables as f64 / word_divisor;

    let flesch = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    let grade = 0.39f64.mul_add(words_per_sentence, 11.8 * syllables_per_word) - 15.59;

    let has_complex_code = breakdown
        .code_blocks
        .iter()
        .any(|b| !SIMPLE_CODE_LANGUAGES.contains(b.language.as_str()));

    let metrics = ComplexityMetrics {
        total_words,
        sentences,
        avg_words_per_sentence: round1(words_per_sentence),
        technical_density: round1(technical_terms as f64 / word_divisor * 100.0),
        technical_terms,
        unique_technical_terms,
        flesch_score: round1(flesch),
        grade_level: round1(grade),
        code_blocks: breakdown.code_blocks.len(),
        has_complex_code,
    };
    tracing::debug!(
        words = metrics.total_words,
        sentences = metrics.sentences,
        syllables,
        grade = metrics.grade_level,
        density = metrics.technical_density,
        "complexity scored"
    );
    metrics
}

/// Vocabulary entries contained anywhere in `text`, each at most once.
fn find_technical_terms(text: &str) -> Vec<String> {
    TECHNICAL_TERMS
        .iter()
        .filter(|term| text.contains(*term))
        .map(|term| (*term).to_string())
        .collect()
}

/// Sum of approximate syllables over all alphabetic words.
fn count_syllables(text: &str) -> usize {
    text::alphabetic_words(text).map(syllables_in_word).sum()
}

/// Approximate syllables: vowel clusters, minus one for a trailing `e`, at least 1.
pub fn syllables_in_word(word: &str) -> usize {
    let mut clusters = VOWEL_CLUSTER.find_iter(word).count();
    if word.ends_with('e') {
        clusters = clusters.saturating_sub(1);
    }
    clusters.max(1)
}
