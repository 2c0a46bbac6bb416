//! Text processing primitives shared by every scoring stage.
//!
//! Word counting here is the single counting rule for the whole crate:
//! reading time, density, and readability all agree on what a word is.

use regex::Regex;
use std::sync::LazyLock;

/// Maximal runs of ASCII word characters.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9_]+").expect("valid regex"));

/// Runs of sentence-terminating punctuation.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Lowercase alphabetic tokens, used for syllable counting.
static ALPHA_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").expect("valid regex"));

/// Count words as maximal runs of `[a-zA-Z0-9_]`.
///
/// `"hello, world! 123"` has three words.
pub fn count_words(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}

/// Split text on runs of `.`, `!`, `?`, dropping blank fragments.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Extract lowercase alphabetic tokens. Expects already lower-cased input.
pub fn alphabetic_words(text: &str) -> impl Iterator<Item = &str> {
    ALPHA_WORD.find_iter(text).map(|m| m.as_str())
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
