//! Reading-time estimation from a [`ContentBreakdown`].
//!
//! Each category is read at its own speed (words per minute); the total is
//! the ceiling of the summed fractional minutes. The three-way display
//! breakdown is rounded independently and uses the list speed for "other",
//! so it need not add up to the total.

use serde::{Deserialize, Serialize};

use crate::content::ContentBreakdown;
use crate::text::count_words;
use crate::vocabulary::DATA_CODE_LANGUAGES;

/// Prose reading speed.
pub const TEXT_WPM: f64 = 250.0;
/// Speed for code that is not JSON/YAML.
pub const CODE_WPM: f64 = 100.0;
/// Speed for JSON/YAML code blocks.
pub const DATA_CODE_WPM: f64 = 180.0;
/// Speed for list items.
pub const LIST_WPM: f64 = 300.0;
/// Speed for headings.
pub const HEADER_WPM: f64 = 400.0;
/// Speed for table rows: midway between prose and lists.
pub const TABLE_WPM: f64 = (TEXT_WPM + LIST_WPM) / 2.0;

/// Estimated reading time for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTime {
    /// Authoritative total, rounded up.
    pub minutes: u32,
    /// Display breakdown, each part rounded up on its own.
    pub breakdown: TimeBreakdown,
}

/// Per-category minutes for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    /// Prose minutes.
    pub text: u32,
    /// Code minutes at the general code speed.
    pub code: u32,
    /// Lists, headers, and tables at the list speed.
    pub other: u32,
}

/// Estimate reading time for a classified document.
#[tracing::instrument(skip_all)]
pub fn estimate(breakdown: &ContentBreakdown) -> ReadingTime {
    let text_words = count_words(&breakdown.text.join(" "));
    let list_words = count_words(&breakdown.lists.join(" "));
    let header_words = count_words(&breakdown.headers.join(" "));
    let table_words = count_words(&breakdown.tables.join(" "));

    let mut total = text_words as f64 / TEXT_WPM;
    let mut code_words = 0usize;
    for block in &breakdown.code_blocks {
        let speed = if DATA_CODE_LANGUAGES.contains(block.language.as_str()) {
            DATA_CODE_WPM
        } else {
            CODE_WPM
        };
        total += block.word_count as f64 / speed;
        code_words += block.word_count;
    }
    total += list_words as f64 / LIST_WPM;
    total += header_words as f64 / HEADER_WPM;
    total += table_words as f64 / TABLE_WPM;

    let other_words = list_words + header_words + table_words;
    let reading_time = ReadingTime {
        minutes: ceil_minutes(total),
        breakdown: TimeBreakdown {
            text: ceil_minutes(text_words as f64 / TEXT_WPM),
            code: ceil_minutes(code_words as f64 / CODE_WPM),
            other: ceil_minutes(other_words as f64 / LIST_WPM),
        },
    };
    tracing::debug!(
        minutes = reading_time.minutes,
        text_words,
        code_words,
        other_words,
        "reading time estimated"
    );
    reading_time
}

fn ceil_minutes(minutes: f64) -> u32 {
    minutes.ceil() as u32
}
