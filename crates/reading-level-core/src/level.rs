//! Reading-level classification.
//!
//! The grade level picks a base tier. Each red flag (dense jargon, complex
//! code, long sentences) then escalates one tier from wherever the document
//! currently sits, capped at [`Level::Advanced`]. Flags compound.

use serde::{Deserialize, Serialize};

use crate::complexity::ComplexityMetrics;

/// Grade levels at or below this are [`Level::Beginner`].
pub const BEGINNER_MAX_GRADE: f64 = 12.0;
/// Grade levels at or below this (and above beginner) are [`Level::Intermediate`].
pub const INTERMEDIATE_MAX_GRADE: f64 = 16.0;
/// Technical density (percent) above which a document escalates.
pub const HIGH_DENSITY: f64 = 20.0;
/// Technical density (percent) below which density is reported as low.
pub const LOW_DENSITY: f64 = 10.0;
/// Average sentence length above which a document escalates.
pub const LONG_SENTENCE_WORDS: f64 = 20.0;

/// Three-tier reading level, ordered from easiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Accessible to newcomers.
    Beginner,
    /// Assumes some background.
    Intermediate,
    /// Assumes substantial background.
    Advanced,
}

impl Level {
    /// All levels, easiest first.
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Move one tier harder, staying at [`Level::Advanced`] once there.
    #[must_use]
    pub const fn escalate(self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate | Self::Advanced => Self::Advanced,
        }
    }

    /// Display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Marker shown next to the level in the info box.
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Beginner => "🟢",
            Self::Intermediate => "🟡",
            Self::Advanced => "🔴",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flesch Reading Ease band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleschBand {
    /// 70 and up.
    VeryEasy,
    /// 60 to below 70.
    Easy,
    /// 50 to below 60.
    FairlyEasy,
    /// 30 to below 50.
    FairlyDifficult,
    /// 10 to below 30.
    Difficult,
    /// Below 10.
    VeryDifficult,
}

impl FleschBand {
    /// Band for a Reading Ease score; lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::VeryEasy
        } else if score >= 60.0 {
            Self::Easy
        } else if score >= 50.0 {
            Self::FairlyEasy
        } else if score >= 30.0 {
            Self::FairlyDifficult
        } else if score >= 10.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }

    /// Display name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::FairlyEasy => "Fairly Easy",
            Self::FairlyDifficult => "Fairly Difficult",
            Self::Difficult => "Difficult",
            Self::VeryDifficult => "Very Difficult",
        }
    }
}

impl std::fmt::Display for FleschBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingLevel {
    /// Final tier after escalation.
    pub level: Level,
    /// Justifications, in the order the rules fired.
    pub reasoning: Vec<String>,
    /// Band for the Flesch Reading Ease score.
    pub flesch_interpretation: FleschBand,
}

/// Classify a document from its complexity metrics.
#[tracing::instrument(skip_all, fields(grade = metrics.grade_level))]
pub fn classify(metrics: &ComplexityMetrics) -> ReadingLevel {
    let mut reasoning = Vec::new();
    let grade = metrics.grade_level;

    let mut level = if grade <= BEGINNER_MAX_GRADE {
        reasoning.push(format!("Grade level {grade:.1} indicates accessible language"));
        Level::Beginner
    } else if grade <= INTERMEDIATE_MAX_GRADE {
        reasoning.push(format!("Grade level {grade:.1} indicates moderate complexity"));
        Level::Intermediate
    } else {
        reasoning.push(format!("Grade level {grade:.1} indicates complex language"));
        Level::Advanced
    };

    let density = metrics.technical_density;
    if density > HIGH_DENSITY {
        level = level.escalate();
        reasoning.push(format!("High technical density ({density:.1}%)"));
    } else if density < LOW_DENSITY {
        reasoning.push(format!("Low technical density ({density:.1}%)"));
    }

    if metrics.has_complex_code {
        level = level.escalate();
        reasoning.push("Contains complex code examples".to_string());
    }

    let avg = metrics.avg_words_per_sentence;
    if avg > LONG_SENTENCE_WORDS {
        level = level.escalate();
        reasoning.push(format!("Long sentences (avg {avg:.1} words)"));
    }

    tracing::debug!(level = level.as_str(), "reading level classified");
    ReadingLevel {
        level,
        reasoning,
        flesch_interpretation: FleschBand::from_score(metrics.flesch_score),
    }
}
