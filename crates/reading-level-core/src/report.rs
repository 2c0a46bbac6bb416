//! Presentation: prerequisites, key topics, the info box, and suggestions.

use serde::{Deserialize, Serialize};

use crate::complexity::ComplexityMetrics;
use crate::level::{Level, ReadingLevel};
use crate::reading_time::ReadingTime;
use crate::vocabulary::{ADVANCED_CONCEPTS, DEFAULT_TOPIC, TOPIC_KEYWORDS};

/// Most topics listed in an info box.
pub const MAX_TOPICS: usize = 3;

/// Suggested background knowledge for a level.
pub fn prerequisites(level: Level, metrics: &ComplexityMetrics) -> &'static str {
    match level {
        Level::Beginner => "Basic HTTP knowledge",
        Level::Intermediate if has_advanced_concepts(metrics) => {
            "HTTP fundamentals, basic API experience"
        }
        Level::Intermediate => "Basic REST API knowledge",
        Level::Advanced => "Strong API background, experience with complex systems",
    }
}

fn has_advanced_concepts(metrics: &ComplexityMetrics) -> bool {
    metrics
        .unique_technical_terms
        .iter()
        .any(|term| ADVANCED_CONCEPTS.contains(&term.as_str()))
}

/// Distinct topics implied by the matched technical terms, at most [`MAX_TOPICS`].
///
/// Falls back to a single default topic when no matched term maps to one.
pub fn key_topics(metrics: &ComplexityMetrics) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for (keyword, topic) in TOPIC_KEYWORDS {
        let matched = metrics.unique_technical_terms.iter().any(|t| t == keyword);
        if matched && !topics.iter().any(|t| t == topic) {
            topics.push((*topic).to_string());
        }
    }
    topics.truncate(MAX_TOPICS);
    if topics.is_empty() {
        topics.push(DEFAULT_TOPIC.to_string());
    }
    topics
}

/// `"1 minute"` or `"N minutes"`.
pub fn format_minutes(minutes: u32) -> String {
    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}

/// Render the reading-guide block shown at the top of a document.
pub fn render_info_box(
    reading_time: &ReadingTime,
    level: &ReadingLevel,
    metrics: &ComplexityMetrics,
    topics: &[String],
) -> String {
    format!(
        "> **📖 Reading Guide**\n\
         >\n\
         > **⏱️ Reading time:** {time} | **{emoji} Level:** {level}\n\
         >\n\
         > **📋 Prerequisites:** {prereqs}\n\
         >\n\
         > **🎯 Key topics:** {topics}\n\
         >\n\
         > **📊 Complexity:** {grade:.1} grade level • {density:.1}% technical density • {ease}\n",
        time = format_minutes(reading_time.minutes),
        emoji = level.level.emoji(),
        level = level.level,
        prereqs = prerequisites(level.level, metrics),
        topics = topics.join(", "),
        grade = metrics.grade_level,
        density = metrics.technical_density,
        ease = level.flesch_interpretation.as_str().to_lowercase(),
    )
}

/// A concrete way to make a document easier to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    /// Grade level above 16.
    ShortenSentences,
    /// Average sentence above 20 words.
    LongAverageSentence,
    /// Technical density above 25%.
    DefineTerms,
    /// Reading Ease below 30.
    SimplifyLanguage,
    /// Advanced document with more than 10 code blocks.
    ConsolidateExamples,
}

impl Suggestion {
    /// Human-readable advice.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ShortenSentences => {
                "Consider breaking long sentences into shorter ones to lower the grade level"
            }
            Self::LongAverageSentence => {
                "Average sentence length is long; aim for fewer than 20 words per sentence"
            }
            Self::DefineTerms => "Define technical terms on first use or link to a glossary",
            Self::SimplifyLanguage => "Simplify word choice; the text reads as very difficult",
            Self::ConsolidateExamples => {
                "Consider consolidating code examples or moving some to an appendix"
            }
        }
    }
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Every suggestion that applies, in a fixed order.
pub fn suggestions(metrics: &ComplexityMetrics, level: Level) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if metrics.grade_level > 16.0 {
        out.push(Suggestion::ShortenSentences);
    }
    if metrics.avg_words_per_sentence > 20.0 {
        out.push(Suggestion::LongAverageSentence);
    }
    if metrics.technical_density > 25.0 {
        out.push(Suggestion::DefineTerms);
    }
    if metrics.flesch_score < 30.0 {
        out.push(Suggestion::SimplifyLanguage);
    }
    if level == Level::Advanced && metrics.code_blocks > 10 {
        out.push(Suggestion::ConsolidateExamples);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::FleschBand;
    use crate::reading_time::TimeBreakdown;

    fn metrics() -> ComplexityMetrics {
        ComplexityMetrics {
            total_words: 200,
            sentences: 20,
            avg_words_per_sentence: 10.0,
            technical_density: 5.0,
            technical_terms: 0,
            unique_technical_terms: Vec::new(),
            flesch_score: 65.0,
            grade_level: 8.0,
            code_blocks: 0,
            has_complex_code: false,
        }
    }

    fn level(level: Level) -> ReadingLevel {
        ReadingLevel {
            level,
            reasoning: Vec::new(),
            flesch_interpretation: FleschBand::FairlyEasy,
        }
    }

    fn minutes(minutes: u32) -> ReadingTime {
        ReadingTime {
            minutes,
            breakdown: TimeBreakdown::default(),
        }
    }

    #[test]
    fn minute_pluralization() {
        assert_eq!(format_minutes(1), "1 minute");
        assert_eq!(format_minutes(2), "2 minutes");
        assert_eq!(format_minutes(0), "0 minutes");
    }

    #[test]
    fn prerequisites_by_level() {
        let mut m = metrics();
        assert_eq!(prerequisites(Level::Beginner, &m), "Basic HTTP knowledge");
        assert_eq!(prerequisites(Level::Intermediate, &m), "Basic REST API knowledge");
        m.unique_technical_terms = vec!["circuit breaker".to_string()];
        assert_eq!(
            prerequisites(Level::Intermediate, &m),
            "HTTP fundamentals, basic API experience"
        );
        assert!(prerequisites(Level::Advanced, &m).starts_with("Strong API background"));
    }

    fn with_terms(terms: &[&str]) -> ComplexityMetrics {
        ComplexityMetrics {
            technical_terms: terms.len(),
            unique_technical_terms: terms.iter().map(|t| (*t).to_string()).collect(),
            ..metrics()
        }
    }

    #[test]
    fn topics_are_distinct_and_capped() {
        let m = with_terms(&["oauth", "jwt", "cors", "hateoas", "pagination"]);
        assert_eq!(key_topics(&m), vec!["Authentication", "Security", "REST"]);
    }

    #[test]
    fn topics_default_when_nothing_matches() {
        assert_eq!(key_topics(&metrics()), vec![DEFAULT_TOPIC]);
        // Matched terms without a topic mapping also fall back.
        assert_eq!(key_topics(&with_terms(&["api", "json"])), vec![DEFAULT_TOPIC]);
    }

    #[test]
    fn topics_come_only_from_matched_terms() {
        let m = with_terms(&["streaming", "openapi"]);
        assert_eq!(key_topics(&m), vec!["Architecture", "Documentation"]);
    }

    #[test]
    fn info_box_contents() {
        let rendered = render_info_box(
            &minutes(1),
            &level(Level::Intermediate),
            &metrics(),
            &["Security".to_string(), "Data".to_string()],
        );
        assert!(rendered.contains("Reading time:** 1 minute |"));
        assert!(rendered.contains("🟡 Level:** Intermediate"));
        assert!(rendered.contains("Prerequisites:** Basic REST API knowledge"));
        assert!(rendered.contains("Key topics:** Security, Data"));
        assert!(rendered.contains("8.0 grade level • 5.0% technical density • fairly easy"));

        let plural = render_info_box(&minutes(2), &level(Level::Beginner), &metrics(), &[]);
        assert!(plural.contains("2 minutes"));
        assert!(plural.contains("🟢"));
    }

    #[test]
    fn no_suggestions_for_easy_text() {
        assert!(suggestions(&metrics(), Level::Beginner).is_empty());
    }

    #[test]
    fn all_suggestions_fire() {
        let m = ComplexityMetrics {
            grade_level: 18.0,
            avg_words_per_sentence: 24.0,
            technical_density: 30.0,
            flesch_score: 12.0,
            code_blocks: 11,
            ..metrics()
        };
        assert_eq!(
            suggestions(&m, Level::Advanced),
            vec![
                Suggestion::ShortenSentences,
                Suggestion::LongAverageSentence,
                Suggestion::DefineTerms,
                Suggestion::SimplifyLanguage,
                Suggestion::ConsolidateExamples,
            ]
        );
        // Many code blocks only matter for advanced documents.
        assert!(!suggestions(&m, Level::Intermediate).contains(&Suggestion::ConsolidateExamples));
    }
}
