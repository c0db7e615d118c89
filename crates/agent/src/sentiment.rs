//! Sentiment Analysis
//!
//! Keyword and phrase scoring of customer messages.

use shoe_assistant_core::{SentimentLevel, SentimentResult};

/// Phrases that immediately mark a message as very negative
const VERY_NEGATIVE_PHRASES: &[&str] = &[
    "never again",
    "want my money back",
    "worst experience",
    "absolutely terrible",
    "completely unacceptable",
    "absolutely unacceptable",
    "total scam",
    "never buying",
    "never shopping here",
    "worst service",
    "disgusted",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "poor",
    "disappointed",
    "disappointing",
    "frustrated",
    "frustrating",
    "angry",
    "upset",
    "annoyed",
    "unacceptable",
    "broken",
    "damaged",
    "defective",
    "wrong",
    "delayed",
    "missing",
    "never arrived",
    "hate",
    "useless",
    "ridiculous",
    "waste",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "happy",
    "thanks",
    "thank you",
    "perfect",
    "awesome",
    "wonderful",
    "satisfied",
    "comfortable",
    "nice",
    "helpful",
    "pleased",
];

/// Words that make any message time-critical
pub(crate) const URGENCY_WORDS: &[&str] = &[
    "urgent",
    "asap",
    "emergency",
    "immediately",
    "right now",
    "today",
];

/// Score at which the phrase short-circuit lands
const VERY_NEGATIVE_SCORE: i32 = -10;

/// Sentiment analyzer
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a message
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let lower = text.to_lowercase();

        if VERY_NEGATIVE_PHRASES.iter().any(|p| lower.contains(p)) {
            return SentimentResult {
                level: SentimentLevel::VeryNegative,
                score: VERY_NEGATIVE_SCORE,
                negative_count: 0,
                positive_count: 0,
                requires_immediate_attention: true,
            };
        }

        let mut score = 0i32;
        let mut negative_count = 0u32;
        let mut positive_count = 0u32;

        for keyword in NEGATIVE_KEYWORDS {
            if lower.contains(keyword) {
                score -= 2;
                negative_count += 1;
            }
        }

        for keyword in POSITIVE_KEYWORDS {
            if lower.contains(keyword) {
                score += 1;
                positive_count += 1;
            }
        }

        let has_urgency = URGENCY_WORDS.iter().any(|w| lower.contains(w));
        let level = Self::level_for(score, negative_count, positive_count);

        SentimentResult {
            level,
            score,
            negative_count,
            positive_count,
            requires_immediate_attention: level == SentimentLevel::VeryNegative || has_urgency,
        }
    }

    fn level_for(score: i32, negative_count: u32, positive_count: u32) -> SentimentLevel {
        if score <= -8 || negative_count >= 5 {
            SentimentLevel::VeryNegative
        } else if score <= -4 || negative_count >= 3 {
            SentimentLevel::Negative
        } else if score >= 4 || positive_count >= 3 {
            SentimentLevel::VeryPositive
        } else if score >= 1 || positive_count >= 1 {
            SentimentLevel::Positive
        } else {
            SentimentLevel::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_short_circuit() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("Great shoes but NEVER AGAIN, thank you, love it");

        assert_eq!(result.level, SentimentLevel::VeryNegative);
        assert_eq!(result.score, -10);
        assert!(result.requires_immediate_attention);
    }

    #[test]
    fn test_negative_keywords_accumulate() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("The box was damaged and the shoe is broken");

        assert_eq!(result.negative_count, 2);
        assert_eq!(result.score, -4);
        assert_eq!(result.level, SentimentLevel::Negative);
        assert!(!result.requires_immediate_attention);
    }

    #[test]
    fn test_positive_levels() {
        let analyzer = SentimentAnalyzer::new();

        let result = analyzer.analyze("These are nice");
        assert_eq!(result.level, SentimentLevel::Positive);

        let result = analyzer.analyze("Amazing, comfortable and perfect. Thanks!");
        assert_eq!(result.positive_count, 4);
        assert_eq!(result.level, SentimentLevel::VeryPositive);
    }

    #[test]
    fn test_empty_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        for text in ["", "   ", "\n\t"] {
            let result = analyzer.analyze(text);
            assert_eq!(result.level, SentimentLevel::Neutral);
            assert_eq!(result.score, 0);
            assert!(!result.requires_immediate_attention);
        }
    }

    #[test]
    fn test_urgency_word_requires_attention() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("Please reply asap");

        assert_eq!(result.level, SentimentLevel::Neutral);
        assert!(result.requires_immediate_attention);
    }
}
