//! Urgency Scoring
//!
//! Combines time-critical wording, sentiment and problem category.

use regex::Regex;

use shoe_assistant_core::{ProblemCategory, SentimentLevel, SentimentResult, UrgencyLevel, UrgencyResult};

use crate::sentiment::URGENCY_WORDS;

/// Urgency scorer
pub struct UrgencyScorer {
    time_patterns: Vec<Regex>,
}

impl UrgencyScorer {
    pub fn new() -> Self {
        let time_patterns = [
            r"(?i)need\s+(?:it|them|these|this)\s+by\s+(?:tomorrow|tonight|today|friday|saturday|sunday|monday|the\s+weekend)",
            r"(?i)(?:event|wedding|party|trip|race|marathon|interview|game)\s+(?:is\s+)?(?:tomorrow|tonight|this\s+weekend)",
            r"(?i)gift\s+for\s+(?:tonight|tomorrow|today)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();

        Self { time_patterns }
    }

    /// Score how quickly a message needs an answer
    pub fn score(
        &self,
        text: &str,
        sentiment: &SentimentResult,
        category: ProblemCategory,
    ) -> UrgencyResult {
        let lower = text.to_lowercase();
        let mut score = 0i32;

        score += 3 * URGENCY_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;

        if category.is_sensitive() {
            score += 2;
        }

        score += match sentiment.level {
            SentimentLevel::VeryNegative => 3,
            SentimentLevel::Negative => 1,
            _ => 0,
        };

        score += 2 * self.time_patterns.iter().filter(|p| p.is_match(text)).count() as i32;

        UrgencyResult::new(Self::level_for(score), score)
    }

    fn level_for(score: i32) -> UrgencyLevel {
        match score {
            s if s >= 5 => UrgencyLevel::Critical,
            s if s >= 3 => UrgencyLevel::High,
            s if s >= 1 => UrgencyLevel::Medium,
            _ => UrgencyLevel::Low,
        }
    }
}

impl Default for UrgencyScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentiment(level: SentimentLevel) -> SentimentResult {
        SentimentResult {
            level,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_question_is_low() {
        let scorer = UrgencyScorer::new();
        let result = scorer.score(
            "Do you sell trail shoes?",
            &sentiment(SentimentLevel::Neutral),
            ProblemCategory::GeneralInquiry,
        );

        assert_eq!(result.score, 0);
        assert_eq!(result.level, UrgencyLevel::Low);
        assert_eq!(result.estimated_response_time, "24 hours");
    }

    #[test]
    fn test_sensitive_category_adds_two() {
        let scorer = UrgencyScorer::new();
        let result = scorer.score(
            "My card was declined",
            &sentiment(SentimentLevel::Neutral),
            ProblemCategory::PaymentBilling,
        );

        assert_eq!(result.score, 2);
        assert_eq!(result.level, UrgencyLevel::Medium);
    }

    #[test]
    fn test_critical_combination() {
        let scorer = UrgencyScorer::new();
        let result = scorer.score(
            "This is urgent, my account is locked and I need help immediately",
            &sentiment(SentimentLevel::Neutral),
            ProblemCategory::AccountAccess,
        );

        assert_eq!(result.score, 8);
        assert_eq!(result.level, UrgencyLevel::Critical);
        assert_eq!(result.estimated_response_time, "15 minutes");
    }

    #[test]
    fn test_time_sensitive_patterns() {
        let scorer = UrgencyScorer::new();
        let result = scorer.score(
            "I need them by Friday, my wedding is this weekend",
            &sentiment(SentimentLevel::Negative),
            ProblemCategory::ShippingDelivery,
        );

        // two patterns plus negative sentiment
        assert_eq!(result.score, 5);
        assert_eq!(result.level, UrgencyLevel::Critical);
    }
}
