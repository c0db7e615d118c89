//! Validation Pipeline
//!
//! Runs every analyzer over one message and assembles a [`ValidationSummary`].

use shoe_assistant_core::{ProblemCategory, ValidationSummary};

use crate::classifier::ProblemClassifier;
use crate::composer::ResponseComposer;
use crate::entities::EntityExtractor;
use crate::sentiment::SentimentAnalyzer;
use crate::urgency::UrgencyScorer;

/// Unclassified messages longer than this are still accepted
const MIN_UNCLASSIFIED_LENGTH: usize = 10;

/// Message validation pipeline
pub struct ValidationPipeline {
    sentiment: SentimentAnalyzer,
    classifier: ProblemClassifier,
    urgency: UrgencyScorer,
    entities: EntityExtractor,
    composer: ResponseComposer,
}

impl ValidationPipeline {
    pub fn new() -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
            classifier: ProblemClassifier::new(),
            urgency: UrgencyScorer::new(),
            entities: EntityExtractor::new(),
            composer: ResponseComposer::new(),
        }
    }

    /// Produce the validation summary for a message
    pub fn validate(&self, text: &str) -> ValidationSummary {
        let sentiment = self.sentiment.analyze(text);
        let problem = self.classifier.classify(text);
        let urgency = self.urgency.score(text, &sentiment, problem.category);
        let entities = self.entities.extract(text);

        let summary = self.composer.summary_text(
            problem.category,
            sentiment.level,
            urgency.level,
            &entities,
        );
        let suggested_response =
            self.composer
                .suggested_response(problem.category, sentiment.level, &entities);
        let recommended_actions =
            self.composer
                .recommended_actions(problem.category, urgency.level, sentiment.level);

        let is_valid = problem.category != ProblemCategory::GeneralInquiry
            || text.chars().count() > MIN_UNCLASSIFIED_LENGTH;

        tracing::debug!(
            category = %problem.category,
            confidence = problem.confidence,
            sentiment = %sentiment.level,
            urgency = %urgency.level,
            entities = entities.len(),
            "Validated message"
        );

        ValidationSummary {
            is_valid,
            problem_category: problem.category,
            problem_confidence: problem.confidence,
            sentiment,
            urgency,
            entities,
            recommended_actions,
            summary,
            suggested_response,
        }
    }

    pub fn classifier(&self) -> &ProblemClassifier {
        &self.classifier
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoe_assistant_core::{SentimentLevel, UrgencyLevel};

    #[test]
    fn test_refund_complaint() {
        let pipeline = ValidationPipeline::new();
        let text = "This is absolutely unacceptable, I want a refund now, order #XY7788Z";
        let summary = pipeline.validate(text);

        let expected = pipeline.classifier().classify(text).category;
        assert_eq!(summary.problem_category, expected);
        assert!(matches!(
            summary.problem_category,
            ProblemCategory::OrderIssues | ProblemCategory::PaymentBilling
        ));
        assert_eq!(summary.sentiment.level, SentimentLevel::VeryNegative);
        assert!(summary.urgency.level >= UrgencyLevel::High);
        assert_eq!(summary.entities.order_number.as_deref(), Some("XY7788Z"));
        assert!(summary.summary.contains("Order: XY7788Z"));
        assert!(summary.suggested_response.starts_with("I sincerely apologize"));
        assert!(summary.is_valid);
    }

    #[test]
    fn test_validity_rule() {
        let pipeline = ValidationPipeline::new();

        let short = pipeline.validate("hey");
        assert_eq!(short.problem_category, ProblemCategory::GeneralInquiry);
        assert!(!short.is_valid);

        let long = pipeline.validate("Hi, I have a question about my shoes");
        assert_eq!(long.problem_category, ProblemCategory::GeneralInquiry);
        assert!(long.is_valid);

        let classified = pipeline.validate("what size?");
        assert_eq!(classified.problem_category, ProblemCategory::SizeFit);
        assert!(classified.is_valid);
    }

    #[test]
    fn test_empty_text() {
        let pipeline = ValidationPipeline::new();
        let summary = pipeline.validate("");

        assert_eq!(summary.problem_category, ProblemCategory::GeneralInquiry);
        assert_eq!(summary.sentiment.level, SentimentLevel::Neutral);
        assert_eq!(summary.urgency.level, UrgencyLevel::Low);
        assert!(summary.entities.is_empty());
    }
}
