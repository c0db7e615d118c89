//! Conversation Pattern Analysis
//!
//! Detects escalation, repetition and topic churn over a session and decides
//! whether a human needs to take over.

use shoe_assistant_core::{
    ConversationState, MessageRecord, PatternAnalysis, SentimentTrend, UrgencyLevel,
};

/// Pattern analyzer configuration
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Recent messages compared for escalation and sentiment trend
    pub window: usize,
    /// Similarity above which two messages count as a repeat
    pub repetition_threshold: f64,
    /// Topic changes that require a human
    pub max_topic_changes: usize,
    /// Average sentiment at or below which a human is required
    pub sentiment_floor: f64,
    /// HIGH/CRITICAL problems that require a human
    pub max_priority_problems: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            window: 3,
            repetition_threshold: 0.8,
            max_topic_changes: 3,
            sentiment_floor: -5.0,
            max_priority_problems: 2,
        }
    }
}

/// Pattern analyzer
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: PatternConfig,
}

impl PatternAnalyzer {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Analyze a conversation
    pub fn analyze(&self, state: &ConversationState) -> PatternAnalysis {
        if state.messages.len() < 2 {
            return PatternAnalysis::default();
        }

        let window: Vec<&MessageRecord> = state.recent_messages(self.config.window).collect();
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return PatternAnalysis::default();
        };
        let (first, last) = (&first.validation, &last.validation);

        let is_escalating = last.urgency.score > first.urgency.score + 2;

        let first_sentiment = first.sentiment.score;
        let last_sentiment = last.sentiment.score;
        let sentiment_trend = if last_sentiment < first_sentiment - 3 {
            SentimentTrend::Declining
        } else if last_sentiment > first_sentiment + 2 {
            SentimentTrend::Improving
        } else {
            SentimentTrend::Stable
        };

        let is_repetitive = self.is_repetitive(state);
        let topic_changes = Self::topic_changes(state);
        let average_sentiment = Self::average_sentiment(state);

        let priority_problems = state
            .problem_history
            .iter()
            .filter(|p| matches!(p.urgency, UrgencyLevel::High | UrgencyLevel::Critical))
            .count();

        let requires_human_intervention = is_escalating
            || is_repetitive
            || topic_changes >= self.config.max_topic_changes
            || average_sentiment <= self.config.sentiment_floor
            || priority_problems >= self.config.max_priority_problems;

        PatternAnalysis {
            is_escalating,
            is_repetitive,
            requires_human_intervention,
            topic_changes,
            average_sentiment,
            sentiment_trend,
        }
    }

    /// The latest message closely matches any earlier one
    fn is_repetitive(&self, state: &ConversationState) -> bool {
        let Some(latest) = state.messages.back() else {
            return false;
        };
        let latest = latest.text.to_lowercase();

        state
            .messages
            .iter()
            .take(state.messages.len() - 1)
            .any(|m| similarity(&latest, &m.text.to_lowercase()) > self.config.repetition_threshold)
    }

    /// Adjacent message pairs whose problem category differs
    fn topic_changes(state: &ConversationState) -> usize {
        state
            .messages
            .iter()
            .zip(state.messages.iter().skip(1))
            .filter(|(a, b)| a.validation.problem_category != b.validation.problem_category)
            .count()
    }

    fn average_sentiment(state: &ConversationState) -> f64 {
        if state.sentiment_trend.is_empty() {
            return 0.0;
        }
        let total: i64 = state.sentiment_trend.iter().map(|p| p.score as i64).sum();
        total as f64 / state.sentiment_trend.len() as f64
    }
}

/// Normalized Levenshtein similarity in [0, 1]
///
/// Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shoe_assistant_core::{ProblemCategory, ProblemRecord, SentimentPoint};

    use crate::validation::ValidationPipeline;

    fn state_with(messages: &[&str]) -> ConversationState {
        let pipeline = ValidationPipeline::new();
        let now = Utc::now();
        let mut state = ConversationState::new("s1", now);

        for text in messages {
            let validation = pipeline.validate(text);
            state.problem_history.push_back(ProblemRecord {
                category: validation.problem_category,
                timestamp: now,
                urgency: validation.urgency.level,
                sentiment: validation.sentiment.level,
            });
            state.sentiment_trend.push_back(SentimentPoint {
                level: validation.sentiment.level,
                score: validation.sentiment.score,
                timestamp: now,
            });
            state.messages.push_back(MessageRecord {
                text: text.to_string(),
                timestamp: now,
                validation,
            });
        }
        state
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert!((similarity("kitten", "sitting") - (4.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_single_message_defaults() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&["This is urgent, the worst experience ever, I need help immediately"]);

        let analysis = analyzer.analyze(&state);
        assert_eq!(analysis, PatternAnalysis::default());
    }

    #[test]
    fn test_escalating_urgency() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "Hi, I have a question about my shoes",
            "I was charged twice on my credit card for the payment",
            "This is urgent, my account is locked and I need help immediately",
        ]);

        let analysis = analyzer.analyze(&state);
        assert!(analysis.is_escalating);
        assert!(analysis.requires_human_intervention);
    }

    #[test]
    fn test_repeated_message() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "My sneakers arrived with a broken sole",
            "my sneakers arrived with a broken sole!",
        ]);

        let analysis = analyzer.analyze(&state);
        assert!(analysis.is_repetitive);
        assert!(!analysis.is_escalating);
        assert!(analysis.requires_human_intervention);
    }

    #[test]
    fn test_topic_changes() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "what size should I get for running shoes",
            "I was charged twice on my credit card for the payment",
            "what size should I get for trail boots",
            "My card was declined, I need a refund",
        ]);

        let analysis = analyzer.analyze(&state);
        assert_eq!(analysis.topic_changes, 3);
        assert!(analysis.requires_human_intervention);
    }

    #[test]
    fn test_declining_sentiment() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "Thanks, these look great",
            "Hmm, where is my order?",
            "The box was damaged and the shoe is broken, I'm upset",
        ]);

        let analysis = analyzer.analyze(&state);
        assert_eq!(analysis.sentiment_trend, SentimentTrend::Declining);
    }

    #[test]
    fn test_improving_sentiment() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "The box was damaged and the shoe is broken, I'm upset",
            "Thanks, these look great, I love them",
        ]);

        let analysis = analyzer.analyze(&state);
        assert_eq!(analysis.sentiment_trend, SentimentTrend::Improving);
    }

    fn two_calm_messages() -> ConversationState {
        state_with(&[
            "Do you have these loafers in stock?",
            "Are the suede boots available in size 9?",
        ])
    }

    #[test]
    fn test_low_average_sentiment_alone_requires_human() {
        let analyzer = PatternAnalyzer::default();
        let mut state = two_calm_messages();
        for point in state.sentiment_trend.iter_mut() {
            point.score = -6;
        }

        let analysis = analyzer.analyze(&state);
        assert_eq!(analysis.average_sentiment, -6.0);
        assert!(!analysis.is_escalating);
        assert!(!analysis.is_repetitive);
        assert!(analysis.topic_changes < analyzer.config().max_topic_changes);
        assert!(analysis.requires_human_intervention);
    }

    #[test]
    fn test_priority_problems_alone_require_human() {
        let analyzer = PatternAnalyzer::default();
        let mut state = two_calm_messages();

        state.problem_history[0].urgency = UrgencyLevel::High;
        let analysis = analyzer.analyze(&state);
        assert!(!analysis.requires_human_intervention);

        state.problem_history[1].urgency = UrgencyLevel::Critical;
        let analysis = analyzer.analyze(&state);
        assert!(!analysis.is_escalating);
        assert!(!analysis.is_repetitive);
        assert!(analysis.average_sentiment > analyzer.config().sentiment_floor);
        assert!(analysis.requires_human_intervention);
    }

    #[test]
    fn test_calm_conversation() {
        let analyzer = PatternAnalyzer::default();
        let state = state_with(&[
            "Do you have these loafers in stock?",
            "Thanks, what size should I get for them?",
        ]);

        let analysis = analyzer.analyze(&state);
        assert!(!analysis.requires_human_intervention);
        assert_eq!(analysis.sentiment_trend, SentimentTrend::Stable);
        assert!(state
            .messages
            .iter()
            .all(|m| m.validation.problem_category != ProblemCategory::GeneralInquiry));
    }
}
