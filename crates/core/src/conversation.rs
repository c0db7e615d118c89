//! Conversation state types
//!
//! A [`ConversationState`] holds the bounded per-session history the
//! assistant uses to spot escalation, repetition and topic churn.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Entities, ProblemCategory, SentimentLevel, UrgencyLevel, ValidationSummary};

/// A single inbound message and its validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub validation: ValidationSummary,
}

/// A classified problem mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    pub category: ProblemCategory,
    pub timestamp: DateTime<Utc>,
    pub urgency: UrgencyLevel,
    pub sentiment: SentimentLevel,
}

/// One point of the sentiment trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPoint {
    pub level: SentimentLevel,
    pub score: i32,
    pub timestamp: DateTime<Utc>,
}

/// Per-session conversation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub session_id: String,
    /// Oldest first
    pub messages: VecDeque<MessageRecord>,
    /// Oldest first
    pub problem_history: VecDeque<ProblemRecord>,
    /// Oldest first
    pub sentiment_trend: VecDeque<SentimentPoint>,
    /// Cumulative merge of every entity seen in the session
    pub entities: Entities,
    /// Last seen problem category
    pub user_intent: Option<ProblemCategory>,
    pub last_active: DateTime<Utc>,
}

impl ConversationState {
    /// Create a fresh state
    pub fn new(session_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: VecDeque::new(),
            problem_history: VecDeque::new(),
            sentiment_trend: VecDeque::new(),
            entities: Entities::default(),
            user_intent: None,
            last_active: now,
        }
    }

    /// Idle for at least `ttl` as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active >= ttl
    }

    /// Discard all history, keeping the session id
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(std::mem::take(&mut self.session_id), now);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&MessageRecord> {
        self.messages.back()
    }

    /// The most recent `n` messages, oldest first
    pub fn recent_messages(&self, n: usize) -> impl Iterator<Item = &MessageRecord> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip)
    }

    pub fn last_problem(&self) -> Option<&ProblemRecord> {
        self.problem_history.back()
    }
}

/// Push onto a bounded FIFO, evicting from the front
pub fn push_bounded<T>(queue: &mut VecDeque<T>, item: T, max: usize) {
    queue.push_back(item);
    while queue.len() > max {
        queue.pop_front();
    }
}

/// Direction of sentiment over the recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum SentimentTrend {
    Declining,
    Improving,
    #[default]
    Stable,
}

impl SentimentTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentTrend::Declining => "declining",
            SentimentTrend::Improving => "improving",
            SentimentTrend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for SentimentTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Patterns detected over a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    pub is_escalating: bool,
    pub is_repetitive: bool,
    pub requires_human_intervention: bool,
    pub topic_changes: usize,
    pub average_sentiment: f64,
    pub sentiment_trend: SentimentTrend,
}

/// Derived conversation statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub message_count: usize,
    /// Milliseconds since the first retained message
    pub duration_ms: i64,
    /// Distinct categories in first-seen order
    pub problems_discussed: Vec<ProblemCategory>,
    pub average_sentiment: f64,
    pub sentiment_trend: SentimentTrend,
    pub requires_human_intervention: bool,
    pub is_escalating: bool,
    pub is_repetitive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_bounded_evicts_oldest() {
        let mut queue = VecDeque::new();
        for i in 0..7 {
            push_bounded(&mut queue, i, 5);
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.front(), Some(&2));
        assert_eq!(queue.back(), Some(&6));
    }

    #[test]
    fn test_expiry_and_reset() {
        let start = Utc::now();
        let mut state = ConversationState::new("s1", start);
        state.user_intent = Some(ProblemCategory::SizeFit);

        assert!(!state.is_expired(start + Duration::minutes(29), Duration::minutes(30)));
        assert!(state.is_expired(start + Duration::minutes(30), Duration::minutes(30)));

        let later = start + Duration::minutes(45);
        state.reset(later);
        assert_eq!(state.session_id, "s1");
        assert!(state.user_intent.is_none());
        assert_eq!(state.last_active, later);
    }

    #[test]
    fn test_trend_serialization() {
        let json = serde_json::to_string(&SentimentTrend::Declining).unwrap();
        assert_eq!(json, "\"declining\"");
    }
}
