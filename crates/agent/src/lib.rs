//! Shoe Store Support Assistant Engine
//!
//! Features:
//! - Per-message validation (sentiment, problem category, urgency, entities)
//! - Template replies and recommended actions
//! - Per-session conversation memory with TTL
//! - Escalation, repetition and topic-churn detection
//! - Storefront intent routing with catalog lookups
//! - Optional external responder with rule-based fallback

pub mod sentiment;
pub mod classifier;
pub mod urgency;
pub mod entities;
pub mod composer;
pub mod validation;
pub mod patterns;
pub mod memory;
pub mod intent;
pub mod followup;
pub mod agent;

pub use sentiment::SentimentAnalyzer;
pub use classifier::ProblemClassifier;
pub use urgency::UrgencyScorer;
pub use entities::EntityExtractor;
pub use composer::ResponseComposer;
pub use validation::ValidationPipeline;
pub use patterns::{PatternAnalyzer, PatternConfig};
pub use memory::{session_duration, ConversationStore, StoreConfig};
pub use intent::{IntentRouter, QueryEntities, QueryIntent, RoutedIntent};
pub use agent::AssistantOrchestrator;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("User history error: {0}")]
    UserHistory(String),

    #[error("Responder error: {0}")]
    Responder(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<shoe_assistant_core::Error> for AgentError {
    fn from(err: shoe_assistant_core::Error) -> Self {
        use shoe_assistant_core::Error;
        match err {
            Error::Catalog(msg) => AgentError::Catalog(msg),
            Error::UserHistory(msg) => AgentError::UserHistory(msg),
            Error::Responder(msg) => AgentError::Responder(msg),
            other => AgentError::Internal(other.to_string()),
        }
    }
}
