//! Core traits and types for the shoe store support assistant
//!
//! This crate provides foundational types used across all other crates:
//! - Problem categories, sentiment and urgency levels
//! - Per-message validation summaries and extracted entities
//! - Per-session conversation state and derived pattern analysis
//! - Assistant replies
//! - Traits for pluggable collaborators (catalog, user history, LLM responder)
//! - Error types

pub mod error;
pub mod problem;
pub mod validation;
pub mod conversation;
pub mod reply;
pub mod traits;

pub use error::{Error, Result};
pub use problem::{ProblemCategory, SentimentLevel, UrgencyLevel};
pub use validation::{
    Entities, ProblemMatch, RecommendedActions, SentimentResult, UrgencyResult,
    ValidationSummary,
};
pub use conversation::{
    ConversationState, ConversationStats, MessageRecord, PatternAnalysis, ProblemRecord,
    SentimentPoint, SentimentTrend,
};
pub use reply::{AssistantReply, ReplySource};

// Trait re-exports
pub use traits::{
    // Catalog
    ProductCatalog, UserHistory, Product, ProductFilter,
    // Responder
    ResponderBackend, CompletionOptions,
};
