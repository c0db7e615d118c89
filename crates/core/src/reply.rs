//! Assistant reply returned to callers

use serde::{Deserialize, Serialize};

use crate::{ConversationStats, Product, ValidationSummary};

/// Intent reported when the conversation must go to a human
pub const ESCALATION_INTENT: &str = "ESCALATION_REQUIRED";

/// Intent reported when processing failed
pub const UNKNOWN_INTENT: &str = "UNKNOWN";

/// Which path produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Handed off to a human agent
    Escalation,
    /// Generated by the external responder
    Backend,
    /// Rule-based templates
    Rules,
    /// Internal failure
    Failure,
}

/// Assistant reply
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub success: bool,
    pub message: String,
    pub intent: String,
    pub source: ReplySource,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_stats: Option<ConversationStats>,
    pub requires_escalation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_reason: Option<String>,
    pub session_id: String,
}

impl AssistantReply {
    /// Generic apologetic reply used when anything in the pipeline fails
    pub fn failure(session_id: impl Into<String>) -> Self {
        Self {
            success: false,
            message: "I'm having trouble processing your request right now. Please try again in a moment, or contact our support team if the issue persists.".to_string(),
            intent: UNKNOWN_INTENT.to_string(),
            source: ReplySource::Failure,
            suggestions: Vec::new(),
            products: Vec::new(),
            validation: None,
            conversation_stats: None,
            requires_escalation: false,
            escalation_reason: None,
            session_id: session_id.into(),
        }
    }

    pub fn is_escalation(&self) -> bool {
        self.intent == ESCALATION_INTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reply() {
        let reply = AssistantReply::failure("s1");
        assert!(!reply.success);
        assert_eq!(reply.intent, UNKNOWN_INTENT);
        assert!(reply.message.starts_with("I'm having trouble processing your request"));
        assert!(!reply.is_escalation());
    }
}
