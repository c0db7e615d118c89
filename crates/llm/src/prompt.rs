//! Prompt Building
//!
//! Constructs the system and user prompts sent to the external responder.

use std::fmt;
use serde::{Deserialize, Serialize};

use shoe_assistant_config::PersonaConfig;
use shoe_assistant_core::{MessageRecord, ValidationSummary};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// System and user prompt pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderPrompt {
    pub system: String,
    pub user: String,
}

/// Prompt builder for the support assistant
pub struct PromptBuilder {
    persona: PersonaConfig,
    sections: Vec<String>,
    query: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new() -> Self {
        Self {
            persona: PersonaConfig::default(),
            sections: Vec::new(),
            query: String::new(),
        }
    }

    /// Set persona configuration
    pub fn with_persona(mut self, persona: PersonaConfig) -> Self {
        self.persona = persona;
        self
    }

    /// System prompt for the support assistant
    pub fn system_prompt(&self) -> String {
        format!(
            r#"You are {name}, the customer support assistant for {store}, an online shoe store.

## Your Role
- Help customers with orders, shipping, returns, exchanges, sizing and payments
- Recommend shoes when customers are shopping
- Resolve problems with empathy and clear next steps

## Communication Guidelines
- Acknowledge the customer's feelings before solving the problem
- Keep responses concise (3-4 sentences)
- Ask for the order number when an order is involved and none is known
- Never invent order details, prices or delivery dates
- Offer a human agent when you cannot resolve the issue"#,
            name = self.persona.name,
            store = self.persona.store_name,
        )
    }

    /// Add the analysis of the current message
    pub fn with_validation(mut self, validation: &ValidationSummary) -> Self {
        let mut lines = vec![
            format!(
                "Problem category: {} (confidence {:.2})",
                validation.problem_category.display_name(),
                validation.problem_confidence
            ),
            format!(
                "Sentiment: {} (score {})",
                validation.sentiment.level.display_name(),
                validation.sentiment.score
            ),
            format!(
                "Urgency: {} (respond within {})",
                validation.urgency.level, validation.urgency.estimated_response_time
            ),
        ];

        let entities = &validation.entities;
        if let Some(ref order) = entities.order_number {
            lines.push(format!("Order number: {}", order));
        }
        if let Some(ref product) = entities.product_type {
            lines.push(format!("Product: {}", product));
        }
        if let Some(ref size) = entities.size {
            lines.push(format!("Size: {}", size));
        }
        if let Some(ref color) = entities.color {
            lines.push(format!("Color: {}", color));
        }

        lines.push(format!("Suggested approach: {}", validation.suggested_response));

        self.sections
            .push(format!("## Customer Analysis\n{}", lines.join("\n")));
        self
    }

    /// Add the recent conversation (oldest first)
    pub fn with_recent_messages<'a>(
        mut self,
        messages: impl IntoIterator<Item = &'a MessageRecord>,
    ) -> Self {
        let lines: Vec<String> = messages
            .into_iter()
            .map(|m| format!("- Customer: {}", m.text))
            .collect();

        if !lines.is_empty() {
            self.sections
                .push(format!("## Recent Conversation\n{}", lines.join("\n")));
        }
        self
    }

    /// Set the current customer message
    pub fn user_message(mut self, message: &str) -> Self {
        self.query = message.to_string();
        self
    }

    /// Build the prompt pair
    pub fn build(self) -> ResponderPrompt {
        let system = self.system_prompt();

        let mut user = self.sections.join("\n\n");
        if !user.is_empty() {
            user.push_str("\n\n");
        }
        user.push_str("## Customer Message\n");
        user.push_str(&self.query);

        ResponderPrompt { system, user }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
