//! External responder integration
//!
//! Features:
//! - Ollama chat backend implementing `ResponderBackend`
//! - Prompt construction from message analysis and recent history

pub mod backend;
pub mod prompt;

pub use backend::{FinishReason, GenerationResult, LlmConfig, OllamaResponder};
pub use prompt::{Message, PromptBuilder, ResponderPrompt, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
