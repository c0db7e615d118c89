//! Responder backend implementations
//!
//! Currently supports the Ollama chat API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use shoe_assistant_config::ResponderConfig;
use shoe_assistant_core::{CompletionOptions, ResponderBackend};

use crate::prompt::Message;
use crate::LlmError;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// API endpoint
    pub endpoint: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature
    pub temperature: f32,
    /// Top-p sampling
    pub top_p: f32,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::from(&ResponderConfig::default())
    }
}

impl From<&ResponderConfig> for LlmConfig {
    fn from(config: &ResponderConfig) -> Self {
        Self {
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: 0.9,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

/// LLM generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Tokens generated
    pub tokens: usize,
    /// Total generation time (ms)
    pub total_time_ms: u64,
    /// Finish reason
    pub finish_reason: FinishReason,
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
}

/// Ollama responder
///
/// One attempt per query. Failures are logged and surface as `None`
/// through [`ResponderBackend::complete`].
#[derive(Clone)]
pub struct OllamaResponder {
    client: Client,
    config: LlmConfig,
}

impl OllamaResponder {
    /// Create a new Ollama responder
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.endpoint.is_empty() {
            return Err(LlmError::Configuration("endpoint is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create from the assistant's responder settings
    pub fn from_config(config: &ResponderConfig) -> Result<Self, LlmError> {
        Self::new(LlmConfig::from(config))
    }

    /// Build the API URL
    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.config.endpoint, path)
    }

    /// Run one non-streaming chat request
    pub async fn generate(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<GenerationResult, LlmError> {
        let start = Instant::now();

        let request = OllamaChatRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(|m| m.into()).collect(),
            stream: false,
            options: Some(OllamaOptions {
                temperature: Some(options.temperature),
                top_p: Some(self.config.top_p),
                num_predict: Some(options.max_tokens as i32),
            }),
        };

        let response = self
            .client
            .post(self.api_url("/chat"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{}: {}", status, error)));
        }

        let result: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = result.message.content.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("empty message content".to_string()));
        }

        Ok(GenerationResult {
            text,
            tokens: result.eval_count.unwrap_or(0) as usize,
            total_time_ms: start.elapsed().as_millis() as u64,
            finish_reason: if result.done {
                FinishReason::Stop
            } else {
                FinishReason::Length
            },
        })
    }
}

#[async_trait]
impl ResponderBackend for OllamaResponder {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Option<String> {
        let messages = [Message::system(system_prompt), Message::user(user_prompt)];

        match tokio::time::timeout(options.timeout(), self.generate(&messages, options)).await {
            Ok(Ok(result)) => {
                tracing::debug!(
                    model = %self.config.model,
                    tokens = result.tokens,
                    total_time_ms = result.total_time_ms,
                    finish_reason = ?result.finish_reason,
                    "Responder completed"
                );
                Some(result.text)
            }
            Ok(Err(e)) => {
                tracing::warn!(model = %self.config.model, error = %e, "Responder request failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    model = %self.config.model,
                    timeout_ms = options.timeout_ms,
                    "Responder timed out"
                );
                None
            }
        }
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

// Ollama API types
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    content: String,
}

impl From<&Message> for OllamaMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role.to_string(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    eval_count: Option<u64>,
}
