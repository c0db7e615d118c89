//! External responder (LLM) trait

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options for a single completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.7,
            timeout_ms: 15_000,
        }
    }
}

impl CompletionOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Optional external responder
///
/// Implementations:
/// - `OllamaResponder` - Local Ollama chat API
///
/// Implementations must return `None` on any failure or timeout instead of
/// an error, so callers can fall back to rule-based replies.
///
/// # Example
///
/// ```ignore
/// let responder: Arc<dyn ResponderBackend> = Arc::new(OllamaResponder::new(config)?);
/// if let Some(text) = responder.complete(&system, &user, &options).await {
///     println!("{}", text);
/// }
/// ```
#[async_trait]
pub trait ResponderBackend: Send + Sync + 'static {
    /// Generate a reply, or `None` when no answer is available
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Option<String>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockResponder;

    #[async_trait]
    impl ResponderBackend for MockResponder {
        async fn complete(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
            _options: &CompletionOptions,
        ) -> Option<String> {
            if user_prompt.is_empty() {
                None
            } else {
                Some("Mock response".to_string())
            }
        }

        fn name(&self) -> &str {
            "mock-responder"
        }
    }

    #[tokio::test]
    async fn test_mock_responder() {
        let responder = MockResponder;
        let options = CompletionOptions::default();

        assert_eq!(responder.name(), "mock-responder");
        assert_eq!(
            responder.complete("system", "hello", &options).await.as_deref(),
            Some("Mock response")
        );
        assert!(responder.complete("system", "", &options).await.is_none());
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(CompletionOptions::default().timeout(), Duration::from_secs(15));
    }
}
