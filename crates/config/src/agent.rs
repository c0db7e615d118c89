//! Assistant configuration

use serde::{Deserialize, Serialize};

/// Assistant configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssistantConfig {
    /// Persona configuration
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Conversation store configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// External responder configuration
    #[serde(default)]
    pub responder: ResponderConfig,
}

fn default_true() -> bool {
    true
}

/// Persona used in the responder system prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Assistant name
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Store name used in introductions
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_persona_name() -> String {
    "Stride".to_string()
}
fn default_store_name() -> String {
    "StrideShoes".to_string()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            store_name: default_store_name(),
        }
    }
}

/// Upper bound for session TTL, retention and sweep interval (30 days)
pub const MAX_SESSION_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Conversation store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle time after which a session's history is discarded (seconds)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Messages retained per session
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Problem history entries retained per session
    #[serde(default = "default_max_history")]
    pub max_problem_history: usize,

    /// Sentiment trend points retained per session
    #[serde(default = "default_max_history")]
    pub max_sentiment_trend: usize,

    /// Run the background sweep that deletes abandoned sessions
    #[serde(default = "default_true")]
    pub sweep_enabled: bool,

    /// Interval between sweeps (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,

    /// Idle time after which the sweep deletes a session (seconds)
    #[serde(default = "default_retention_seconds")]
    pub retention_seconds: u64,
}

fn default_ttl_seconds() -> u64 {
    1800 // 30 minutes
}
fn default_max_messages() -> usize {
    10
}
fn default_max_history() -> usize {
    5
}
fn default_sweep_interval() -> u64 {
    300
}
fn default_retention_seconds() -> u64 {
    7200
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            max_messages: default_max_messages(),
            max_problem_history: default_max_history(),
            max_sentiment_trend: default_max_history(),
            sweep_enabled: true,
            sweep_interval_seconds: default_sweep_interval(),
            retention_seconds: default_retention_seconds(),
        }
    }
}

/// External responder (LLM) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderConfig {
    /// Use the external responder before falling back to templates
    #[serde(default)]
    pub enabled: bool,

    /// API endpoint (Ollama)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name/ID
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Temperature for generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Hard timeout for one completion (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    "qwen2.5:7b-instruct-q4_K_M".to_string()
}
fn default_max_tokens() -> usize {
    300
}
fn default_temperature() -> f32 {
    0.7
}
fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
