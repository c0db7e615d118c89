//! Configuration management for the shoe store assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files (`config/default.*`, `config/<env>.*`)
//! - Environment variables (SHOE_ASSISTANT__ prefix, `__` separator)
//! - Runtime overrides

pub mod settings;
pub mod agent;

pub use settings::{
    Settings, ServerConfig, ObservabilityConfig, RuntimeEnvironment,
    load_settings, load_settings_from,
};
pub use agent::{
    AssistantConfig, PersonaConfig, SessionConfig, ResponderConfig, MAX_SESSION_SECONDS,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
