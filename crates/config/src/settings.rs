//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AssistantConfig, ConfigError, MAX_SESSION_SECONDS};

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Assistant configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Restrict CORS to `cors_origins`
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,

    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_session()?;
        self.validate_responder()?;

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    fn validate_session(&self) -> Result<(), ConfigError> {
        let session = &self.assistant.session;

        if session.ttl_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "assistant.session.ttl_seconds".to_string(),
                message: "TTL must be positive".to_string(),
            });
        }

        for (field, value) in [
            ("assistant.session.ttl_seconds", session.ttl_seconds),
            ("assistant.session.retention_seconds", session.retention_seconds),
            ("assistant.session.sweep_interval_seconds", session.sweep_interval_seconds),
        ] {
            if value > MAX_SESSION_SECONDS {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("Must be at most {}s, got {}s", MAX_SESSION_SECONDS, value),
                });
            }
        }

        for (field, value) in [
            ("assistant.session.max_messages", session.max_messages),
            ("assistant.session.max_problem_history", session.max_problem_history),
            ("assistant.session.max_sentiment_trend", session.max_sentiment_trend),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Bound must be at least 1".to_string(),
                });
            }
        }

        if session.retention_seconds < session.ttl_seconds {
            return Err(ConfigError::InvalidValue {
                field: "assistant.session.retention_seconds".to_string(),
                message: format!(
                    "Retention ({}s) must not be shorter than TTL ({}s)",
                    session.retention_seconds, session.ttl_seconds
                ),
            });
        }

        Ok(())
    }

    fn validate_responder(&self) -> Result<(), ConfigError> {
        let responder = &self.assistant.responder;

        if !(0.0..=2.0).contains(&responder.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "assistant.responder.temperature".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", responder.temperature),
            });
        }

        if !(100..=60_000).contains(&responder.timeout_ms) {
            return Err(ConfigError::InvalidValue {
                field: "assistant.responder.timeout_ms".to_string(),
                message: format!("Must be between 100 and 60000, got {}", responder.timeout_ms),
            });
        }

        if responder.enabled && responder.endpoint.is_empty() {
            return Err(ConfigError::MissingField(
                "assistant.responder.endpoint".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from("config", env)
}

/// Load settings from a specific config directory
pub fn load_settings_from(dir: impl AsRef<Path>, env: Option<&str>) -> Result<Settings, ConfigError> {
    let dir = dir.as_ref();
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(
        File::with_name(&dir.join("default").to_string_lossy()).required(false),
    );

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(
            File::with_name(&dir.join(env_name).to_string_lossy()).required(false),
        );
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("SHOE_ASSISTANT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        responder_enabled = settings.assistant.responder.enabled,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.assistant.session.ttl_seconds, 1800);
        assert!(!settings.assistant.responder.enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_session_validation() {
        let mut settings = Settings::default();
        settings.assistant.session.max_messages = 0;
        assert!(settings.validate().is_err());

        settings.assistant.session.max_messages = 10;
        settings.assistant.session.retention_seconds = 60;
        assert!(settings.validate().is_err());

        settings.assistant.session.retention_seconds = 3600;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_session_durations_bounded() {
        let mut settings = Settings::default();
        settings.assistant.session.ttl_seconds = 100_000_000_000_000_000;
        settings.assistant.session.retention_seconds = u64::MAX;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "assistant.session.ttl_seconds"
        ));

        settings.assistant.session.ttl_seconds = MAX_SESSION_SECONDS;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "assistant.session.retention_seconds"
        ));

        settings.assistant.session.retention_seconds = MAX_SESSION_SECONDS;
        assert!(settings.validate().is_ok());

        settings.assistant.session.sweep_interval_seconds = MAX_SESSION_SECONDS + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_responder_validation() {
        let mut settings = Settings::default();
        settings.assistant.responder.temperature = 2.5;
        assert!(settings.validate().is_err());

        settings.assistant.responder.temperature = 0.2;
        settings.assistant.responder.timeout_ms = 50;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.yaml"),
            "server:\n  port: 9090\nassistant:\n  session:\n    ttl_seconds: 600\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), None).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.assistant.session.ttl_seconds, 600);
        assert_eq!(settings.assistant.session.max_messages, 10);
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let result = Settings::from_yaml_file("/nonexistent/settings.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
