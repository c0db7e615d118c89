//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use shoe_assistant_agent::AssistantOrchestrator;
use shoe_assistant_config::Settings;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub assistant: Arc<AssistantOrchestrator>,
    /// Prometheus handle, absent when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create application state with an assistant built from the settings
    pub fn new(config: Settings) -> Self {
        let assistant = AssistantOrchestrator::from_config(config.assistant.clone());
        Self::with_assistant(config, assistant)
    }

    /// Create application state around an existing assistant
    pub fn with_assistant(config: Settings, assistant: AssistantOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            assistant: Arc::new(assistant),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
