//! Session Housekeeping
//!
//! Wires the conversation store's background sweep to the session settings.

use std::time::Duration;

use tokio::sync::watch;

use shoe_assistant_agent::session_duration;

use crate::state::AppState;

/// Start the abandoned-session sweep if enabled
///
/// Returns the shutdown sender of the running task.
pub fn start_session_sweep(state: &AppState) -> Option<watch::Sender<bool>> {
    let session = &state.config.assistant.session;
    if !session.sweep_enabled {
        tracing::info!("Session sweep disabled");
        return None;
    }

    let interval = Duration::from_secs(
        session.sweep_interval_seconds.clamp(1, shoe_assistant_config::MAX_SESSION_SECONDS),
    );
    let retention = session_duration(session.retention_seconds);

    tracing::info!(
        interval_secs = interval.as_secs(),
        retention_secs = session.retention_seconds,
        "Starting session sweep"
    );

    Some(state.assistant.store().start_sweep_task(interval, retention))
}
