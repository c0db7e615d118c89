//! HTTP Endpoints
//!
//! REST API for the support assistant.

use std::time::Duration;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use shoe_assistant_core::{AssistantReply, ConversationState, ConversationStats};

use crate::metrics::metrics_handler;
use crate::state::AppState;
use crate::ServerError;

/// Headroom over the responder timeout for the rest of the pipeline
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config.server.cors_origins, state.config.server.cors_enabled);
    let timeout = Duration::from_millis(state.config.assistant.responder.timeout_ms) + REQUEST_TIMEOUT_SLACK;

    Router::new()
        .route("/api/assistant/query", post(process_query))
        .route("/api/assistant/suggestions", get(get_suggestions))
        .route("/api/assistant/sessions/:id", get(get_session))
        .route("/api/assistant/sessions/:id", delete(clear_session))
        .route("/api/assistant/sessions/:id/stats", get(get_session_stats))

        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))

        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty or all invalid, defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

/// Query request
#[derive(Debug, Deserialize)]
struct QueryRequest {
    query: String,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

/// Process a customer message
async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AssistantReply>, ServerError> {
    if request.query.trim().is_empty() {
        return Err(ServerError::InvalidRequest("query is required".to_string()));
    }

    let reply = state
        .assistant
        .process_query(
            &request.query,
            request.user_id.as_deref(),
            request.session_id.as_deref(),
        )
        .await;

    Ok(Json(reply))
}

/// Static quick prompts
async fn get_suggestions(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "suggestions": state.assistant.get_suggestions(),
    }))
}

/// Conversation state of a known session
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationState>, ServerError> {
    let store = state.assistant.store();
    if !store.contains(&id) {
        return Err(ServerError::SessionNotFound(id));
    }
    Ok(Json(store.get_context(&id)))
}

/// Derived statistics; unknown sessions report an empty conversation
async fn get_session_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ConversationStats> {
    Json(state.assistant.store().get_conversation_stats(&id))
}

/// Forget a session
async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.assistant.store().clear_context(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.assistant.store().count(),
    }))
}
