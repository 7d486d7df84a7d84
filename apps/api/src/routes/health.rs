use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and the active sink.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "onboarding-api",
        "submission_backend": state.sink.backend(),
        "strict_step_validation": state.config.strict_step_validation,
        "require_confirmation": state.config.require_confirmation,
        "session_ttl_secs": state.config.session_ttl_secs,
        "open_sessions": state.sessions.len().await
    }))
}
