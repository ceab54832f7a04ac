use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::config::Config;

/// Liveness check. Reports the configured model name.
pub async fn health(State(config): State<Config>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": config.openai_model,
    }))
}
