use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

/// Liveness payload, plus which optional features this instance has
/// configured.
pub async fn ping_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Gamevault is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "deletion_code_required": state.catalog.requires_deletion_code(),
        "image_lookup_configured": state.config.image_lookup.api_key.is_some(),
    }))
}
