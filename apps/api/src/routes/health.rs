use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and the size of the roster currently served.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.roster.current().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "candidates": snapshot.candidates.len()
    }))
}
