pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::roster::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Roster API
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route("/api/v1/candidates/:id", get(handlers::handle_get_candidate))
        .route("/api/v1/search", post(handlers::handle_search))
        .route("/api/v1/shortlist", get(handlers::handle_shortlist))
        .route(
            "/api/v1/teams/recommended",
            get(handlers::handle_recommended_teams),
        )
        .route(
            "/api/v1/teams/composition",
            post(handlers::handle_team_composition),
        )
        // Ingestion
        .route(
            "/api/v1/ingest",
            post(handlers::handle_ingest).layer(upload_limit),
        )
        .route("/api/v1/roster/reload", post(handlers::handle_reload))
        .with_state(state)
}
