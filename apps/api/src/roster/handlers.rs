//! Axum route handlers for the Roster API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::jitter::RngJitter;
use crate::ingest::{parse_source_with, RejectedRow};
use crate::models::candidate::Candidate;
use crate::roster::search::{search, SearchRequest, SearchResults, MAX_LIMIT};
use crate::roster::shortlist::{build_shortlist, valid_fraction, Shortlist};
use crate::roster::store::{RosterOrigin, RosterSnapshot};
use crate::roster::teams::{compose_team, recommend_teams, TeamComposition, TeamRecommendation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub snapshot: RosterSnapshot,
    pub total: usize,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct ShortlistParams {
    pub fraction: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedTeamsResponse {
    pub teams: Vec<TeamRecommendation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRequest {
    #[serde(default)]
    pub candidate_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub csv_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub snapshot_id: Uuid,
    pub accepted: usize,
    pub rows_scanned: usize,
    pub rejected: Vec<RejectedRow>,
}

impl From<&RosterSnapshot> for IngestResponse {
    fn from(snapshot: &RosterSnapshot) -> Self {
        Self {
            snapshot_id: snapshot.id,
            accepted: snapshot.candidates.len(),
            rows_scanned: snapshot.rows_scanned,
            rejected: snapshot.rejected_rows.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let snapshot = state.roster.current().await;
    Ok(Json(CandidateListResponse {
        total: snapshot.candidates.len(),
        candidates: snapshot.candidates.clone(),
        snapshot: (*snapshot).clone(),
    }))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, AppError> {
    let snapshot = state.roster.current().await;
    snapshot
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResults>, AppError> {
    let limit = request.effective_limit();
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }
    if request.team_size == Some(0) {
        return Err(AppError::Validation("teamSize must be at least 1".to_string()));
    }

    let snapshot = state.roster.current().await;
    Ok(Json(search(&snapshot.candidates, &request)))
}

/// GET /api/v1/shortlist
///
/// Top fraction of the roster by composite score. `?fraction=` overrides the configured share.
pub async fn handle_shortlist(
    State(state): State<AppState>,
    Query(params): Query<ShortlistParams>,
) -> Result<Json<Shortlist>, AppError> {
    let fraction = params.fraction.unwrap_or(state.config.shortlist_fraction);
    if !valid_fraction(fraction) {
        return Err(AppError::Validation(
            "fraction must be greater than 0 and at most 1".to_string(),
        ));
    }

    let snapshot = state.roster.current().await;
    Ok(Json(build_shortlist(&snapshot.candidates, fraction)))
}

/// GET /api/v1/teams/recommended
pub async fn handle_recommended_teams(
    State(state): State<AppState>,
) -> Result<Json<RecommendedTeamsResponse>, AppError> {
    let snapshot = state.roster.current().await;
    Ok(Json(RecommendedTeamsResponse {
        teams: recommend_teams(&snapshot.candidates),
    }))
}

/// POST /api/v1/teams/composition
pub async fn handle_team_composition(
    State(state): State<AppState>,
    Json(request): Json<CompositionRequest>,
) -> Result<Json<TeamComposition>, AppError> {
    if request.candidate_ids.is_empty() {
        return Err(AppError::Validation("candidateIds required".to_string()));
    }

    let snapshot = state.roster.current().await;
    Ok(Json(compose_team(&snapshot.candidates, &request.candidate_ids)))
}

/// POST /api/v1/ingest
///
/// Parses posted source text and replaces the roster. The previous roster stays
/// in place when no header can be found.
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, AppError> {
    if request.csv_text.trim().is_empty() {
        return Err(AppError::Validation("csvText cannot be empty".to_string()));
    }

    let mut jitter = RngJitter::from_seed_option(state.config.score_seed);
    let report = parse_source_with(&request.csv_text, &mut jitter, &state.weights)?;

    let snapshot = RosterSnapshot::new(RosterOrigin::Upload, report);
    let response = IngestResponse::from(&snapshot);
    state.roster.replace(snapshot).await;

    Ok(Json(response))
}

/// POST /api/v1/roster/reload
///
/// Re-fetches the configured source. Unlike startup there is no sample fallback:
/// failures are reported and the current roster is kept.
pub async fn handle_reload(
    State(state): State<AppState>,
) -> Result<Json<IngestResponse>, AppError> {
    let provider = state.source.as_ref().ok_or_else(|| {
        AppError::Validation("no candidate source is configured".to_string())
    })?;

    let text = provider.fetch().await?;
    let mut jitter = RngJitter::from_seed_option(state.config.score_seed);
    let report = parse_source_with(&text, &mut jitter, &state.weights)?;

    let snapshot = RosterSnapshot::new(RosterOrigin::Source(provider.describe()), report);
    let response = IngestResponse::from(&snapshot);
    state.roster.replace(snapshot).await;

    Ok(Json(response))
}
