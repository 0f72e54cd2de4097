use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::{fetch_candidate, fetch_metrics, list_candidates, list_skills, CandidateFilter};
use crate::errors::AppError;
use crate::models::candidate::{CandidateMetricsRow, CandidateRow, CandidateSkillRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CandidateDetailResponse {
    pub candidate: CandidateRow,
    pub metrics: Option<CandidateMetricsRow>,
    pub skills: Vec<CandidateSkillRow>,
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let filter = CandidateFilter {
        status: query.status,
        search: query.search,
    };
    let candidates = list_candidates(&state.db, &filter).await?;
    Ok(Json(candidates))
}

/// GET /api/v1/candidates/:id
/// Profile, metrics, and skills in one response — one dashboard card each.
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateDetailResponse>, AppError> {
    let candidate = fetch_candidate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    let metrics = fetch_metrics(&state.db, id).await?;
    let skills = list_skills(&state.db, id).await?;

    Ok(Json(CandidateDetailResponse {
        candidate,
        metrics,
        skills,
    }))
}
