use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::scoring::{CandidateScoreRow, ScoringCriterionRow, SkillMatrixCell};
use crate::scoring::aggregate::{classify, weighted_overall, ScoreBand};
use crate::scoring::{list_criteria, scores_for_assessment, skill_matrix};
use crate::state::AppState;

/// GET /api/v1/scoring/criteria
pub async fn handle_list_criteria(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScoringCriterionRow>>, AppError> {
    Ok(Json(list_criteria(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct ScoresQuery {
    pub assessment_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub scores: Vec<CandidateScoreRow>,
    pub weighted_overall: f64,
    pub band: ScoreBand,
}

/// GET /api/v1/scoring/scores?assessment_id=...
/// Returns the raw criterion rows plus the rubric-weighted overall.
pub async fn handle_assessment_scores(
    State(state): State<AppState>,
    Query(query): Query<ScoresQuery>,
) -> Result<Json<ScoresResponse>, AppError> {
    let scores = scores_for_assessment(&state.db, query.assessment_id).await?;
    let criteria = list_criteria(&state.db).await?;

    let weights: HashMap<Uuid, f64> = criteria.iter().map(|c| (c.id, c.weight)).collect();
    let weighted_scores: Vec<(f64, f64)> = scores
        .iter()
        .map(|s| (weights.get(&s.criterion_id).copied().unwrap_or(0.0), s.score))
        .collect();

    let overall = weighted_overall(&weighted_scores);
    Ok(Json(ScoresResponse {
        scores,
        weighted_overall: overall,
        band: classify(overall),
    }))
}

/// GET /api/v1/scoring/matrix
pub async fn handle_skill_matrix(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkillMatrixCell>>, AppError> {
    Ok(Json(skill_matrix(&state.db).await?))
}
