use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::assessments::{fetch_assessment, list_assessments, AssessmentFilter};
use crate::errors::AppError;
use crate::models::assessment::AssessmentRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssessmentQuery {
    pub status: Option<String>,
    pub candidate_id: Option<Uuid>,
}

/// GET /api/v1/assessments
pub async fn handle_list_assessments(
    State(state): State<AppState>,
    Query(query): Query<AssessmentQuery>,
) -> Result<Json<Vec<AssessmentRow>>, AppError> {
    let filter = AssessmentFilter {
        status: query.status,
        candidate_id: query.candidate_id,
    };
    let assessments = list_assessments(&state.db, &filter).await?;
    Ok(Json(assessments))
}

/// GET /api/v1/assessments/:id
/// Includes the stored grade once the assessment has been graded.
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentRow>, AppError> {
    let assessment = fetch_assessment(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))?;
    Ok(Json(assessment))
}
