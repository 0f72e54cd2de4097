use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::audit::{record_entry, NewAuditEntry};
use crate::errors::AppError;
use crate::models::recommendation::{InsightRow, PredictionRow, RecommendationRow};
use crate::recommendations::{
    list_insights, list_predictions, list_recommendations, set_applied, RecommendationFilter,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub applied: Option<bool>,
    pub category: Option<String>,
}

/// GET /api/v1/recommendations
pub async fn handle_list_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<RecommendationRow>>, AppError> {
    let filter = RecommendationFilter {
        applied: query.applied,
        category: query.category,
    };
    let recommendations = list_recommendations(&state.db, &filter).await?;
    Ok(Json(recommendations))
}

#[derive(Debug, Deserialize)]
pub struct AppliedToggle {
    pub applied: bool,
}

/// PATCH /api/v1/recommendations/:id/applied
/// Persists the flag server-side so every admin sees the same state.
pub async fn handle_set_applied(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(toggle): Json<AppliedToggle>,
) -> Result<StatusCode, AppError> {
    let updated = set_applied(&state.db, id, toggle.applied).await?;
    if !updated {
        return Err(AppError::NotFound(format!("Recommendation {id} not found")));
    }

    record_entry(
        &state.db,
        NewAuditEntry {
            actor: "admin",
            action: if toggle.applied {
                "recommendation.applied"
            } else {
                "recommendation.unapplied"
            },
            entity_type: "recommendation",
            entity_id: id.to_string(),
            detail: json!({}),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/insights
pub async fn handle_list_insights(
    State(state): State<AppState>,
) -> Result<Json<Vec<InsightRow>>, AppError> {
    Ok(Json(list_insights(&state.db).await?))
}

/// GET /api/v1/predictions
pub async fn handle_list_predictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PredictionRow>>, AppError> {
    Ok(Json(list_predictions(&state.db).await?))
}
