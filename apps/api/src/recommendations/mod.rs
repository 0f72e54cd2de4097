//! AI recommendations, insights, and predictions read layer.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::recommendation::{InsightRow, PredictionRow, RecommendationRow};

const LIST_LIMIT: i64 = 100;

#[derive(Debug, Default)]
pub struct RecommendationFilter {
    pub applied: Option<bool>,
    pub category: Option<String>,
}

pub async fn list_recommendations(
    pool: &PgPool,
    filter: &RecommendationFilter,
) -> Result<Vec<RecommendationRow>, sqlx::Error> {
    sqlx::query_as::<_, RecommendationRow>(
        r#"
        SELECT * FROM recommendations
        WHERE ($1::boolean IS NULL OR applied = $1)
          AND ($2::text IS NULL OR category = $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(filter.applied)
    .bind(&filter.category)
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}

/// Persists the applied flag. Returns false for unknown ids.
pub async fn set_applied(pool: &PgPool, id: Uuid, applied: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE recommendations SET applied = $2 WHERE id = $1")
        .bind(id)
        .bind(applied)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_insights(pool: &PgPool) -> Result<Vec<InsightRow>, sqlx::Error> {
    sqlx::query_as::<_, InsightRow>(
        "SELECT * FROM insights ORDER BY created_at DESC LIMIT $1",
    )
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}

pub async fn list_predictions(pool: &PgPool) -> Result<Vec<PredictionRow>, sqlx::Error> {
    sqlx::query_as::<_, PredictionRow>(
        "SELECT * FROM predictions ORDER BY created_at DESC LIMIT $1",
    )
    .bind(LIST_LIMIT)
    .fetch_all(pool)
    .await
}
