//! Candidate profiles, metrics, and skills read layer.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::candidate::{CandidateMetricsRow, CandidateRow, CandidateSkillRow};

#[derive(Debug, Default)]
pub struct CandidateFilter {
    pub status: Option<String>,
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
}

pub async fn list_candidates(
    pool: &PgPool,
    filter: &CandidateFilter,
) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT * FROM candidates
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR email ILIKE '%' || $2 || '%')
        ORDER BY created_at DESC
        "#,
    )
    .bind(&filter.status)
    .bind(&filter.search)
    .fetch_all(pool)
    .await
}

pub async fn fetch_candidate(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_metrics(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Option<CandidateMetricsRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateMetricsRow>(
        "SELECT * FROM candidate_metrics WHERE candidate_id = $1",
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_skills(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<CandidateSkillRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateSkillRow>(
        "SELECT * FROM candidate_skills WHERE candidate_id = $1 ORDER BY skill",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await
}
