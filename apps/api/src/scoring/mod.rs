//! Scoring criteria, per-assessment score rows, and the skill matrix.

pub mod aggregate;
pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::scoring::{CandidateScoreRow, ScoringCriterionRow, SkillMatrixCell};

pub async fn list_criteria(pool: &PgPool) -> Result<Vec<ScoringCriterionRow>, sqlx::Error> {
    sqlx::query_as::<_, ScoringCriterionRow>(
        "SELECT * FROM scoring_criteria ORDER BY weight DESC, name",
    )
    .fetch_all(pool)
    .await
}

pub async fn scores_for_assessment(
    pool: &PgPool,
    assessment_id: Uuid,
) -> Result<Vec<CandidateScoreRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateScoreRow>(
        "SELECT * FROM candidate_scores WHERE assessment_id = $1 ORDER BY created_at",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await
}

/// The skill-assessment matrix, aggregated in SQL.
pub async fn skill_matrix(pool: &PgPool) -> Result<Vec<SkillMatrixCell>, sqlx::Error> {
    sqlx::query_as::<_, SkillMatrixCell>(
        r#"
        SELECT skill,
               COUNT(DISTINCT candidate_id) AS candidate_count,
               AVG(level) AS avg_level
        FROM candidate_skills
        GROUP BY skill
        ORDER BY skill
        "#,
    )
    .fetch_all(pool)
    .await
}
