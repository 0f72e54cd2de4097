//! Assessment records — fetch queries plus the `store_grade` write used by
//! the grading pipeline.

pub mod handlers;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::grading::models::GradeReport;
use crate::models::assessment::AssessmentRow;

pub async fn fetch_assessment(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[derive(Debug, Default)]
pub struct AssessmentFilter {
    pub status: Option<String>,
    pub candidate_id: Option<Uuid>,
}

pub async fn list_assessments(
    pool: &PgPool,
    filter: &AssessmentFilter,
) -> Result<Vec<AssessmentRow>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentRow>(
        r#"
        SELECT * FROM assessments
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::uuid IS NULL OR candidate_id = $2)
        ORDER BY created_at DESC
        "#,
    )
    .bind(&filter.status)
    .bind(filter.candidate_id)
    .fetch_all(pool)
    .await
}

/// Stores the normalized grade on the assessment and moves it to `graded`.
/// Returns false if the assessment disappeared between fetch and write.
pub async fn store_grade(pool: &PgPool, id: Uuid, report: &GradeReport) -> Result<bool> {
    let grade = serde_json::to_value(report)?;
    let result = sqlx::query(
        r#"
        UPDATE assessments
        SET grade = $2, status = 'graded', completed_at = COALESCE(completed_at, NOW())
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(grade)
    .execute(pool)
    .await?;

    let stored = result.rows_affected() > 0;
    if stored {
        info!(
            "Stored grade for assessment {id}: overall {:.1}",
            report.overall_score
        );
    }
    Ok(stored)
}
