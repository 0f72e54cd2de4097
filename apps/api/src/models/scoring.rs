use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A rubric criterion used when scoring assessments.
/// Weights are normalized fractions; `max_score` is 10 across the platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoringCriterionRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateScoreRow {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub candidate_id: Uuid,
    pub criterion_id: Uuid,
    pub score: f64,
    pub graded_by: String,
    pub created_at: DateTime<Utc>,
}

/// One cell of the skill-assessment matrix: a skill aggregated across
/// every candidate that has been assessed on it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillMatrixCell {
    pub skill: String,
    pub candidate_count: i64,
    pub avg_level: f64,
}
