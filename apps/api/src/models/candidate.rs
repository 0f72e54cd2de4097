use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role_applied: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Aggregate metrics maintained per candidate.
/// `avg_score` is on the 0-10 grading scale, `completion_rate` in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateMetricsRow {
    pub candidate_id: Uuid,
    pub assessments_taken: i32,
    pub avg_score: f64,
    pub completion_rate: f64,
    pub last_activity_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateSkillRow {
    pub candidate_id: Uuid,
    pub skill: String,
    pub level: f64,
    pub assessed_at: DateTime<Utc>,
}
