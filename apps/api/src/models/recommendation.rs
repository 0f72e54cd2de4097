use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An AI-generated process recommendation shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub confidence: f64,
    pub impact_estimate: String,
    pub applied: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InsightRow {
    pub id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub severity: String,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PredictionRow {
    pub id: Uuid,
    pub subject: String,
    pub prediction: String,
    pub probability: f64,
    pub horizon: String,
    pub created_at: DateTime<Utc>,
}
