use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A saved report definition. `columns` is a JSON array of column keys and
/// fixes the column order of every export of this template.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportTemplateRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub columns: Value,
    pub created_at: DateTime<Utc>,
}

/// A materialized run of a template. `payload` is a JSON array of row objects.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportInstanceRow {
    pub id: Uuid,
    pub template_id: Uuid,
    pub status: String,
    pub row_count: i32,
    pub payload: Value,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReportScheduleRow {
    pub id: Uuid,
    pub template_id: Uuid,
    pub cadence: String,
    pub next_run_at: DateTime<Utc>,
    pub enabled: bool,
}
