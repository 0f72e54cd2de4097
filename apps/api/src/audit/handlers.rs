use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::audit::{entries_to_csv, list_entries, AuditFilter};
use crate::errors::AppError;
use crate::models::audit::AuditEntryRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl From<AuditQuery> for AuditFilter {
    fn from(query: AuditQuery) -> Self {
        AuditFilter {
            actor: query.actor,
            action: query.action,
            entity_type: query.entity_type,
            from: query.from,
            to: query.to,
            limit: query.limit,
        }
    }
}

/// GET /api/v1/audit
pub async fn handle_list_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntryRow>>, AppError> {
    let entries = list_entries(&state.db, &query.into()).await?;
    Ok(Json(entries))
}

/// GET /api/v1/audit/export
/// Same filters as the list view, but returns a CSV attachment.
pub async fn handle_export_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = list_entries(&state.db, &query.into()).await?;
    let csv = entries_to_csv(&entries).map_err(AppError::Internal)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"audit-trail.csv\"",
            ),
        ],
        csv,
    ))
}
