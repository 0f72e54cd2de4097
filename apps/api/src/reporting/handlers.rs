use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::audit::{record_entry, NewAuditEntry};
use crate::errors::AppError;
use crate::models::report::{ReportInstanceRow, ReportScheduleRow, ReportTemplateRow};
use crate::reporting::{
    fetch_instance, fetch_template, instance_to_csv, list_instances, list_schedules,
    list_templates, materialize_template, template_columns,
};
use crate::state::AppState;

/// GET /api/v1/reports/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportTemplateRow>>, AppError> {
    Ok(Json(list_templates(&state.db).await?))
}

/// GET /api/v1/reports/schedules
pub async fn handle_list_schedules(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportScheduleRow>>, AppError> {
    Ok(Json(list_schedules(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct InstanceQuery {
    pub template_id: Option<Uuid>,
}

/// GET /api/v1/reports/instances
pub async fn handle_list_instances(
    State(state): State<AppState>,
    Query(query): Query<InstanceQuery>,
) -> Result<Json<Vec<ReportInstanceRow>>, AppError> {
    Ok(Json(list_instances(&state.db, query.template_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateInstanceRequest {
    pub template_id: Uuid,
}

/// POST /api/v1/reports/instances
/// Materializes the template immediately and returns the new instance.
pub async fn handle_create_instance(
    State(state): State<AppState>,
    Json(request): Json<CreateInstanceRequest>,
) -> Result<(StatusCode, Json<ReportInstanceRow>), AppError> {
    let template = fetch_template(&state.db, request.template_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Report template {} not found", request.template_id))
        })?;

    let instance = materialize_template(&state.db, &template)
        .await
        .map_err(AppError::Internal)?;

    record_entry(
        &state.db,
        NewAuditEntry {
            actor: "admin",
            action: "report.generated",
            entity_type: "report_instance",
            entity_id: instance.id.to_string(),
            detail: json!({
                "template": template.name,
                "row_count": instance.row_count,
            }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(instance)))
}

/// GET /api/v1/reports/instances/:id/export
pub async fn handle_export_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let instance = fetch_instance(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report instance {id} not found")))?;
    let template = fetch_template(&state.db, instance.template_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Report template {} not found", instance.template_id))
        })?;

    let columns = template_columns(&template);
    let csv = instance_to_csv(&columns, &instance.payload).map_err(AppError::Internal)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"report-{id}.csv\""),
            ),
        ],
        csv,
    ))
}
