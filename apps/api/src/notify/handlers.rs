use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::audit::{record_entry, NewAuditEntry};
use crate::errors::AppError;
use crate::notify::compose::{
    admin_email, candidate_email, is_valid_address, CompletionNotificationRequest,
};
use crate::notify::mailer::OutboundEmail;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResponse {
    pub success: bool,
    pub candidate_email_id: String,
    pub admin_email_id: String,
}

/// POST /api/send-completion-notification
///
/// Sends the candidate congratulation and the admin summary, in that order.
/// Either send failing fails the request; the dashboard retries as a whole.
pub async fn handle_send_completion_notification(
    State(state): State<AppState>,
    Json(request): Json<CompletionNotificationRequest>,
) -> Result<Json<SendNotificationResponse>, AppError> {
    if request.candidate_name.trim().is_empty() {
        return Err(AppError::Validation(
            "candidateName cannot be empty".to_string(),
        ));
    }
    if request.assessment_title.trim().is_empty() {
        return Err(AppError::Validation(
            "assessmentTitle cannot be empty".to_string(),
        ));
    }
    if !is_valid_address(&request.candidate_email) {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            request.candidate_email
        )));
    }

    let candidate = candidate_email(&request);
    let candidate_email_id = state
        .mailer
        .send(&OutboundEmail {
            from: &state.config.mail_from,
            to: &request.candidate_email,
            subject: &candidate.subject,
            html: &candidate.html,
        })
        .await
        .map_err(|e| AppError::Mail(format!("Candidate email failed: {e}")))?;

    let admin = admin_email(&request);
    let admin_email_id = state
        .mailer
        .send(&OutboundEmail {
            from: &state.config.mail_from,
            to: &state.config.admin_email,
            subject: &admin.subject,
            html: &admin.html,
        })
        .await
        .map_err(|e| AppError::Mail(format!("Admin email failed: {e}")))?;

    info!(
        "Completion notification sent for '{}' ({} / {})",
        request.assessment_title, candidate_email_id, admin_email_id
    );

    record_entry(
        &state.db,
        NewAuditEntry {
            actor: "notification-service",
            action: "notification.sent",
            entity_type: "notification",
            entity_id: request.candidate_email.clone(),
            detail: json!({
                "candidate": request.candidate_name,
                "assessment": request.assessment_title,
                "candidate_email_id": candidate_email_id,
                "admin_email_id": admin_email_id,
            }),
        },
    )
    .await?;

    Ok(Json(SendNotificationResponse {
        success: true,
        candidate_email_id,
        admin_email_id,
    }))
}
