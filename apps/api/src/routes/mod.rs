pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{assessments, audit, candidates, grading, notify, recommendations, reporting, scoring};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Legacy dashboard contract — paths predate the /api/v1 namespace
        .route(
            "/api/grade-interview",
            post(grading::handlers::handle_grade_interview),
        )
        .route(
            "/api/send-completion-notification",
            post(notify::handlers::handle_send_completion_notification),
        )
        // Recommendations dashboard
        .route(
            "/api/v1/recommendations",
            get(recommendations::handlers::handle_list_recommendations),
        )
        .route(
            "/api/v1/recommendations/:id/applied",
            patch(recommendations::handlers::handle_set_applied),
        )
        .route(
            "/api/v1/insights",
            get(recommendations::handlers::handle_list_insights),
        )
        .route(
            "/api/v1/predictions",
            get(recommendations::handlers::handle_list_predictions),
        )
        // Audit trail
        .route("/api/v1/audit", get(audit::handlers::handle_list_audit))
        .route(
            "/api/v1/audit/export",
            get(audit::handlers::handle_export_audit),
        )
        // Reporting
        .route(
            "/api/v1/reports/templates",
            get(reporting::handlers::handle_list_templates),
        )
        .route(
            "/api/v1/reports/schedules",
            get(reporting::handlers::handle_list_schedules),
        )
        .route(
            "/api/v1/reports/instances",
            get(reporting::handlers::handle_list_instances)
                .post(reporting::handlers::handle_create_instance),
        )
        .route(
            "/api/v1/reports/instances/:id/export",
            get(reporting::handlers::handle_export_instance),
        )
        // Candidates
        .route(
            "/api/v1/candidates",
            get(candidates::handlers::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handlers::handle_get_candidate),
        )
        // Scoring
        .route(
            "/api/v1/scoring/criteria",
            get(scoring::handlers::handle_list_criteria),
        )
        .route(
            "/api/v1/scoring/scores",
            get(scoring::handlers::handle_assessment_scores),
        )
        .route(
            "/api/v1/scoring/matrix",
            get(scoring::handlers::handle_skill_matrix),
        )
        // Assessments
        .route(
            "/api/v1/assessments",
            get(assessments::handlers::handle_list_assessments),
        )
        .route(
            "/api/v1/assessments/:id",
            get(assessments::handlers::handle_get_assessment),
        )
        .with_state(state)
}
