//! Axum route handler for the grading endpoint.

use axum::{extract::State, Json};
use serde_json::json;
use tracing::info;

use crate::assessments::{fetch_assessment, store_grade};
use crate::audit::{record_entry, NewAuditEntry};
use crate::errors::AppError;
use crate::grading::models::{GradeInterviewRequest, GradeReport};
use crate::state::AppState;

/// POST /api/grade-interview
///
/// Validates the submission, forwards the assembled payload to the grading
/// backend, persists the normalized report onto the assessment, and returns it.
pub async fn handle_grade_interview(
    State(state): State<AppState>,
    Json(request): Json<GradeInterviewRequest>,
) -> Result<Json<GradeReport>, AppError> {
    validate(&request)?;

    let assessment = fetch_assessment(&state.db, request.assessment_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Assessment {} not found", request.assessment_id))
        })?;

    info!("Grading assessment {} ({})", assessment.id, assessment.title);

    let report = state.grader.grade(&request).await?;

    store_grade(&state.db, request.assessment_id, &report).await?;

    record_entry(
        &state.db,
        NewAuditEntry {
            actor: "grading-service",
            action: "assessment.graded",
            entity_type: "assessment",
            entity_id: request.assessment_id.to_string(),
            detail: json!({
                "overall_score": report.overall_score,
                "confidence": report.confidence,
                "criteria": report.criterion_scores.len(),
            }),
        },
    )
    .await?;

    Ok(Json(report))
}

fn validate(request: &GradeInterviewRequest) -> Result<(), AppError> {
    if request.problem_description.trim().is_empty() {
        return Err(AppError::Validation(
            "problemDescription cannot be empty".to_string(),
        ));
    }
    if request.rubric.trim().is_empty() {
        return Err(AppError::Validation("rubric cannot be empty".to_string()));
    }
    if request.transcript.is_empty() {
        return Err(AppError::Validation(
            "transcript cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::models::{DiagramGraph, Transcript};
    use uuid::Uuid;

    fn make_request(problem: &str, rubric: &str, transcript: Transcript) -> GradeInterviewRequest {
        GradeInterviewRequest {
            problem_description: problem.to_string(),
            rubric: rubric.to_string(),
            transcript,
            diagram_json: DiagramGraph::default(),
            assessment_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let request = make_request(
            "Design a cache",
            "Correctness (50%), Communication (50%)",
            Transcript::Text("We discussed LRU eviction.".to_string()),
        );
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn test_empty_problem_rejected() {
        let request = make_request("  ", "rubric", Transcript::Text("talk".to_string()));
        assert!(matches!(validate(&request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_empty_rubric_rejected() {
        let request = make_request("problem", "", Transcript::Text("talk".to_string()));
        assert!(matches!(validate(&request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_transcript_rejected() {
        let request = make_request("problem", "rubric", Transcript::Text("   ".to_string()));
        assert!(matches!(validate(&request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_request_parses_dashboard_wire_format() {
        let body = serde_json::json!({
            "problemDescription": "Design a rate limiter",
            "rubric": "Scalability (100%)",
            "transcript": [
                {"speaker": "candidate", "text": "Token bucket per user."}
            ],
            "diagramJson": {
                "nodes": [{"id": "n1", "label": "Redis", "type": "cache"}],
                "edges": []
            },
            "assessment_id": "5f8c1a2e-8f0f-4f69-9a1c-31c86a5f4b6d"
        });
        let request: GradeInterviewRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.problem_description, "Design a rate limiter");
        assert_eq!(request.diagram_json.nodes.len(), 1);
        assert!(!request.transcript.is_empty());
    }

    #[test]
    fn test_request_accepts_missing_diagram() {
        let body = serde_json::json!({
            "problemDescription": "Design a queue",
            "rubric": "Depth (100%)",
            "transcript": "flat transcript",
            "assessment_id": "5f8c1a2e-8f0f-4f69-9a1c-31c86a5f4b6d"
        });
        let request: GradeInterviewRequest = serde_json::from_value(body).unwrap();
        assert!(request.diagram_json.nodes.is_empty());
    }
}
