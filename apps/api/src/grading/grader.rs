//! Grader — pluggable, trait-based backend for interview grading.
//!
//! Default: `LlmGrader`, which assembles the grading payload and forwards it
//! to the AI grading service through `llm_client`. `AppState` holds an
//! `Arc<dyn Grader>` so the backend can be swapped without touching the
//! endpoint or handler code.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::grading::models::{GradeInterviewRequest, GradeReport};
use crate::grading::normalize::{normalize_report, RawGradeReport};
use crate::grading::payload::render_grading_payload;
use crate::grading::prompts::GRADING_SYSTEM;
use crate::llm_client::LlmClient;

#[async_trait]
pub trait Grader: Send + Sync {
    async fn grade(&self, request: &GradeInterviewRequest) -> Result<GradeReport, AppError>;
}

/// Grades by forwarding the assembled payload to the AI grading service
/// and normalizing whatever comes back.
pub struct LlmGrader(pub LlmClient);

#[async_trait]
impl Grader for LlmGrader {
    async fn grade(&self, request: &GradeInterviewRequest) -> Result<GradeReport, AppError> {
        let payload = render_grading_payload(request);
        let raw: RawGradeReport = self
            .0
            .complete_json(GRADING_SYSTEM, &payload)
            .await
            .map_err(|e| AppError::Grading(format!("Grading service call failed: {e}")))?;
        Ok(normalize_report(raw))
    }
}
