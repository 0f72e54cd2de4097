use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::grading::grader::Grader;
use crate::notify::mailer::MailClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable grading backend. Default: `LlmGrader` over the Anthropic API.
    pub grader: Arc<dyn Grader>,
    pub mailer: MailClient,
    pub config: Config,
}
