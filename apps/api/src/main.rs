mod assessments;
mod audit;
mod candidates;
mod config;
mod db;
mod errors;
mod grading;
mod llm_client;
mod models;
mod notify;
mod recommendations;
mod reporting;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::grading::grader::LlmGrader;
use crate::llm_client::LlmClient;
use crate::notify::mailer::MailClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Proctor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the grading backend
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    let grader = Arc::new(LlmGrader(llm));
    info!("Grading client initialized (model: {})", llm_client::MODEL);

    // Initialize the transactional mail client
    let mailer = MailClient::new(config.mail_api_key.clone());
    info!("Mail client initialized");

    // Build app state
    let state = AppState {
        db,
        grader,
        mailer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the dashboard is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
