//! Guided-report analysis service.
//!
//! Receives a staff concern on `POST /analyze`, asks the language model to
//! reframe it as a business case for management, and returns the markdown
//! result. `GET /health` is a liveness probe.

mod concerns;
mod config;
mod error;
mod llm;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::concerns::ConcernsService;
use crate::config::AppConfig;
use crate::llm::MessagesClient;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if !dotenv_loaded {
        info!("no .env file found, using environment variables");
    }

    let config = AppConfig::from_env();
    if config.llm.api_key.is_none() {
        warn!("ANTHROPIC_API_KEY is not set, analyses will fail");
    }

    let llm = MessagesClient::new(config.llm.clone());
    info!(model = %llm.model(), base_url = %config.llm.base_url, "model client configured");

    let state = Arc::new(AppState {
        analyzer: Arc::new(ConcernsService::new(llm)),
    });
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(address = %addr, "analysis service listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
