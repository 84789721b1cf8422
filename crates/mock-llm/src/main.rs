//! Stand-in for the Messages API.
//!
//! Answers `POST /v1/messages` with a canned markdown business case built
//! from the first line of the user turn, so the analysis service can run
//! without network access or an API key.
//!
//! ```text
//! MOCK_LLM_PORT=4010 cargo run -p mock-llm
//! ANTHROPIC_BASE_URL=http://localhost:4010 ANTHROPIC_API_KEY=mock cargo run -p guided-report-server
//! ```

use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("MOCK_LLM_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4010);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "mock-llm listening");
    axum::serve(listener, app()).await?;
    Ok(())
}

fn app() -> Router {
    Router::new().route("/v1/messages", post(messages))
}

#[derive(Deserialize)]
struct MessagesRequest {
    model: String,
    #[serde(default)]
    messages: Vec<Turn>,
}

#[derive(Deserialize)]
struct Turn {
    role: String,
    content: Value,
}

async fn messages(Json(req): Json<MessagesRequest>) -> Json<Value> {
    let concern = req
        .messages
        .iter()
        .rev()
        .find(|t| t.role == "user")
        .map(|t| turn_text(&t.content))
        .unwrap_or_default();

    let headline = concern
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("Unspecified concern");
    info!(model = %req.model, chars = concern.chars().count(), "mock completion");

    Json(json!({
        "id": "msg_mock",
        "type": "message",
        "role": "assistant",
        "model": req.model,
        "content": [{ "type": "text", "text": business_case(headline) }],
        "stop_reason": "end_turn"
    }))
}

/// Content may be a plain string or a list of blocks.
fn turn_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn business_case(headline: &str) -> String {
    format!(
        "## Business Case: {headline}\n\n\
         ### Impact\n\
         - Lost staff time every shift\n\
         - Guest satisfaction and review scores at risk\n\n\
         ### Recommendation\n\
         Address the issue this quarter; the fix pays back within months.\n"
    )
}
