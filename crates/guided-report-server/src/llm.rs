//! Minimal client for the language-model Messages API.
//!
//! One system prompt, one user turn, no streaming. The first `text` block
//! of the reply is returned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;

/// `anthropic-version` header sent with every call.
pub const API_VERSION: &str = "2023-06-01";

/// Errors of a Messages API call.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// `ANTHROPIC_API_KEY` is not configured.
    #[error("no API key configured")]
    MissingApiKey,

    /// Transport failure.
    #[error("failed to reach the model API: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("model API returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or the raw body.
        message: String,
    },

    /// The reply did not have the expected shape.
    #[error("unexpected model API response: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [UserTurn<'a>; 1],
}

#[derive(Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Messages API client bound to one model configuration.
#[derive(Debug, Clone)]
pub struct MessagesClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl MessagesClient {
    /// Create a client for `config`.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The model this client talks to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send `user` under the `system` prompt and return the reply text.
    ///
    /// A reply without any text block yields an empty string.
    pub async fn message(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let api_key = self.config.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'));

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: [UserTurn {
                role: "user",
                content: user,
            }],
        };

        debug!(model = %self.config.model, url = %url, "calling model API");
        let res = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes).map_or_else(
                |_| String::from_utf8_lossy(&bytes).into_owned(),
                |body| body.error.message,
            );
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = serde_json::from_slice(&bytes)?;
        Ok(first_text(body.content))
    }
}

fn first_text(blocks: Vec<ContentBlock>) -> String {
    blocks
        .into_iter()
        .find(|b| b.kind == "text")
        .and_then(|b| b.text)
        .unwrap_or_default()
}
