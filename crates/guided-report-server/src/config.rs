//! Analysis service configuration.
//!
//! Built once at startup from environment variables (after `.env` has been
//! loaded) and handed to the components that need it.

/// Default model used for analyses.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Default Messages API root.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.anthropic.com";

/// Settings of the language-model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// API key sent as `x-api-key`. Calls fail while it is unset.
    pub api_key: Option<String>,
    /// Root of the Messages API (without `/v1/messages`).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Upper bound on generated tokens per analysis.
    pub max_tokens: u32,
}

/// Global configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to listen on (default `8080`).
    pub listen_port: u16,
    /// Language-model settings.
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable               | Default                       | Description               |
    /// |------------------------|-------------------------------|---------------------------|
    /// | `PORT`                 | `8080`                        | HTTP listen port          |
    /// | `ANTHROPIC_API_KEY`    | *(unset)*                     | Messages API key          |
    /// | `ANTHROPIC_BASE_URL`   | `https://api.anthropic.com`   | Messages API root         |
    /// | `ANTHROPIC_MODEL`      | `claude-sonnet-4-5-20250929`  | Model identifier          |
    /// | `ANTHROPIC_MAX_TOKENS` | `1024`                        | Max tokens per analysis   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_port = get("PORT").and_then(|v| v.parse().ok()).unwrap_or(8080);

        let llm = LlmConfig {
            api_key: get("ANTHROPIC_API_KEY"),
            base_url: get("ANTHROPIC_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            model: get("ANTHROPIC_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: get("ANTHROPIC_MAX_TOKENS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
        };

        Self { listen_port, llm }
    }
}
