//! Client configuration.
//!
//! The base URL of the analysis service is passed explicitly at
//! construction. Binaries can build a [`ClientConfig`] from the environment
//! with [`ClientConfig::from_env`].

use std::time::Duration;

use crate::error::SdkError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_URL_ENV: &str = "GUIDED_REPORT_API_URL";

/// Settings of an [`AnalysisClient`](crate::AnalysisClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:8080`. A trailing `/` is ignored.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url`, without timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable                | Default                 |
    /// |-------------------------|-------------------------|
    /// | `GUIDED_REPORT_API_URL` | `http://localhost:8080` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Set a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check that the base URL is an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] for any other scheme or an empty host.
    pub fn validate(&self) -> Result<(), SdkError> {
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or_else(|| {
                SdkError::Config(format!(
                    "base URL must start with http:// or https://: {}",
                    self.base_url
                ))
            })?;
        if rest.trim_matches('/').is_empty() {
            return Err(SdkError::Config(format!(
                "base URL has no host: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Join `path` (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}
