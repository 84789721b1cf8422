//! HTTP client for the analysis service.
//!
//! [`AnalysisClient`] issues exactly one request per call and never
//! retries.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use guided_report_sdk::{AnalysisClient, ClientConfig};
//!
//! # async fn run() -> Result<(), guided_report_sdk::SubmitError> {
//! let client = AnalysisClient::new(ClientConfig::default())
//!     .map_err(guided_report_sdk::SubmitError::from)?;
//!
//! let markdown = client.submit("The laundry lift has been down for a week").await?;
//! println!("{markdown}");
//! # Ok(())
//! # }
//! ```

use guided_report_models::{
    AnalyzeRequest, AnalyzeResponse, Concern, HealthStatus, ANALYZE_PATH, HEALTH_PATH,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{SdkError, SubmitError};

/// Typed HTTP client for `POST /analyze` and `GET /health`.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl AnalysisClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] when the base URL is not an HTTP(S) URL,
    /// or [`SdkError::Http`] when the HTTP stack cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Raw calls
    // ------------------------------------------------------------------

    /// Send `concern` verbatim and return the markdown analysis.
    ///
    /// # Errors
    ///
    /// * [`SdkError::Status`] for any non-2xx answer (the body is dropped);
    /// * [`SdkError::Http`] for transport failures;
    /// * [`SdkError::Serialization`] when the body is not `{ "analysis": string }`.
    pub async fn analyze(&self, concern: &Concern) -> Result<String, SdkError> {
        let url = self.config.endpoint(ANALYZE_PATH);
        debug!(url = %url, chars = concern.char_count(), "sending concern");

        let res = self
            .http
            .post(&url)
            .json(&AnalyzeRequest::new(concern.clone()))
            .send()
            .await?;

        let body: AnalyzeResponse = Self::read_json(res).await?;
        Ok(body.analysis)
    }

    /// Query the liveness probe.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`analyze`](Self::analyze).
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let res = self.http.get(self.config.endpoint(HEALTH_PATH)).send().await?;
        Self::read_json(res).await
    }

    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, SdkError> {
        let status = res.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "service returned an error status");
            return Err(SdkError::Status {
                status: status.as_u16(),
            });
        }
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // ------------------------------------------------------------------
    // Submission boundary
    // ------------------------------------------------------------------

    /// Validate `concern_text` and submit it.
    ///
    /// Whitespace is only trimmed to decide emptiness; the text is sent as
    /// given.
    ///
    /// # Errors
    ///
    /// [`SubmitError::EmptyInput`] without any network call when the text is
    /// blank, otherwise the [`SubmitError`] mapping of the underlying
    /// [`SdkError`].
    pub async fn submit(&self, concern_text: &str) -> Result<String, SubmitError> {
        let concern = Concern::new(concern_text).map_err(|_| SubmitError::EmptyInput)?;
        Ok(self.analyze(&concern).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;

    use super::*;
    use crate::error::REQUEST_FAILED;
    use crate::test_support::{refused_base_url, StubServer};

    fn client_for(base_url: &str) -> AnalysisClient {
        AnalysisClient::new(ClientConfig::new(base_url)).unwrap()
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = AnalysisClient::new(ClientConfig::new("localhost:8080")).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn keeps_its_configuration() {
        let config =
            ClientConfig::new("http://127.0.0.1:9/").with_timeout(Duration::from_secs(3));
        let client = AnalysisClient::new(config.clone()).unwrap();
        assert_eq!(client.config(), &config);
    }

    #[tokio::test]
    async fn blank_input_never_reaches_the_network() {
        let stub = StubServer::analysis("unused").await;
        let client = client_for(&stub.base_url);

        for text in ["", "   ", "\n\t"] {
            assert_eq!(client.submit(text).await, Err(SubmitError::EmptyInput));
        }
        assert_eq!(stub.hits(), 0);
    }

    #[tokio::test]
    async fn sends_raw_text_as_json() {
        let stub = StubServer::analysis("# Case").await;
        let client = client_for(&stub.base_url);

        let analysis = client.submit("  wobbly banister  ").await.unwrap();
        assert_eq!(analysis, "# Case");

        let recorded = stub.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0].body,
            serde_json::json!({ "concern": "  wobbly banister  " })
        );
        assert_eq!(recorded[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn server_error_body_is_not_surfaced() {
        let stub = StubServer::spawn(Duration::ZERO, |_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"model quota exceeded"}"#.to_string(),
            )
        })
        .await;
        let client = client_for(&stub.base_url);

        let err = client.submit("x").await.unwrap_err();
        assert_eq!(err, SubmitError::RequestFailed { status: 500 });
        assert_eq!(err.to_string(), REQUEST_FAILED);
    }

    #[tokio::test]
    async fn wrong_shape_is_a_parse_failure() {
        let stub = StubServer::spawn(Duration::ZERO, |_| {
            (StatusCode::OK, r##"{"result":"# Hi"}"##.to_string())
        })
        .await;
        let client = client_for(&stub.base_url);

        match client.submit("x").await {
            Err(SubmitError::NetworkOrParse(Some(msg))) => {
                assert!(msg.contains("analysis"), "{msg}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_carries_description() {
        let client = client_for(&refused_base_url().await);

        match client.submit("x").await {
            Err(SubmitError::NetworkOrParse(Some(msg))) => {
                assert!(!msg.is_empty());
                assert_ne!(msg, REQUEST_FAILED);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_reported_as_network_failure() {
        let stub = StubServer::spawn(Duration::from_millis(500), |_| {
            (StatusCode::OK, r#"{"analysis":"late"}"#.to_string())
        })
        .await;
        let client = AnalysisClient::new(
            ClientConfig::new(&stub.base_url).with_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        assert!(matches!(
            client.submit("x").await,
            Err(SubmitError::NetworkOrParse(_))
        ));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let stub = StubServer::analysis("unused").await;
        let status = client_for(&stub.base_url).health().await.unwrap();
        assert!(status.is_ok());
    }
}
