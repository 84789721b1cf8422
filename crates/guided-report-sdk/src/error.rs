//! SDK error types.
//!
//! [`SdkError`] is returned by the raw [`AnalysisClient`](crate::AnalysisClient)
//! calls. [`SubmitError`] is the user-facing taxonomy produced at the
//! submission boundary; its `Display` output is the message shown inline.

/// Fallback shown when a failure carries no usable description.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Message shown for any non-2xx answer of the analysis service.
pub const REQUEST_FAILED: &str = "Failed to analyze concern";

/// Error type for the low-level client operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid configuration (e.g. malformed base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure of one concern submission.
///
/// The `Display` output of each variant is the text rendered in the error
/// box of the screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The concern was empty after trimming. No request was issued.
    #[error("Please describe your concern before submitting.")]
    EmptyInput,

    /// The service answered with a non-2xx status. The body is ignored.
    #[error("Failed to analyze concern")]
    RequestFailed {
        /// HTTP status code, kept for logging.
        status: u16,
    },

    /// Connectivity failure or malformed response body.
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_FAILURE))]
    NetworkOrParse(Option<String>),

    /// A submission from the same screen is already in flight.
    #[error("a submission is already in progress")]
    AlreadyPending,

    /// The screen was closed before the response arrived.
    #[error("submission cancelled")]
    Cancelled,
}

impl From<SdkError> for SubmitError {
    fn from(e: SdkError) -> Self {
        let describe = |msg: String| {
            let msg = msg.trim().to_string();
            Self::NetworkOrParse((!msg.is_empty()).then_some(msg))
        };
        match e {
            SdkError::Status { status } => Self::RequestFailed { status },
            SdkError::Config(msg) => describe(msg),
            other => describe(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_ignores_status() {
        let a = SubmitError::RequestFailed { status: 500 };
        let b = SubmitError::RequestFailed { status: 404 };
        assert_eq!(a.to_string(), REQUEST_FAILED);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn network_error_uses_description_or_fallback() {
        let described = SubmitError::NetworkOrParse(Some("connection refused".into()));
        assert_eq!(described.to_string(), "connection refused");

        let bare = SubmitError::NetworkOrParse(None);
        assert_eq!(bare.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn status_maps_to_request_failed() {
        let e: SubmitError = SdkError::Status { status: 503 }.into();
        assert_eq!(e, SubmitError::RequestFailed { status: 503 });
    }

    #[test]
    fn serialization_maps_to_network_or_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: SubmitError = SdkError::Serialization(json_err).into();
        match e {
            SubmitError::NetworkOrParse(Some(msg)) => {
                assert!(msg.contains("invalid response body"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_config_message_falls_back() {
        let e: SubmitError = SdkError::Config(String::new()).into();
        assert_eq!(e, SubmitError::NetworkOrParse(None));
    }
}
