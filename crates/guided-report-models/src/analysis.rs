//! Request and response bodies of the analysis endpoint.

use serde::{Deserialize, Serialize};

use crate::concern::Concern;

/// Path of the analysis endpoint, relative to the service base URL.
pub const ANALYZE_PATH: &str = "/analyze";

/// Body of `POST /analyze`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    /// The concern to turn into a business case.
    pub concern: Concern,
}

impl AnalyzeRequest {
    /// Wrap a validated concern.
    pub fn new(concern: Concern) -> Self {
        Self { concern }
    }
}

/// Successful response of `POST /analyze`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeResponse {
    /// Markdown-formatted business case.
    pub analysis: String,
}

/// Body returned by the service alongside any non-2xx status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error description.
    pub error: String,
}

impl ErrorBody {
    /// Build an error body from any displayable message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let req = AnalyzeRequest::new(Concern::new(" late payroll ").unwrap());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({ "concern": " late payroll " }));
    }

    #[test]
    fn request_without_concern_fails() {
        assert!(serde_json::from_str::<AnalyzeRequest>("{}").is_err());
        assert!(serde_json::from_str::<AnalyzeRequest>(r#"{"concern": 3}"#).is_err());
        assert!(serde_json::from_str::<AnalyzeRequest>(r#"{"concern": ""}"#).is_err());
    }

    #[test]
    fn response_requires_string_analysis() {
        let ok: AnalyzeResponse = serde_json::from_str(r##"{"analysis":"# Hi"}"##).unwrap();
        assert_eq!(ok.analysis, "# Hi");

        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"analysis": null}"#).is_err());
        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"result": "x"}"#).is_err());
    }

    #[test]
    fn error_body_wire_shape() {
        let body = ErrorBody::new("failed to analyze concern");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"failed to analyze concern"}"#
        );
    }
}
