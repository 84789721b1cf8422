//! Liveness probe body.

use serde::{Deserialize, Serialize};

/// Path of the liveness probe, relative to the service base URL.
pub const HEALTH_PATH: &str = "/health";

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    /// `"ok"` when the service is up.
    pub status: String,
}

impl HealthStatus {
    /// The healthy status.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Whether the status reports a healthy service.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
