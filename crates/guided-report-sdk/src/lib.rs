//! # Guided Report SDK
//!
//! Client side of the concern-to-business-case flow.
//!
//! The SDK provides:
//!
//! * [`AnalysisClient`] - typed HTTP client for `POST /analyze` and
//!   `GET /health`.
//! * [`ConcernScreen`] - per-screen submission state machine
//!   (`Idle → Pending → Succeeded | Failed`) with one request in flight at
//!   most and cancellation when the screen closes.
//! * [`ClientConfig`] - explicit client configuration.
//! * [`SubmitError`] / [`SdkError`] - user-facing and low-level errors.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use guided_report_sdk::{AnalysisClient, ClientConfig, ConcernScreen, Phase};
//!
//! # async fn run() -> Result<(), guided_report_sdk::SdkError> {
//! let client = AnalysisClient::new(ClientConfig::from_env())?;
//! let screen = ConcernScreen::new(client);
//!
//! screen.edit("Housekeeping carts keep breaking on the third floor");
//! let _ = screen.submit().await;
//!
//! match screen.phase() {
//!     Phase::Succeeded(markdown) => println!("{markdown}"),
//!     Phase::Failed(message) => eprintln!("{message}"),
//!     _ => {}
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod submission;

#[cfg(test)]
mod test_support;

pub use client::AnalysisClient;
pub use config::ClientConfig;
pub use error::{SdkError, SubmitError};
pub use submission::{ConcernScreen, Phase, PhaseKind, SubmissionState};

pub use guided_report_models::{AnalyzeResponse, Concern, HealthStatus};
