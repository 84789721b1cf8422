//! Per-screen submission state machine.
//!
//! ```text
//! Idle ──submit──▶ Pending ──2xx──────────▶ Succeeded(analysis)
//!                     │                         │
//!                     └──error──▶ Failed(msg)   │
//!                                   │           │
//!                                   └──submit───┴──▶ Pending …
//! ```
//!
//! A [`ConcernScreen`] owns one [`SubmissionState`]. Every transition is
//! published on a watch channel so a view can re-render. At most one
//! request is in flight per screen. Closing (or dropping) the screen
//! cancels its scope: a response that arrives afterwards is discarded.

use std::sync::Arc;

use guided_report_models::Concern;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::AnalysisClient;
use crate::error::SubmitError;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Mutually exclusive phase of the submission flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The service returned an analysis (markdown).
    Succeeded(String),
    /// The last submission failed; the message is shown inline.
    Failed(String),
}

/// Discriminant of [`Phase`], for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PhaseKind {
    /// See [`Phase::Idle`].
    Idle,
    /// See [`Phase::Pending`].
    Pending,
    /// See [`Phase::Succeeded`].
    Succeeded,
    /// See [`Phase::Failed`].
    Failed,
}

impl Phase {
    /// The discriminant of this phase.
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::Pending => PhaseKind::Pending,
            Self::Succeeded(_) => PhaseKind::Succeeded,
            Self::Failed(_) => PhaseKind::Failed,
        }
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The analysis, if the last submission succeeded.
    pub fn analysis(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The error message, if the last submission failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Transient state of one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    /// Current contents of the input field.
    pub concern_text: String,
    /// Current phase.
    pub phase: Phase,
}

// ---------------------------------------------------------------------------
// ConcernScreen
// ---------------------------------------------------------------------------

struct Shared {
    client: AnalysisClient,
    state: watch::Sender<SubmissionState>,
    closed: watch::Sender<bool>,
}

/// The concern form of one screen instance.
///
/// Dropping the screen closes it.
pub struct ConcernScreen {
    shared: Arc<Shared>,
}

impl ConcernScreen {
    /// Open a screen in the `Idle` phase with an empty input.
    pub fn new(client: AnalysisClient) -> Self {
        let (state, _) = watch::channel(SubmissionState::default());
        let (closed, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                client,
                state,
                closed,
            }),
        }
    }

    /// Replace the input text. Allowed in every phase.
    pub fn edit(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.state.send_if_modified(|state| {
            if state.concern_text == text {
                return false;
            }
            state.concern_text = text;
            true
        });
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SubmissionState {
        self.shared.state.borrow().clone()
    }

    /// Snapshot of the current phase.
    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase.clone()
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_closed() && !self.shared.state.borrow().phase.is_pending()
    }

    /// Receive every state change (input edits and phase transitions).
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.shared.state.subscribe()
    }

    /// Submit the current input.
    ///
    /// # Errors
    ///
    /// * [`SubmitError::AlreadyPending`] when a request is already in
    ///   flight; the state is left untouched.
    /// * [`SubmitError::Cancelled`] when the screen is (or gets) closed; a
    ///   late result is discarded and the state is left untouched.
    /// * any other [`SubmitError`], which is also stored as
    ///   [`Phase::Failed`].
    pub async fn submit(&self) -> Result<String, SubmitError> {
        self.shared.submit().await
    }

    /// Submit on a background task, detached from the caller's lifetime.
    ///
    /// The task holds the screen's shared state; closing or dropping the
    /// screen still cancels it.
    pub fn spawn_submit(&self) -> JoinHandle<Result<String, SubmitError>> {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.submit().await })
    }

    /// Close the screen: pending requests are abandoned and no further
    /// transition is applied.
    pub fn close(&self) {
        self.shared.closed.send_if_modified(|closed| {
            if *closed {
                return false;
            }
            *closed = true;
            true
        });
    }

    /// Whether [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        *self.shared.closed.borrow()
    }
}

impl Drop for ConcernScreen {
    fn drop(&mut self) {
        self.close();
    }
}

impl Shared {
    async fn submit(&self) -> Result<String, SubmitError> {
        if *self.closed.borrow() {
            return Err(SubmitError::Cancelled);
        }

        let concern = self.begin()?;
        info!(
            phase = %PhaseKind::Pending,
            chars = concern.char_count(),
            "concern submitted"
        );

        let mut closed = self.closed.subscribe();
        let result = tokio::select! {
            result = self.client.analyze(&concern) => result.map_err(SubmitError::from),
            _ = closed.wait_for(|closed| *closed) => {
                debug!("screen closed while pending, dropping request");
                return Err(SubmitError::Cancelled);
            }
        };

        if *self.closed.borrow() {
            debug!("screen closed before completion, discarding result");
            return Err(SubmitError::Cancelled);
        }

        self.finish(&result);
        result
    }

    /// Move to `Pending`, or reject the submission.
    fn begin(&self) -> Result<Concern, SubmitError> {
        let mut outcome = Err(SubmitError::AlreadyPending);
        self.state.send_if_modified(|state| {
            if state.phase.is_pending() {
                return false;
            }
            match Concern::new(state.concern_text.as_str()) {
                Ok(concern) => {
                    state.phase = Phase::Pending;
                    outcome = Ok(concern);
                }
                Err(_) => {
                    state.phase = Phase::Failed(SubmitError::EmptyInput.to_string());
                    outcome = Err(SubmitError::EmptyInput);
                    debug!(phase = %state.phase.kind(), "blank concern rejected");
                }
            }
            true
        });
        if outcome == Err(SubmitError::AlreadyPending) {
            debug!("submission ignored, request already in flight");
        }
        outcome
    }

    fn finish(&self, result: &Result<String, SubmitError>) {
        let phase = match result {
            Ok(analysis) => Phase::Succeeded(analysis.clone()),
            Err(e) => Phase::Failed(e.to_string()),
        };
        let kind = phase.kind();
        self.state.send_modify(|state| state.phase = phase);
        match result {
            Ok(analysis) => info!(
                phase = %kind,
                chars = analysis.chars().count(),
                "analysis received"
            ),
            Err(e) => warn!(phase = %kind, error = ?e, "analysis failed"),
        }
    }
}
