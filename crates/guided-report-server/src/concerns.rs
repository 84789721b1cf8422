//! Concern analysis: turns a staff concern into a business case.

use async_trait::async_trait;
use guided_report_models::Concern;

use crate::llm::{LlmError, MessagesClient};

/// System prompt framing every analysis.
pub const SYSTEM_PROMPT: &str = "You are a business strategy advisor. You receive employee concerns, \
complaints, and communication issues from within a company.

Your job is to translate these into compelling business cases that resonate with management. \
For each concern:

- Identify the business impact (lost productivity, turnover risk, revenue impact, etc.)
- Quantify the impact where possible with reasonable estimates
- Frame the solution as a business win with clear ROI
- Use language that speaks to the bottom line

Be concise, data-driven, and persuasive. Output in markdown format with clear sections.";

/// Produces a markdown analysis for a concern.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyse `concern`.
    async fn analyze(&self, concern: &Concern) -> Result<String, LlmError>;
}

/// [`Analyzer`] backed by the Messages API.
pub struct ConcernsService {
    llm: MessagesClient,
}

impl ConcernsService {
    /// Wrap a Messages API client.
    pub fn new(llm: MessagesClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Analyzer for ConcernsService {
    async fn analyze(&self, concern: &Concern) -> Result<String, LlmError> {
        self.llm.message(SYSTEM_PROMPT, concern.as_str()).await
    }
}
