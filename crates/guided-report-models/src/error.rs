//! Error types for the `guided-report-models` crate.

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A concern was empty or contained only whitespace.
    #[error("concern must not be empty")]
    EmptyConcern,
}
