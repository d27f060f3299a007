// Error taxonomy for the analytics stages.
//
// Every stage validates its own preconditions and fails fast with one of
// these kinds. Glue code (config, snapshot loading, the CLI) wraps them in
// anyhow errors; nothing here is retried or partially recovered.

use thiserror::Error;

/// Result alias used by the analytics stages.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Malformed or empty input to a stage
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Fewer samples than projection parameter selection requires
    #[error("Insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    /// An external collaborator has not produced the data a stage needs
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn insufficient_samples(required: usize, actual: usize) -> Self {
        Self::InsufficientSamples { required, actual }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }
}
