use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummerizerError {
    /// Wrong file type, undecodable upload or an empty prompt.
    #[error("validation rejected: {0}")]
    ValidationRejected(String),

    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    #[error("no summary was handed over to the refinement view")]
    NavigationStateMissing,

    #[error("a request is already in flight")]
    InFlight,

    #[error("invalid summary: {0}")]
    InvalidSummary(String),

    #[error("session {0} not found")]
    SessionNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for SummerizerError {
    fn from(error: anyhow::Error) -> Self {
        SummerizerError::ProcessingFailed(error.to_string())
    }
}
