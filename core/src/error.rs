use crate::job::JobState;
use thiserror::Error;

/// Failures surfaced to the user. `Display` is the text shown in the
/// inline panel or alert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Status channel error: {0}")]
    Channel(String),

    #[error("{0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    #[error("Invalid job state transition: {from:?} -> {to}")]
    InvalidTransition { from: JobState, to: &'static str },
}
