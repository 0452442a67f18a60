use thiserror::Error;

/// Errors produced by the recommendation pipeline.
///
/// Lines that fail to parse are not errors; the parser drops them silently.
#[derive(Debug, Error)]
pub enum MoodError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API Error: {status_code} - {body}")]
    Api { status_code: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MoodError {
    /// True for failures that originate from the completion endpoint or the
    /// transport in front of it.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            MoodError::Api { .. } | MoodError::Network(_) | MoodError::MalformedResponse(_)
        )
    }
}

impl From<reqwest::Error> for MoodError {
    fn from(e: reqwest::Error) -> Self {
        MoodError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for MoodError {
    fn from(e: serde_json::Error) -> Self {
        MoodError::MalformedResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MoodError>;
