use thiserror::Error;

/// A wrapper for all kinds of transport and parsing failures into one enum
/// that tells us what happened.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LLMError {
    #[error("Request timed out")]
    Timeout,
    #[error("A network connectivity error occurred")]
    Network,
    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),
    #[error("Unknown error occurred: {0}")]
    Generic(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(error: reqwest::Error) -> LLMError {
        if error.is_timeout() {
            LLMError::Timeout
        } else if error.is_connect() {
            LLMError::Network
        } else {
            LLMError::Generic(error.to_string())
        }
    }
}
