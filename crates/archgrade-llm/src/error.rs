//! Provider errors
use archgrade_core::EngineError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("{env_var} is not set")]
    MissingApiKey { env_var: String },

    #[error("request to {provider} failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned HTTP {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("{provider} response had no text: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Model text could not be read as an architecture record
    #[error("model output is not an architecture record: {0}")]
    Unparseable(String),

    #[error("no language model configured")]
    NoProviders,

    #[error("all language models failed: {}", .0.join("; "))]
    AllFailed(Vec<String>),
}

impl From<LlmError> for EngineError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unparseable(_) => EngineError::MalformedInput(err.to_string()),
            other => EngineError::UpstreamUnavailable(other.to_string()),
        }
    }
}
