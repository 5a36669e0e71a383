//! Unified Error Model
//!
//! The scoring core is total and never returns these; they describe
//! failures at the boundary around it.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Input could not be read as an architecture record
    #[error("INPUT/{0}")]
    MalformedInput(String),

    /// A decomposition or explanation collaborator failed
    #[error("UPSTREAM/{0}")]
    UpstreamUnavailable(String),

    /// Neither free text nor a structured record was supplied
    #[error("REQUEST/{0}")]
    InvalidRequest(String),

    /// Scoring profile could not be loaded
    #[error("PROFILE/{0}")]
    Profile(String),
}

impl EngineError {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::MalformedInput(_) => "malformed_input",
            EngineError::UpstreamUnavailable(_) => "upstream_unavailable",
            EngineError::InvalidRequest(_) => "invalid_request",
            EngineError::Profile(_) => "profile",
        }
    }
}
