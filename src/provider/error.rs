//! Error types for remote insight providers.

use thiserror::Error;

/// Why a remote insight could not be produced.
///
/// The orchestrator treats every variant the same way (local fallback);
/// the split exists for logging and for the recorded error message.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Network failure, timeout, or an unexpected HTTP status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Credential missing or rejected.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The provider answered but the body was unusable.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
