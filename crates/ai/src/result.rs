use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::completion::CompletionError;

/// Why an advisor fell back to its deterministic decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AdviceFailure {
    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("completion timed out")]
    Timeout,

    #[error("completion service credentials missing")]
    AuthMissing,

    /// Unparsable or schema-violating payload.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed payload referencing data absent from the request.
    #[error("validation failure: {0}")]
    ValidationFailure(String),
}

impl From<CompletionError> for AdviceFailure {
    fn from(value: CompletionError) -> Self {
        match value {
            CompletionError::Network(msg) => AdviceFailure::NetworkFailure(msg),
            CompletionError::Timeout => AdviceFailure::Timeout,
            CompletionError::AuthMissing => AdviceFailure::AuthMissing,
            CompletionError::MalformedResponse(msg) => AdviceFailure::MalformedResponse(msg),
        }
    }
}

/// Where a piece of advice came from.
///
/// Callers branch on this instead of matching on reasoning text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum AdviceSource {
    /// Validated model output.
    Ai,
    /// Deterministic default, with the failure that triggered it.
    Fallback(AdviceFailure),
}

impl AdviceSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, AdviceSource::Fallback(_))
    }

    pub fn failure(&self) -> Option<&AdviceFailure> {
        match self {
            AdviceSource::Ai => None,
            AdviceSource::Fallback(f) => Some(f),
        }
    }
}

/// Errors an advisor returns to its caller.
///
/// Remote failures never surface here; they end in a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
