//! Error types shared by the word, scheduler and enhancement modules

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::enhancement::EnhancementField;
use crate::store::StoreError;

/// Why a single enhancement field could not be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The provider returned an error (transport, HTTP status, missing config)
    Provider(String),
    /// The provider did not answer within the configured bound
    Timeout(Duration),
    /// The provider answered, but nothing usable could be parsed out of it
    Malformed(String),
    /// The caller cancelled the generation
    Cancelled,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(msg) => write!(f, "provider error: {}", msg),
            Self::Timeout(limit) => write!(f, "timed out after {}s", limit.as_secs()),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Errors surfaced by the word-learning core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Word already exists in deck: {0}")]
    DuplicateWord(String),

    #[error("Invalid word: {0}")]
    InvalidWord(String),

    #[error("Word record not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid assessment: {0}")]
    InvalidAssessment(String),

    #[error("Unknown enhancement field: {0}")]
    InvalidField(String),

    #[error("Enhancement failed for {field}: {cause}")]
    EnhancementFailed {
        field: EnhancementField,
        cause: FailureCause,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Caller-input errors are never retried internally
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateWord(_)
                | Self::InvalidWord(_)
                | Self::InvalidAssessment(_)
                | Self::InvalidField(_)
        )
    }

    /// A failed field leaves the record untouched and can be requested again
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EnhancementFailed { .. })
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CoreError::DuplicateWord("ephemeral".into()).is_caller_error());
        assert!(CoreError::InvalidAssessment("maybe".into()).is_caller_error());
        assert!(!CoreError::NotFound(Uuid::new_v4()).is_caller_error());

        let failed = CoreError::EnhancementFailed {
            field: EnhancementField::Definition,
            cause: FailureCause::Timeout(Duration::from_secs(30)),
        };
        assert!(failed.is_retryable());
        assert!(!failed.is_caller_error());
        assert_eq!(
            failed.to_string(),
            "Enhancement failed for definition: timed out after 30s"
        );
    }
}
