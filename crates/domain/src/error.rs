//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain
//! operations, enabling consistent error handling without forcing callers to
//! use String or anyhow.

use thiserror::Error;

use crate::value_objects::{ChallengeRating, CrParseError};

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Challenge rating is not a key in the CR -> XP ladder
    #[error("Challenge rating {0} has no experience entry in the ladder")]
    UnknownChallengeRating(ChallengeRating),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant or format.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<CrParseError> for DomainError {
    fn from(err: CrParseError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_challenge_rating_error() {
        let cr = ChallengeRating::whole(31);
        let err = DomainError::UnknownChallengeRating(cr);
        assert!(err.to_string().contains("31"));
        assert!(err.to_string().contains("no experience entry"));
    }

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("not a dice formula");
        assert!(matches!(err, DomainError::Parse(_)));
        assert_eq!(err.to_string(), "Parse error: not a dice formula");
    }

    #[test]
    fn test_from_cr_parse_error() {
        let cr_err = CrParseError::InvalidFormat("banana".to_string());
        let domain_err: DomainError = cr_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("banana"));
    }
}
