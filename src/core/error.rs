/*!
# Unified Error Type

This module provides the unified error enum for all Pathina operations.

Only genuine failures are errors: invalid inputs detectable before a search
starts (`InvalidArgument`) and a search exceeding its cooperative expansion
budget (`Timeout`). The absence of a path is *not* an error: search engines
signal it by returning an empty path.
*/

use std::error::Error;
use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PathinaError>;

/// Unified error type for all Pathina operations.
///
/// This enum consolidates all error conditions for better error handling and
/// pattern matching.
#[derive(Debug, Clone, PartialEq)]
pub enum PathinaError {
    /// Invalid argument or parameter (bad node id, negative weight where a
    /// non-negative one is required, mismatched vector length, invalid enum
    /// code, NaN cost).
    InvalidArgument(String),

    /// Cooperative expansion budget exhausted.
    Timeout(String),

    /// Algorithm terminated unexpectedly.
    Algorithm(String),
}

impl PathinaError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PathinaError::InvalidArgument(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        PathinaError::Timeout(message.into())
    }

    /// Creates an algorithm error.
    pub fn algorithm(message: impl Into<String>) -> Self {
        PathinaError::Algorithm(message.into())
    }
}

impl fmt::Display for PathinaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathinaError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            PathinaError::Timeout(msg) => write!(f, "Search timed out: {}", msg),
            PathinaError::Algorithm(msg) => write!(f, "Algorithm error: {}", msg),
        }
    }
}

impl Error for PathinaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = PathinaError::invalid_argument("node id 7 out of range");
        assert_eq!(format!("{}", err), "Invalid argument: node id 7 out of range");
    }

    #[test]
    fn test_timeout_display() {
        let err = PathinaError::timeout("exceeded 1000 expansions");
        assert_eq!(format!("{}", err), "Search timed out: exceeded 1000 expansions");
    }

    #[test]
    fn test_algorithm_display() {
        let err = PathinaError::algorithm("path reconstruction failed");
        assert_eq!(format!("{}", err), "Algorithm error: path reconstruction failed");
    }
}
