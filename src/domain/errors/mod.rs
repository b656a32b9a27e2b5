// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
///
/// "Nothing matched" is never an error here; selection reports it as
/// [`SelectionResult::NoMatch`](crate::domain::model::SelectionResult).
/// These variants cover contract violations and I/O at the edges.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
    /// A caller broke a contract between components
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
    /// Media probing failed
    #[error("Probe failed: {0}")]
    ProbeFail(String),
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    ConfigFail(String),
    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),
    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}
