//! Error types for authorization operations
//!
//! Authorization-negative results are never errors: a failed permission
//! check is the core's correct output (`false`), and an absent identity
//! is a normal logged-out state. Errors cover only invalid transitions
//! of the authorization context itself.

use thiserror::Error;

/// Authorization error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// Impersonation was requested before any session was established
    #[error("No active session")]
    NoActiveSession,

    /// The impersonation target identity is missing or malformed
    #[error("Invalid impersonation target: {0}")]
    InvalidImpersonationTarget(String),
}

/// Result type for authorization operations.
pub type AuthzResult<T> = Result<T, AuthzError>;

impl AuthzError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::NoActiveSession => 401,
            AuthzError::InvalidImpersonationTarget(_) => 422,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::NoActiveSession => "NO_ACTIVE_SESSION",
            AuthzError::InvalidImpersonationTarget(_) => "INVALID_IMPERSONATION_TARGET",
        }
    }
}
