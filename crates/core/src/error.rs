//! Domain-level error type.

/// Errors produced by domain logic, independent of any transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed validation (empty required field, bad status value, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}
