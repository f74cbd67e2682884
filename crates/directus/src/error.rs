//! Errors from the Directus client layer.

/// Errors produced by [`crate::DirectusApi`] and the services built on it.
#[derive(Debug, thiserror::Error)]
pub enum DirectusError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    ///
    /// `message` is the first message from the Directus error body when
    /// one could be parsed, otherwise a generic `HTTP <status>` line.
    #[error("Backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message for the page layer.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(String),
}

impl DirectusError {
    /// Whether this error means the bearer token was missing, invalid,
    /// or expired. Page loaders treat this as "no session".
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            DirectusError::Api {
                status: 401 | 403,
                ..
            }
        )
    }
}
