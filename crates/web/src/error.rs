//! Application-level error type for page handlers.
//!
//! Most failures are handled inline (validation errors re-render the page,
//! read failures were already swallowed in the client layer). `AppError`
//! is the escape hatch for whatever propagates out of a handler.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use todozen_core::error::CoreError;
use todozen_directus::DirectusError;

use crate::pages;

/// Errors escaping a page handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `todozen_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A backend call failure from the Directus client.
    #[error(transparent)]
    Directus(#[from] DirectusError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Authentication failures are always resolved as "no user".
        let auth_failure = matches!(
            &self,
            AppError::Core(CoreError::Unauthorized(_))
        ) || matches!(&self, AppError::Directus(err) if err.is_auth_failure());

        if auth_failure {
            return Redirect::to("/login").into_response();
        }

        let (status, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Directus(err) => {
                tracing::error!(error = %err, "Backend call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Something went wrong talking to the backend. Please try again.".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Html(pages::error_page(&message))).into_response()
    }
}
