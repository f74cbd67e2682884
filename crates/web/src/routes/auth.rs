//! Login, registration, and logout pages and actions.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use todozen_core::auth::{Credentials, Registration};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::{pages, session};

/// Reject empty or whitespace-only form fields.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    #[serde(default)]
    registered: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(custom(function = non_blank))]
    pub email: String,
    #[validate(custom(function = non_blank))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(custom(function = non_blank))]
    pub email: String,
    #[validate(custom(function = non_blank))]
    pub password: String,
    #[validate(custom(function = non_blank))]
    pub first_name: String,
    #[validate(custom(function = non_blank))]
    pub last_name: String,
}

/// Resolve the current user from the request cookies, if any.
///
/// Used by the login and registration pages to bounce already
/// authenticated visitors back to the task list.
async fn authenticated(state: &AppState, headers: &HeaderMap) -> bool {
    match session::access_token(headers) {
        Some(token) => state.auth.current_user(&token).await.is_some(),
        None => false,
    }
}

/// GET /login
async fn login_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    if authenticated(&state, &headers).await {
        return Redirect::to("/").into_response();
    }
    let just_registered = query.registered.as_deref() == Some("true");
    Html(pages::login_page(None, just_registered)).into_response()
}

/// POST /login
///
/// Validates the form, exchanges credentials for tokens, and establishes
/// the session cookies. Validation and backend failures re-render the
/// page with an inline error; no backend call is made on a validation
/// failure.
async fn login_action(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if form.validate().is_err() {
        return Ok(Html(pages::login_page(
            Some("Email and password are required."),
            false,
        ))
        .into_response());
    }

    let credentials = Credentials {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    match state.auth.login(&credentials).await {
        Ok(tokens) => {
            let mut response = Redirect::to("/").into_response();
            for cookie in session::session_cookies(&tokens) {
                let value = HeaderValue::from_str(&cookie)
                    .map_err(|e| AppError::Internal(format!("Invalid cookie value: {e}")))?;
                response.headers_mut().append(SET_COOKIE, value);
            }
            Ok(response)
        }
        Err(err) => {
            let message = if err.is_auth_failure() {
                "Invalid email or password. Please try again."
            } else {
                tracing::warn!(error = %err, "Login request failed");
                "Login failed. Please check your connection and try again."
            };
            Ok(Html(pages::login_page(Some(message), false)).into_response())
        }
    }
}

/// GET /register
async fn register_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if authenticated(&state, &headers).await {
        return Redirect::to("/").into_response();
    }
    Html(pages::register_page(None)).into_response()
}

/// POST /register
///
/// Creates the account and sends the user to the login page; registration
/// surfaces no token.
async fn register_action(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.validate().is_err() {
        return Html(pages::register_page(Some("All fields are required"))).into_response();
    }

    let registration = Registration {
        email: form.email.trim().to_string(),
        password: form.password,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
    };

    match state.auth.register(&registration).await {
        Ok(()) => Redirect::to("/login?registered=true").into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Registration request failed");
            Html(pages::register_page(Some(
                "Registration failed. Please try again.",
            )))
            .into_response()
        }
    }
}

/// GET /logout -- a direct visit just goes to the login page.
async fn logout_page() -> Redirect {
    Redirect::to("/login")
}

/// POST /logout
///
/// Clears the session cookies (including the backend's own session
/// cookie) and redirects to the login page.
async fn logout_action() -> AppResult<Response> {
    let mut response = Redirect::to("/login").into_response();
    for cookie in session::clear_session_cookies() {
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie value: {e}")))?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}

/// Routes for the authentication pages.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_action))
        .route("/register", get(register_page).post(register_action))
        .route("/logout", get(logout_page).post(logout_action))
}
