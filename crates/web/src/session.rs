//! Cookie-based session access.
//!
//! The session is nothing more than the presence of an `access_token`
//! cookie; the token itself is opaque and validated only by the backend.

use std::sync::OnceLock;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::Redirect;
use regex::Regex;

use todozen_core::auth::TokenPair;

use crate::state::AppState;

/// Cookies cleared on logout. `directus_session_token` is set by the
/// backend's own session mode.
const LOGOUT_COOKIES: [&str; 3] = ["access_token", "refresh_token", "directus_session_token"];

fn access_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"access_token=([^;]+)").expect("valid cookie regex"))
}

/// Extract the access token from the raw `Cookie` header.
///
/// Absence of the header or of a non-empty `access_token` value yields
/// `None`, which every caller treats as "no session".
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie")?.to_str().ok()?;
    access_token_regex()
        .captures(cookie_header)
        .map(|caps| caps[1].to_string())
}

/// `Set-Cookie` values establishing a session after login.
pub fn session_cookies(tokens: &TokenPair) -> [String; 2] {
    [
        format!(
            "access_token={}; HttpOnly; Path=/; SameSite=Strict",
            tokens.access_token
        ),
        format!(
            "refresh_token={}; HttpOnly; Path=/; SameSite=Strict",
            tokens.refresh_token
        ),
    ]
}

/// `Set-Cookie` values clearing the session on logout.
pub fn clear_session_cookies() -> [String; 3] {
    LOGOUT_COOKIES
        .map(|name| format!("{name}=; HttpOnly; Path=/; Max-Age=0; SameSite=Strict"))
}

/// Bearer token extracted from the request cookies.
///
/// Use this as an extractor parameter in any handler that requires a
/// session. Requests without a token are redirected to the login page:
///
/// ```ignore
/// async fn list(session: SessionToken) -> AppResult<Html<String>> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        access_token(&parts.headers)
            .map(SessionToken)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
