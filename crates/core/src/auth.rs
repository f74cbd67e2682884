//! Authentication payload types.
//!
//! Credential handling itself is delegated to the backend; these are the
//! wire shapes exchanged with it.

use serde::{Deserialize, Serialize};

/// A user as returned by the backend's current-session endpoint.
///
/// Never mutated locally; the backend owns this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login credentials posted to `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// New-user fields posted to `/users`. Registration surfaces no token;
/// the user logs in separately afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Access/refresh token pair returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
