//! Login, registration, and current-user lookup.

use serde_json::json;

use todozen_core::auth::{Credentials, Registration, TokenPair, User};

use crate::api::{decode, DirectusApi};
use crate::error::DirectusError;

const LOGIN: &str = "/auth/login";
const ME: &str = "/users/me";
const USERS: &str = "/users";

/// Authentication operations against the backend.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: DirectusApi,
}

impl AuthService {
    pub fn new(api: DirectusApi) -> Self {
        Self { api }
    }

    /// Exchange credentials for an access/refresh token pair.
    ///
    /// Failures propagate; the login page distinguishes a 401 from other
    /// failures via [`DirectusError::is_auth_failure`].
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, DirectusError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let data = self.api.post(LOGIN, None, &body).await?;
        decode(data)
    }

    /// Look up the user behind a bearer token.
    ///
    /// Returns `None` on any failure (expired/invalid token, network
    /// error). This `None` is the sole "no session" signal the page
    /// loaders consume.
    pub async fn current_user(&self, token: &str) -> Option<User> {
        let result = self.api.get(ME, Some(token), &[]).await;
        match result.and_then(decode::<Option<User>>) {
            Ok(user) => user,
            Err(err) => {
                tracing::debug!(error = %err, "Current-user lookup failed, treating as no session");
                None
            }
        }
    }

    /// Create a new user account.
    ///
    /// Surfaces no token: the user logs in separately afterwards.
    /// Failures propagate.
    pub async fn register(&self, registration: &Registration) -> Result<(), DirectusError> {
        let body = json!({
            "email": registration.email,
            "password": registration.password,
            "first_name": registration.first_name,
            "last_name": registration.last_name,
        });
        self.api.post(USERS, None, &body).await?;
        Ok(())
    }
}
