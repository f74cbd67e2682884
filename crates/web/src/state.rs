use std::sync::Arc;
use std::time::Duration;

use todozen_directus::{AuthService, DirectusApi, TodosService};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Raw backend client (used by the health check).
    pub api: DirectusApi,
    /// Authentication operations (login, register, current user).
    pub auth: AuthService,
    /// Task CRUD operations.
    pub todos: TodosService,
}

impl AppState {
    /// Build the state from configuration. One reqwest client is shared
    /// across all services for connection pooling.
    pub fn new(config: ServerConfig) -> Self {
        let api = DirectusApi::new(
            config.directus_url.clone(),
            Duration::from_secs(config.backend_timeout_secs),
        );
        Self {
            config: Arc::new(config),
            auth: AuthService::new(api.clone()),
            todos: TodosService::new(api.clone()),
            api,
        }
    }
}
