pub mod auth;
pub mod health;
pub mod todos;

use axum::Router;

use crate::state::AppState;

/// Build the full page route tree.
///
/// ```text
/// GET  /health            health check (JSON)
///
/// GET  /login             login page
/// POST /login             login action (sets session cookies)
/// GET  /register          registration page
/// POST /register          registration action
/// GET  /logout            redirect to /login
/// POST /logout            logout action (clears session cookies)
///
/// GET  /                  task list (?search=, ?filter=)
/// POST /                  list actions (intent: completed | delete)
/// GET  /todos/new         creation form
/// POST /todos/new         create action
/// GET  /todos/{id}/edit   edit form
/// POST /todos/{id}/edit   edit action
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(todos::router())
}
