//! REST client for the Directus backend.
//!
//! The backend is the sole source of truth for users and tasks; this
//! crate is a thin request/response layer over it. [`api::DirectusApi`]
//! handles request building, bearer auth, and the `{data, meta}` response
//! envelope; [`todos::TodosService`] and [`auth::AuthService`] expose the
//! resource operations the web layer calls.

pub mod api;
pub mod auth;
pub mod error;
pub mod todos;

pub use api::DirectusApi;
pub use auth::AuthService;
pub use error::DirectusError;
pub use todos::{TodoQuery, TodosService};
