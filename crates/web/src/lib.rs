//! Todozen web application library.
//!
//! Exposes the building blocks (config, state, session handling, routes)
//! so integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;
