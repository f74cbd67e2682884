//! Domain types shared across the todozen crates.
//!
//! This crate has no internal dependencies so it can be used by both the
//! Directus client and the web layer.

pub mod auth;
pub mod error;
pub mod todo;
pub mod types;
