//! News Explorer Library
//!
//! A Rust library for searching recent news articles through the NewsAPI
//! "everything" endpoint. Provides filter state, request construction, an
//! in-memory response cache with a freshness window and client-side paging.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
