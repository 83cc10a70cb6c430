//! Prelude module for News Explorer Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use news_explorer::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use news_explorer::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // All common types are now available
//!     let client = NewsClient::new()?;
//!     let endpoint = client.endpoint().clone();
//!     let credential = resolve_credential(&CredentialStore::default_location()?, None)?;
//!     let mut session = NewsSession::new(client, Arc::new(ResultCache::default()), endpoint)
//!         .with_credential(credential);
//!
//!     session.select_category("Ciência");
//!     session.refresh().await;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, FetchError, PipelineError, QueryError, Result};

// Pipeline components
pub use crate::app::{
    // Data types
    Article,
    FilterState,
    SearchBy,

    // Request construction and fetching
    ArticleSource,
    ClientConfig,
    NewsClient,
    NewsRequest,
    build_request,

    // Caching
    CacheConfig,
    CacheKey,
    CacheStats,
    ResultCache,

    // Paging and session state
    NewsSession,
    PageView,
    ViewState,
    paginate,
};

// Credentials
pub use crate::auth::{ApiToken, Credential, CredentialStore, resolve_credential};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{CATEGORIES, DEFAULT_CATEGORY, DEFAULT_PAGE_SIZE};
