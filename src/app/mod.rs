//! Core application logic for News Explorer
//!
//! This module contains the search pipeline: filter state and article models,
//! request construction, the HTTP client, the response cache, pagination and
//! the session that ties them together.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use news_explorer::app::{NewsClient, NewsSession, ResultCache, ViewState};
//! use news_explorer::auth::{ApiToken, Credential};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NewsClient::new()?;
//! let endpoint = client.endpoint().clone();
//! let mut session = NewsSession::new(client, Arc::new(ResultCache::default()), endpoint)
//!     .with_credential(Credential::Present(ApiToken::new("my-key")?));
//!
//! session.search("rust");
//! session.refresh().await;
//! match (session.state(), session.page()) {
//!     (ViewState::Loaded(_), Some(page)) => {
//!         for article in page.items {
//!             println!("{} ({})", article.title, article.source_name);
//!         }
//!     }
//!     (state, _) => println!("{:?}", state),
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod models;
pub mod paginate;
pub mod query;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main public API
pub use cache::{CacheConfig, CacheKey, CacheStats, ResultCache};
pub use client::{ArticleSource, ClientConfig, NewsClient};
pub use models::{Article, FilterState, SearchBy};
pub use paginate::{clamp_page, paginate, PageView};
pub use query::{build_request, NewsRequest};
pub use session::{NewsSession, PendingFetch, ViewState};
