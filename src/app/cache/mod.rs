//! In-memory response cache with a freshness window
//!
//! Every fetch outcome is stored under a [`CacheKey`] built from the complete
//! filter state and the API key a request was built from. Within the configured ttl (four hours
//! by default) the stored outcome is returned without touching the network.
//!
//! # Module Organization
//!
//! - [`config`] - Configuration types and defaults
//! - [`stats`] - Hit/miss counters and entry counts
//! - [`manager`] - The cache itself
//!
//! # Examples
//!
//! ```rust,no_run
//! use news_explorer::app::cache::{CacheConfig, ResultCache};
//! use news_explorer::app::client::NewsClient;
//! use news_explorer::app::models::FilterState;
//! use news_explorer::app::query::build_request;
//! use news_explorer::auth::{ApiToken, Credential};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NewsClient::new()?;
//! let cache = ResultCache::new(CacheConfig::default());
//!
//! let token = ApiToken::new("my-key")?;
//! let filter = FilterState::default();
//! let request = build_request(&filter, &Credential::Present(token), client.endpoint())?;
//!
//! // The second call is answered from memory
//! let first = cache.get_or_fetch(&request, &client).await?;
//! let second = cache.get_or_fetch(&request, &client).await?;
//! assert_eq!(first.len(), second.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod stats;

// Re-export main public API
pub use config::CacheConfig;
pub use manager::{CacheKey, CachedOutcome, ResultCache};
pub use stats::CacheStats;
