//! HTTP client for the news search API
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: the single GET and its response classification
//!
//! [`ArticleSource`] is the seam the cache and session depend on; [`NewsClient`]
//! is the production implementation.

use url::Url;

use crate::app::models::Article;
use crate::app::query::NewsRequest;
use crate::errors::{FetchResult, Result};

// Module declarations
pub mod config;
pub mod http;

// Re-export public types
pub use config::ClientConfig;
pub use http::classify_response;

use http::HttpHandler;

/// Anything that can execute a search request
///
/// Implementations perform at most one network call per invocation.
#[allow(async_fn_in_trait)]
pub trait ArticleSource {
    /// Execute the request and return the articles in server order
    async fn fetch(&self, request: &NewsRequest) -> FetchResult<Vec<Article>>;
}

/// HTTP client for the news search API
#[derive(Debug, Clone)]
pub struct NewsClient {
    http_handler: HttpHandler,
    endpoint: Url,
}

impl NewsClient {
    /// Creates a client for the public NewsAPI endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// cannot be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let endpoint = config.endpoint_url()?;
        let client = config.build_http_client()?;

        tracing::debug!("Created news client for {}", endpoint);

        Ok(Self {
            http_handler: HttpHandler::new(client),
            endpoint,
        })
    }

    /// The search endpoint requests should target
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ArticleSource for NewsClient {
    async fn fetch(&self, request: &NewsRequest) -> FetchResult<Vec<Article>> {
        tracing::info!("Fetching news for {}", request);
        tracing::debug!("GET {}", request.redacted_url());

        let result = self.http_handler.get_articles(&request.url()).await;
        match &result {
            Ok(articles) => tracing::info!("Received {} articles for {}", articles.len(), request),
            Err(e) => tracing::warn!("Fetch failed for {}: {}", request, e),
        }
        result
    }
}
