//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used to talk to the news search API.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{http, newsapi};
use crate::errors::{ConfigError, ConfigResult, FetchResult};

/// Configuration for the news API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Search endpoint URL
    pub endpoint: String,
    /// User agent header value
    pub user_agent: String,
    /// Overall request timeout (None = transport default, no limit)
    pub request_timeout: Option<Duration>,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: newsapi::EVERYTHING_URL.to_string(),
            user_agent: http::USER_AGENT.to_string(),
            request_timeout: None,
            connect_timeout: http::CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at a different endpoint (mock servers, proxies)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Parse the configured endpoint
    pub fn endpoint_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "client.endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }

    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> FetchResult<Client> {
        let mut client_builder = Client::builder()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(self.connect_timeout);

        if let Some(timeout) = self.request_timeout {
            client_builder = client_builder.timeout(timeout);
        }

        Ok(client_builder.build()?)
    }
}
