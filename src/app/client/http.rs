//! Single-shot HTTP GET and response classification
//!
//! Every response is sorted into exactly one outcome: a list of articles,
//! the 426 environment restriction, a remote error, or a transport failure.
//! Nothing is retried.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::app::models::Article;
use crate::constants::http;
use crate::errors::{FetchError, FetchResult};

/// Successful search response body
#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

/// Article as sent on the wire; every field may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WireArticle {
    source: Option<WireSource>,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireSource {
    name: Option<String>,
}

/// Error response body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireError {
    code: Option<String>,
    message: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        Article {
            title: wire.title.unwrap_or_default(),
            description: wire.description,
            image_url: wire.url_to_image.filter(|u| !u.is_empty()),
            url: wire.url.unwrap_or_default(),
            source_name: wire.source.and_then(|s| s.name).unwrap_or_default(),
            author: wire.author,
            published_at: wire.published_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// HTTP operations handler
#[derive(Debug, Clone)]
pub struct HttpHandler {
    client: Client,
}

impl HttpHandler {
    /// Creates a new HttpHandler around a configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Perform one GET and classify the outcome
    ///
    /// # Errors
    ///
    /// - `FetchError::Transport` if the request or body read fails
    /// - `FetchError::Unavailable` on HTTP 426
    /// - `FetchError::Remote` on any other non-success status
    pub async fn get_articles(&self, url: &Url) -> FetchResult<Vec<Article>> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        classify_response(status, &body)
    }
}

/// Turn a status code and body into articles or a typed failure
pub fn classify_response(status: StatusCode, body: &str) -> FetchResult<Vec<Article>> {
    if status.as_u16() == http::UPGRADE_REQUIRED {
        tracing::warn!("News API refused the call from this environment (HTTP 426)");
        return Err(FetchError::Unavailable);
    }

    if !status.is_success() {
        let error: WireError = serde_json::from_str(body).unwrap_or_default();
        let message = error
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| http::GENERIC_FAILURE_MESSAGE.to_string());
        tracing::warn!(
            status = status.as_u16(),
            code = error.code.as_deref().unwrap_or("-"),
            "News API returned an error: {}",
            message
        );
        return Err(FetchError::Remote {
            status: status.as_u16(),
            message,
            code: error.code,
        });
    }

    let parsed: WireResponse = serde_json::from_str(body).map_err(|e| FetchError::Remote {
        status: status.as_u16(),
        message: format!("Invalid response body: {}", e),
        code: None,
    })?;

    let articles: Vec<Article> = parsed.articles.into_iter().map(Article::from).collect();
    tracing::debug!("Decoded {} articles", articles.len());
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": "wired", "name": "Wired"},
                "author": "Jane Doe",
                "title": "Rust in the kernel",
                "description": "A look at Rust drivers",
                "url": "https://example.com/rust-kernel",
                "urlToImage": "https://example.com/rust.png",
                "publishedAt": "2024-03-10T08:30:00Z",
                "content": "..."
            },
            {
                "source": {"id": null, "name": "Blog"},
                "author": null,
                "title": "Older post",
                "description": null,
                "url": "https://example.com/older",
                "urlToImage": null,
                "publishedAt": "2024-03-09T18:00:00+02:00"
            }
        ]
    }"#;

    #[test]
    fn test_success_parses_articles_in_order() {
        let articles = classify_response(StatusCode::OK, OK_BODY).unwrap();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Rust in the kernel");
        assert_eq!(first.source_name, "Wired");
        assert_eq!(first.author.as_deref(), Some("Jane Doe"));
        assert_eq!(first.image_url.as_deref(), Some("https://example.com/rust.png"));
        assert_eq!(first.published_date(), "2024-03-10");

        let second = &articles[1];
        assert_eq!(second.url, "https://example.com/older");
        assert_eq!(second.description, None);
        assert_eq!(second.image_url, None);
        assert_eq!(
            second.published_at,
            Some("2024-03-09T16:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_missing_fields_are_tolerated() {
        let body = r#"{"articles": [{"url": "https://example.com/x", "publishedAt": "yesterday"}, {}]}"#;
        let articles = classify_response(StatusCode::OK, body).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[0].source_name, "");
        assert_eq!(articles[0].published_at, None);
        assert_eq!(articles[1].url, "");
    }

    #[test]
    fn test_empty_result() {
        let body = r#"{"status": "ok", "totalResults": 0, "articles": []}"#;
        assert!(classify_response(StatusCode::OK, body).unwrap().is_empty());

        // A success body with no articles field is an empty result, not an error
        assert!(classify_response(StatusCode::OK, "{}").unwrap().is_empty());
    }

    #[test]
    fn test_upgrade_required_is_unavailable() {
        let body = r#"{"status": "error", "code": "corsNotAllowed", "message": "Requests from the browser are not allowed"}"#;
        assert_eq!(
            classify_response(StatusCode::UPGRADE_REQUIRED, body),
            Err(FetchError::Unavailable)
        );
    }

    #[test]
    fn test_server_error_is_remote() {
        let body = r#"{"status": "error", "code": "unexpectedError", "message": "Something broke"}"#;
        assert_eq!(
            classify_response(StatusCode::INTERNAL_SERVER_ERROR, body),
            Err(FetchError::Remote {
                status: 500,
                message: "Something broke".to_string(),
                code: Some("unexpectedError".to_string()),
            })
        );
    }

    #[test]
    fn test_error_without_message_uses_generic_text() {
        assert_eq!(
            classify_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            Err(FetchError::Remote {
                status: 502,
                message: http::GENERIC_FAILURE_MESSAGE.to_string(),
                code: None,
            })
        );
    }

    #[test]
    fn test_invalid_success_body_is_remote_error() {
        let result = classify_response(StatusCode::OK, "not json");
        assert!(matches!(result, Err(FetchError::Remote { status: 200, .. })));
    }
}
