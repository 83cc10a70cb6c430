//! Shared fixtures for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app::client::ArticleSource;
use crate::app::models::Article;
use crate::app::query::NewsRequest;
use crate::errors::{FetchError, FetchResult};

/// `count` articles whose titles and urls start with `prefix`
pub fn sample_articles(prefix: &str, count: usize) -> Vec<Article> {
    (0..count)
        .map(|i| Article {
            title: format!("{} #{}", prefix, i),
            description: Some(format!("About {}", prefix)),
            image_url: None,
            url: format!("https://example.com/{}/{}", prefix, i),
            source_name: "Example".to_string(),
            author: None,
            published_at: None,
        })
        .collect()
}

/// In-memory article source that counts how often it was called
pub struct StubSource {
    calls: AtomicUsize,
    respond: Box<dyn Fn(&NewsRequest) -> FetchResult<Vec<Article>> + Send + Sync>,
}

impl StubSource {
    /// Answers every request with `count` articles named after the query
    pub fn by_query(count: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            respond: Box::new(move |request| Ok(sample_articles(request.query(), count))),
        }
    }

    /// Fails every request with `error`
    pub fn failing(error: FetchError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            respond: Box::new(move |_| Err(error.clone())),
        }
    }

    /// Number of fetches performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ArticleSource for StubSource {
    async fn fetch(&self, request: &NewsRequest) -> FetchResult<Vec<Article>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(request)
    }
}
