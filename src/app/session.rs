//! Session state driving one search view
//!
//! A [`NewsSession`] owns the filter, the credential and the current page, and
//! turns user events into fetches through the shared [`ResultCache`]. Results
//! are only accepted for the filter state that is current when they arrive, so
//! a slow response for an abandoned search never replaces a newer one.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::app::cache::{CacheKey, CachedOutcome, ResultCache};
use crate::app::client::ArticleSource;
use crate::app::models::{Article, FilterState};
use crate::app::paginate::{clamp_page, paginate, PageView};
use crate::app::query::{build_request, NewsRequest};
use crate::auth::{ApiToken, Credential, CredentialStore};
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::errors::{AuthResult, PipelineError};

/// What the view should currently show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing requested yet for the current filter
    #[default]
    Idle,
    /// A request for the current filter is in flight
    Fetching,
    /// Articles for the current filter, newest first
    Loaded(Arc<[Article]>),
    /// The last attempt for the current filter failed
    Failed(PipelineError),
}

/// A fetch started by [`NewsSession::begin`] that has not been applied yet
#[derive(Debug, Clone)]
pub struct PendingFetch {
    key: CacheKey,
    request: NewsRequest,
}

impl PendingFetch {
    /// Cache key of the filter state the fetch was started for
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// The request to execute
    pub fn request(&self) -> &NewsRequest {
        &self.request
    }
}

/// Interactive search session
pub struct NewsSession<S> {
    filter: FilterState,
    credential: Credential,
    store: Option<CredentialStore>,
    page: usize,
    page_size: usize,
    state: ViewState,
    cache: Arc<ResultCache>,
    source: S,
    endpoint: Url,
}

impl<S: ArticleSource> NewsSession<S> {
    /// Session with the default filter and no credential
    pub fn new(source: S, cache: Arc<ResultCache>, endpoint: Url) -> Self {
        Self {
            filter: FilterState::default(),
            credential: Credential::Missing,
            store: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            state: ViewState::Idle,
            cache,
            source,
            endpoint,
        }
    }

    /// Start from a specific filter
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Use a credential for requests
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Persist keys entered during the session to `store`
    pub fn with_store(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the number of articles per page
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Search by free text. Blank input is ignored.
    pub fn search(&mut self, text: &str) -> bool {
        let changed = self.filter.search(text);
        self.filter_changed(changed);
        changed
    }

    /// Select a preset category, clearing the search text
    pub fn select_category(&mut self, category: &str) -> bool {
        let changed = self.filter.select_category(category);
        self.filter_changed(changed);
        changed
    }

    /// Change the earliest publication date
    pub fn set_date(&mut self, from_date: chrono::NaiveDate) -> bool {
        let changed = self.filter.set_date(from_date);
        self.filter_changed(changed);
        changed
    }

    /// Set the 1-based page without checking it against the loaded result
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Jump to a page, kept within the loaded result
    pub fn jump_to_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.total_pages());
    }

    /// Move `delta` pages forward (or back), kept within the loaded result
    pub fn step_page(&mut self, delta: isize) {
        self.jump_to_page(self.page.saturating_add_signed(delta));
    }

    fn total_pages(&self) -> usize {
        self.page().map_or(0, |page| page.total_pages)
    }

    /// Use `credential` for subsequent requests without persisting it
    pub fn set_credential(&mut self, credential: Credential) {
        let changed = self.credential != credential;
        self.credential = credential;
        self.filter_changed(changed);
    }

    /// Store a key and start using it
    ///
    /// # Errors
    ///
    /// Returns an error if the credential file cannot be written; the
    /// in-memory credential is left unchanged in that case.
    pub fn save_credential(&mut self, token: ApiToken) -> AuthResult<()> {
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        self.set_credential(Credential::Present(token));
        Ok(())
    }

    fn filter_changed(&mut self, changed: bool) {
        if changed {
            debug!("Filter is now {} from {}", self.filter.search_by(), self.filter.from_date());
            self.page = 1;
            self.state = ViewState::Idle;
        }
    }

    /// Key identifying the current filter and credential, if a key is set
    pub fn current_key(&self) -> Option<CacheKey> {
        self.credential
            .token()
            .map(|token| CacheKey::new(self.filter.clone(), token.clone()))
    }

    /// Validate the current filter and mark the session as fetching
    ///
    /// # Errors
    ///
    /// Returns the local error (also stored as [`ViewState::Failed`]) when no
    /// request can be built. Nothing is fetched in that case.
    pub fn begin(&mut self) -> Result<PendingFetch, PipelineError> {
        let request = match build_request(&self.filter, &self.credential, &self.endpoint) {
            Ok(request) => request,
            Err(e) => {
                let error = PipelineError::from(e);
                self.state = ViewState::Failed(error.clone());
                return Err(error);
            }
        };

        let key = CacheKey::for_request(&request);
        self.state = ViewState::Fetching;
        Ok(PendingFetch { key, request })
    }

    /// Apply the outcome of a fetch if it is still wanted
    ///
    /// Returns false when the filter or credential changed after the fetch was
    /// started; the outcome is dropped.
    pub fn finish(&mut self, pending: PendingFetch, outcome: CachedOutcome) -> bool {
        if self.current_key().as_ref() != Some(&pending.key) {
            debug!("Dropping stale result for {}", pending.request);
            return false;
        }

        self.state = match outcome {
            Ok(articles) => ViewState::Loaded(articles),
            Err(e) => ViewState::Failed(e.into()),
        };
        true
    }

    /// Fetch (or recall) results for the current filter
    pub async fn refresh(&mut self) -> &ViewState {
        let pending = match self.begin() {
            Ok(pending) => pending,
            Err(_) => return &self.state,
        };

        let outcome = self.cache.get_or_fetch(&pending.request, &self.source).await;
        self.finish(pending, outcome);
        &self.state
    }

    /// Current page of the loaded result, `None` unless results are loaded
    pub fn page(&self) -> Option<PageView<'_, Article>> {
        match &self.state {
            ViewState::Loaded(articles) => Some(paginate(articles, self.page_size, self.page)),
            _ => None,
        }
    }

    /// The active filter
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The credential used for requests
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// 1-based page number
    pub fn page_number(&self) -> usize {
        self.page
    }

    /// Articles per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// What the view should show
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The shared result cache
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}
