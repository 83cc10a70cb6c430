//! Data models for search filters and news articles
//!
//! [`FilterState`] captures everything that determines which articles are
//! requested. [`Article`] is the immutable record received from the API.

use std::fmt;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::search;

/// The active search term
///
/// Free-text search and category selection are mutually exclusive: choosing one
/// replaces the other, so both can never be set at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SearchBy {
    /// User-entered search text
    Text(String),
    /// One of the preset categories
    Category(String),
    /// Nothing selected; no request can be made
    #[default]
    None,
}

impl SearchBy {
    /// The term sent to the API, if any
    pub fn term(&self) -> Option<&str> {
        match self {
            SearchBy::Text(text) | SearchBy::Category(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SearchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchBy::Text(text) => write!(f, "search \"{}\"", text),
            SearchBy::Category(category) => write!(f, "category {}", category),
            SearchBy::None => write!(f, "nothing selected"),
        }
    }
}

/// The user's current filter selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    search_by: SearchBy,
    from_date: NaiveDate,
}

impl FilterState {
    /// Create a filter state from its parts
    pub fn new(search_by: SearchBy, from_date: NaiveDate) -> Self {
        Self {
            search_by,
            from_date,
        }
    }

    /// Filter with a category selected and a start date `lookback_days` before today
    pub fn with_defaults(category: &str, lookback_days: u32) -> Self {
        let today = Local::now().date_naive();
        Self::new(
            SearchBy::Category(category.to_string()),
            default_from_date(today, lookback_days),
        )
    }

    /// Search by free text, clearing any selected category
    ///
    /// The text is trimmed; blank input leaves the filter untouched. Returns
    /// whether the filter changed.
    pub fn search(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.replace(SearchBy::Text(text.to_string()))
    }

    /// Select a category, clearing any search text
    ///
    /// An empty category clears the search term entirely. Returns whether the
    /// filter changed.
    pub fn select_category(&mut self, category: &str) -> bool {
        let category = category.trim();
        if category.is_empty() {
            return self.replace(SearchBy::None);
        }
        self.replace(SearchBy::Category(category.to_string()))
    }

    /// Set the earliest publication date. Returns whether the filter changed.
    pub fn set_date(&mut self, from_date: NaiveDate) -> bool {
        if self.from_date == from_date {
            return false;
        }
        self.from_date = from_date;
        true
    }

    fn replace(&mut self, search_by: SearchBy) -> bool {
        if self.search_by == search_by {
            return false;
        }
        self.search_by = search_by;
        true
    }

    /// The active search term
    pub fn search_by(&self) -> &SearchBy {
        &self.search_by
    }

    /// Current search text, empty when a category (or nothing) is selected
    pub fn search_text(&self) -> &str {
        match &self.search_by {
            SearchBy::Text(text) => text,
            _ => "",
        }
    }

    /// Current category, empty when searching by text (or nothing)
    pub fn category(&self) -> &str {
        match &self.search_by {
            SearchBy::Category(category) => category,
            _ => "",
        }
    }

    /// Earliest publication date to request
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_defaults(search::DEFAULT_CATEGORY, search::DEFAULT_LOOKBACK_DAYS)
    }
}

/// Start date `lookback_days` before `today`
pub fn default_from_date(today: NaiveDate, lookback_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// A news article as returned by the search API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    pub title: String,
    /// Short summary, when the source provides one
    pub description: Option<String>,
    /// Lead image
    pub image_url: Option<String>,
    /// Link to the full article; unique within a result set
    pub url: String,
    /// Publishing outlet
    pub source_name: String,
    /// Byline
    pub author: Option<String>,
    /// Publication time, `None` when missing or unparseable
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Publication date formatted for display
    pub fn published_date(&self) -> String {
        self.published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
