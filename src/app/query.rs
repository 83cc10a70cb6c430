//! Request construction from the current filter state
//!
//! [`build_request`] is a pure mapping from (filter, credential) to the single
//! GET request the fetcher will perform. It rejects requests that cannot be
//! made before anything touches the network.

use std::fmt;

use chrono::NaiveDate;
use url::Url;

use crate::app::models::FilterState;
use crate::auth::{ApiToken, Credential};
use crate::constants::newsapi;
use crate::errors::{QueryError, QueryResult};

/// A fully specified search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    filter: FilterState,
    endpoint: Url,
    query: String,
    from: NaiveDate,
    token: ApiToken,
}

impl NewsRequest {
    /// The filter state the request was built from
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Effective search term (`q`)
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Earliest publication date (`from`)
    pub fn from_date(&self) -> NaiveDate {
        self.from
    }

    /// Key sent as `apiKey`
    pub fn token(&self) -> &ApiToken {
        &self.token
    }

    /// The endpoint the request targets
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Complete GET URL with percent-encoded query parameters
    pub fn url(&self) -> Url {
        self.url_with_key(self.token.as_str())
    }

    /// URL with the key masked, for logs
    pub fn redacted_url(&self) -> Url {
        self.url_with_key(&self.token.preview())
    }

    fn url_with_key(&self, key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair(
                "from",
                &self.from.format(newsapi::DATE_FORMAT).to_string(),
            )
            .append_pair("sortBy", newsapi::SORT_BY_PUBLISHED_AT)
            .append_pair("apiKey", key);
        url
    }
}

impl fmt::Display for NewsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q={:?} from={}", self.query, self.from)
    }
}

/// Build the request for a filter state
///
/// The effective term is the search text when set, otherwise the category.
/// Results are requested from `from_date` up to now, newest first.
///
/// # Errors
///
/// - `QueryError::MissingCredential` if no key is configured (checked first)
/// - `QueryError::EmptyQuery` if neither search text nor category is set
pub fn build_request(
    filter: &FilterState,
    credential: &Credential,
    endpoint: &Url,
) -> QueryResult<NewsRequest> {
    let token = credential.token().ok_or(QueryError::MissingCredential)?;
    let query = filter.search_by().term().ok_or(QueryError::EmptyQuery)?;

    Ok(NewsRequest {
        filter: filter.clone(),
        endpoint: endpoint.clone(),
        query: query.to_string(),
        from: filter.from_date(),
        token: token.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::SearchBy;
    use crate::constants::EVERYTHING_URL;

    fn endpoint() -> Url {
        Url::parse(EVERYTHING_URL).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn credential() -> Credential {
        Credential::Present(ApiToken::new("secret-key").unwrap())
    }

    #[test]
    fn test_text_search_request() {
        let filter = FilterState::new(SearchBy::Text("rust lang".to_string()), date("2024-03-06"));
        let request = build_request(&filter, &credential(), &endpoint()).unwrap();

        assert_eq!(request.query(), "rust lang");
        assert_eq!(request.from_date(), date("2024-03-06"));
        assert_eq!(
            request.url().as_str(),
            "https://newsapi.org/v2/everything?q=rust+lang&from=2024-03-06&sortBy=publishedAt&apiKey=secret-key"
        );
    }

    #[test]
    fn test_category_request() {
        let filter = FilterState::new(
            SearchBy::Category("Política".to_string()),
            date("2024-01-31"),
        );
        let request = build_request(&filter, &credential(), &endpoint()).unwrap();

        assert_eq!(request.query(), "Política");
        let pairs: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Política".to_string()),
                ("from".to_string(), "2024-01-31".to_string()),
                ("sortBy".to_string(), "publishedAt".to_string()),
                ("apiKey".to_string(), "secret-key".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let filter = FilterState::new(SearchBy::None, date("2024-03-06"));
        assert_eq!(
            build_request(&filter, &credential(), &endpoint()),
            Err(QueryError::EmptyQuery)
        );

        let filter = FilterState::new(SearchBy::Category(String::new()), date("2024-03-06"));
        assert_eq!(
            build_request(&filter, &credential(), &endpoint()),
            Err(QueryError::EmptyQuery)
        );
    }

    #[test]
    fn test_missing_credential_is_rejected() {
        let filter = FilterState::new(SearchBy::Text("rust".to_string()), date("2024-03-06"));
        assert_eq!(
            build_request(&filter, &Credential::Missing, &endpoint()),
            Err(QueryError::MissingCredential)
        );
    }

    #[test]
    fn test_missing_credential_checked_before_empty_query() {
        let filter = FilterState::new(SearchBy::None, date("2024-03-06"));
        assert_eq!(
            build_request(&filter, &Credential::Missing, &endpoint()),
            Err(QueryError::MissingCredential)
        );
    }

    #[test]
    fn test_redacted_url_hides_key() {
        let filter = FilterState::new(SearchBy::Text("rust".to_string()), date("2024-03-06"));
        let request = build_request(&filter, &credential(), &endpoint()).unwrap();

        let redacted = request.redacted_url().to_string();
        assert!(!redacted.contains("secret-key"));
        assert!(redacted.contains("apiKey=secr****"));
    }

    #[test]
    fn test_custom_endpoint() {
        let endpoint = Url::parse("http://127.0.0.1:8080/v2/everything").unwrap();
        let filter = FilterState::new(SearchBy::Text("rust".to_string()), date("2024-03-06"));
        let request = build_request(&filter, &credential(), &endpoint).unwrap();

        assert_eq!(request.url().host_str(), Some("127.0.0.1"));
        assert_eq!(request.url().path(), "/v2/everything");
    }
}
