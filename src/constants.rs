//! Application constants for News Explorer
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable holding a NewsAPI key (overrides the stored one)
    pub const API_KEY: &str = "NEWS_API_KEY";
}

/// Credential storage constants
pub mod auth {
    /// Key under which the token is persisted in the credential file
    pub const CREDENTIAL_KEY: &str = "NEWS_API_KEY";

    /// Credential file name inside the application config directory
    pub const CREDENTIAL_FILE_NAME: &str = "credentials.env";

    /// File permissions for the credential file (Unix only) - owner read/write only
    #[cfg(unix)]
    pub const CREDENTIAL_FILE_PERMISSIONS: u32 = 0o600;

    /// Number of leading characters shown when a token is displayed
    pub const TOKEN_PREVIEW_CHARS: usize = 4;
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// User agent sent with every request; the API rejects requests without one
    pub const USER_AGENT: &str = concat!("news-explorer/", env!("CARGO_PKG_VERSION"));

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Status code the API uses when a plan forbids the calling environment
    pub const UPGRADE_REQUIRED: u16 = 426;

    /// Message used when an error response carries no message of its own
    pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch news";
}

/// NewsAPI service details
pub mod newsapi {
    /// The "search everything" endpoint
    pub const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";

    /// Sort order requested for every search
    pub const SORT_BY_PUBLISHED_AT: &str = "publishedAt";

    /// Calendar date format for the `from` parameter
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Search defaults and presets
pub mod search {
    /// Preset categories offered alongside free-text search
    pub const CATEGORIES: [&str; 8] = [
        "Tecnologia",
        "Brasil",
        "Culinária",
        "Política",
        "Cinema",
        "Esportes",
        "Ciência",
        "Economia",
    ];

    /// Category selected when no search has been made yet
    pub const DEFAULT_CATEGORY: &str = "Tecnologia";

    /// How many days back the default start date lies
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 4;
}

/// Response cache constants
pub mod cache {
    use super::Duration;

    /// How long a fetched result set (or failure) stays fresh
    pub const DEFAULT_TTL: Duration = Duration::from_secs(4 * 60 * 60);
}

/// Paging constants
pub mod paging {
    /// Number of article cards per page
    pub const DEFAULT_PAGE_SIZE: usize = 30;
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use env::API_KEY as ENV_API_KEY;
pub use http::USER_AGENT;
pub use newsapi::EVERYTHING_URL;
pub use paging::DEFAULT_PAGE_SIZE;
pub use search::{CATEGORIES, DEFAULT_CATEGORY};
