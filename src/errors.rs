//! Error types for News Explorer
//!
//! This module defines the error types for every component of the application.
//! Errors are designed to be actionable and provide clear context for debugging and
//! user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Credential storage errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// An explicitly empty token was supplied or stored
    #[error("The NewsAPI key is empty. Run 'auth setup' to store a valid key")]
    EmptyToken,

    /// File I/O error during credential storage
    #[error("Failed to access credential file")]
    CredentialStorage(#[from] std::io::Error),

    /// Permission error on credential file
    #[error("Permission denied accessing credential file: {path}")]
    PermissionDenied { path: PathBuf },

    /// The credential file exists but is not a valid key-value file
    #[error("Invalid credential file {path}: {reason}")]
    InvalidCredentialFile { path: PathBuf, reason: String },

    /// No location could be determined for the credential file
    #[error("Could not determine a location for the credential file")]
    NoStorageLocation,
}

/// Local validation errors raised before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No API key is configured
    #[error("No NewsAPI key configured. Run 'auth setup' or pass --api-key")]
    MissingCredential,

    /// Neither search text nor a category is selected
    #[error("Nothing to search for. Enter search text or pick a category")]
    EmptyQuery,
}

/// Outcome classification for a failed fetch
///
/// Values are cloneable so a failed fetch can be cached like a successful one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 426: the API plan forbids calls from this environment
    #[error("This API only works on localhost in development mode. Please run the app locally")]
    Unavailable,

    /// Any other non-success response (or an undecodable success body)
    #[error("News service error (HTTP {status}): {message}")]
    Remote {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// The request could not be completed at all
    #[error("Could not reach the news service: {message}")]
    Transport { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        FetchError::Transport {
            message: error.to_string(),
        }
    }
}

/// Any failure that ends a pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Rejected locally before a request was built
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The request was made and failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl PipelineError {
    /// Whether this is the environment restriction that deserves its own notice
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PipelineError::Fetch(FetchError::Unavailable))
    }

    /// Whether the error was raised before any network call
    pub fn is_local(&self) -> bool {
        matches!(self, PipelineError::Query(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential storage error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Local query validation error
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A failed search, carrying only the notice already fit for display
    #[error("{message}")]
    SearchFailed { message: String },

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl From<PipelineError> for AppError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Query(e) => AppError::Query(e),
            PipelineError::Fetch(e) => AppError::Fetch(e),
        }
    }
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is recoverable (a later attempt may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Fetch(FetchError::Transport { .. }) => true,
            AppError::Fetch(FetchError::Remote { status, .. }) => *status == 429 || *status >= 500,

            AppError::Fetch(FetchError::Unavailable)
            | AppError::Query(_)
            | AppError::Auth(_)
            | AppError::Config(_) => false,

            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "authentication",
            AppError::Query(_) => "query",
            AppError::Fetch(_) => "fetch",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::SearchFailed { .. } => "search",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Authentication result type alias
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Query builder result type alias
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
