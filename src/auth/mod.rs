//! Credential management for the NewsAPI key
//!
//! This module stores the single API key the application needs, reads it back
//! at startup and distinguishes "no key" from an invalid (empty) key.
//!
//! # Examples
//!
//! ```rust,no_run
//! use news_explorer::auth::{ApiToken, CredentialStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CredentialStore::default_location()?;
//! if !store.load()?.is_present() {
//!     store.save(&ApiToken::new("my-newsapi-key")?)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;

// Re-export main public API
pub use credentials::{
    prompt_token, resolve_credential, ApiToken, AuthStatus, Credential, CredentialStore,
};
