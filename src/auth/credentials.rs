//! Credential management for the NewsAPI key
//!
//! This module handles storage, retrieval, and validation of the API key.
//! The key is stored as a single `NEWS_API_KEY=...` line in a key-value file
//! with owner-only permissions, so it survives restarts.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::constants::auth;
use crate::errors::{AuthError, AuthResult};

/// A non-empty NewsAPI key
///
/// The key is redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiToken(String);

impl ApiToken {
    /// Validate and wrap a key. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyToken` for an empty or blank key
    pub fn new(token: impl Into<String>) -> AuthResult<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw key, for building requests
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First few characters followed by a mask, for display
    pub fn preview(&self) -> String {
        let shown: String = self.0.chars().take(auth::TOKEN_PREVIEW_CHARS).collect();
        format!("{}****", shown)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&self.preview()).finish()
    }
}

/// Whether a key is available
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// No key has been configured; requests are blocked
    #[default]
    Missing,
    /// A usable key
    Present(ApiToken),
}

impl Credential {
    /// The key, if present
    pub fn token(&self) -> Option<&ApiToken> {
        match self {
            Credential::Present(token) => Some(token),
            Credential::Missing => None,
        }
    }

    /// Whether a key is available
    pub fn is_present(&self) -> bool {
        matches!(self, Credential::Present(_))
    }
}

impl From<ApiToken> for Credential {
    fn from(token: ApiToken) -> Self {
        Credential::Present(token)
    }
}

/// Persistent storage for the API key
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the user's config directory
    ///
    /// - Linux: ~/.config/news-explorer/credentials.env
    /// - macOS: ~/Library/Application Support/news-explorer/credentials.env
    /// - Windows: %APPDATA%/news-explorer/credentials.env
    pub fn default_location() -> AuthResult<Self> {
        let dir = crate::config::app_config_dir().ok_or(AuthError::NoStorageLocation)?;
        Ok(Self::new(dir.join(auth::CREDENTIAL_FILE_NAME)))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored key
    ///
    /// The file is parsed as a dotenv file, so quoting, `export` prefixes and
    /// trailing comments behave as they do for `.env`. A missing file or a
    /// file without the key means `Credential::Missing`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyToken` when the key exists but is empty,
    /// `AuthError::InvalidCredentialFile` for a malformed file, or an I/O
    /// error if the file cannot be read.
    pub fn load(&self) -> AuthResult<Credential> {
        match self.stored_value()? {
            Some(value) => {
                let token = ApiToken::new(value)?;
                debug!("Loaded API key from {}", self.path.display());
                Ok(Credential::Present(token))
            }
            None => Ok(Credential::Missing),
        }
    }

    /// Persist a key, replacing any previous one and keeping unrelated lines
    pub fn save(&self, token: &ApiToken) -> AuthResult<()> {
        let mut lines = self.read_other_lines()?;
        lines.push(format!("{}={}", auth::CREDENTIAL_KEY, token.as_str()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        self.write_lines(&lines)?;
        info!("Saved API key {} to {}", token.preview(), self.path.display());
        Ok(())
    }

    /// Remove the stored key. Returns whether a key was removed.
    pub fn clear(&self) -> AuthResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let had_key = self.stored_value()?.is_some();
        let lines = self.read_other_lines()?;

        if lines.iter().all(|line| line.trim().is_empty()) {
            fs::remove_file(&self.path).map_err(|e| self.io_error(e))?;
        } else {
            self.write_lines(&lines)?;
        }

        if had_key {
            info!("Removed API key from {}", self.path.display());
        }
        Ok(had_key)
    }

    /// Raw value of the key entry, if the file has one
    fn stored_value(&self) -> AuthResult<Option<String>> {
        if !self.path.exists() {
            debug!("No credential file at {}", self.path.display());
            return Ok(None);
        }

        let entries = dotenv::from_path_iter(&self.path).map_err(|e| self.dotenv_error(e))?;
        for entry in entries {
            let (key, value) = entry.map_err(|e| self.dotenv_error(e))?;
            if key == auth::CREDENTIAL_KEY {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn read_other_lines(&self) -> AuthResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.io_error(e))?;
            if !is_key_line(&line) {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    fn write_lines(&self, lines: &[String]) -> AuthResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        for line in lines {
            writeln!(file, "{}", line)?;
        }

        // Set restrictive permissions (Unix-like systems only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = file.metadata()?.permissions();
            perms.set_mode(auth::CREDENTIAL_FILE_PERMISSIONS);
            file.set_permissions(perms)?;
        }

        Ok(())
    }

    fn dotenv_error(&self, error: dotenv::Error) -> AuthError {
        match error {
            dotenv::Error::Io(e) => self.io_error(e),
            other => AuthError::InvalidCredentialFile {
                path: self.path.clone(),
                reason: other.to_string(),
            },
        }
    }

    fn io_error(&self, error: io::Error) -> AuthError {
        if error.kind() == io::ErrorKind::PermissionDenied {
            AuthError::PermissionDenied {
                path: self.path.clone(),
            }
        } else {
            AuthError::CredentialStorage(error)
        }
    }
}

/// Whether a line assigns the key; values are read through dotenv
fn is_key_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    trimmed
        .split_once('=')
        .map_or(false, |(key, _)| key.trim() == auth::CREDENTIAL_KEY)
}

/// Prompt for a key without echoing it
pub fn prompt_token() -> AuthResult<ApiToken> {
    let token = rpassword::prompt_password("NewsAPI key: ")?;
    ApiToken::new(token)
}

/// Where the key for this run comes from
#[derive(Debug, Clone)]
pub struct AuthStatus {
    /// Whether a key is stored on disk
    pub stored: bool,
    /// Whether a key was supplied via flag or environment
    pub override_set: bool,
    /// Credential file location
    pub path: PathBuf,
}

impl AuthStatus {
    /// Whether any key is available
    pub fn has_credentials(&self) -> bool {
        self.stored || self.override_set
    }

    /// Descriptive status message for display
    pub fn status_message(&self) -> String {
        match (self.override_set, self.stored) {
            (true, _) => "Using API key from --api-key / NEWS_API_KEY".to_string(),
            (false, true) => format!("Using stored API key ({})", self.path.display()),
            (false, false) => "Missing API key - run 'auth setup' to configure".to_string(),
        }
    }
}

/// Resolve the key for this run: an explicit override wins over the store
///
/// The override is never written back to the store.
pub fn resolve_credential(
    store: &CredentialStore,
    override_token: Option<&str>,
) -> AuthResult<Credential> {
    match override_token {
        Some(token) => Ok(Credential::Present(ApiToken::new(token)?)),
        None => store.load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("news-explorer").join("credentials.env"))
    }

    #[test]
    fn test_token_validation() {
        assert!(ApiToken::new("abc123").is_ok());
        assert_eq!(ApiToken::new("  abc123 ").unwrap().as_str(), "abc123");
        assert!(matches!(ApiToken::new(""), Err(AuthError::EmptyToken)));
        assert!(matches!(ApiToken::new("   "), Err(AuthError::EmptyToken)));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = ApiToken::new("10afe1bd055f4c07").unwrap();
        let debug = format!("{:?}", token);
        assert!(debug.contains("10af****"));
        assert!(!debug.contains("055f4c07"));
    }

    #[test]
    fn test_missing_file_is_missing_credential() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), Credential::Missing);
    }

    #[test]
    fn test_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);

        store.save(&ApiToken::new("first-key")?)?;
        assert_eq!(store.load()?, Credential::Present(ApiToken::new("first-key")?));

        // Saving again replaces the key rather than appending a second one
        store.save(&ApiToken::new("second-key")?)?;
        let contents = fs::read_to_string(store.path())?;
        assert_eq!(contents.matches("NEWS_API_KEY=").count(), 1);
        assert_eq!(store.load()?, Credential::Present(ApiToken::new("second-key")?));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.path())?.permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        Ok(())
    }

    #[test]
    fn test_persists_across_store_instances() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        store_in(&dir).save(&ApiToken::new("persisted")?)?;

        let reopened = store_in(&dir);
        assert_eq!(
            reopened.load()?.token().map(ApiToken::as_str),
            Some("persisted")
        );
        Ok(())
    }

    #[test]
    fn test_empty_stored_value_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        fs::write(&path, "NEWS_API_KEY=\n")?;

        let result = CredentialStore::new(&path).load();
        assert!(matches!(result, Err(AuthError::EmptyToken)));
        Ok(())
    }

    #[test]
    fn test_other_lines_are_preserved() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        fs::write(&path, "# my keys\nOTHER=1\nNEWS_API_KEY=\"old\"\n")?;

        let store = CredentialStore::new(&path);
        assert_eq!(store.load()?.token().map(ApiToken::as_str), Some("old"));

        store.save(&ApiToken::new("new")?)?;
        let contents = fs::read_to_string(&path)?;
        assert!(contents.contains("# my keys"));
        assert!(contents.contains("OTHER=1"));
        assert!(contents.contains("NEWS_API_KEY=new"));
        assert!(!contents.contains("old"));
        Ok(())
    }

    #[test]
    fn test_clear() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);

        assert!(!store.clear()?);

        store.save(&ApiToken::new("key")?)?;
        assert!(store.clear()?);
        assert_eq!(store.load()?, Credential::Missing);
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_clear_keeps_other_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        fs::write(&path, "OTHER=1\nNEWS_API_KEY=abc\n")?;

        let store = CredentialStore::new(&path);
        assert!(store.clear()?);
        assert_eq!(fs::read_to_string(&path)?.trim(), "OTHER=1");
        Ok(())
    }

    #[test]
    fn test_override_wins() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let store = store_in(&dir);
        store.save(&ApiToken::new("stored")?)?;

        let credential = resolve_credential(&store, Some("from-flag"))?;
        assert_eq!(credential.token().map(ApiToken::as_str), Some("from-flag"));

        // The override is not persisted
        assert_eq!(store.load()?.token().map(ApiToken::as_str), Some("stored"));
        Ok(())
    }

    #[test]
    fn test_is_key_line() {
        assert!(is_key_line("NEWS_API_KEY=abc"));
        assert!(is_key_line("export NEWS_API_KEY = abc "));
        assert!(!is_key_line("OTHER=abc"));
        assert!(!is_key_line("NEWS_API_KEY_OLD=abc"));
        assert!(!is_key_line("# NEWS_API_KEY=abc"));
    }

    #[test]
    fn test_load_follows_dotenv_quoting() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        let store = CredentialStore::new(&path);

        fs::write(&path, "NEWS_API_KEY='abc123'\nOTHER=1 # note\n")?;
        assert_eq!(store.load()?.token().map(ApiToken::as_str), Some("abc123"));

        fs::write(&path, "OTHER=1\nexport NEWS_API_KEY=def456\n")?;
        assert_eq!(store.load()?.token().map(ApiToken::as_str), Some("def456"));

        fs::write(&path, "NEWS_API_KEY=\"ghi789\"\n")?;
        assert_eq!(store.load()?.token().map(ApiToken::as_str), Some("ghi789"));
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        fs::write(&path, "NEWS_API_KEY='unterminated\n")?;

        let result = CredentialStore::new(&path).load();
        assert!(matches!(result, Err(AuthError::InvalidCredentialFile { .. })));
        Ok(())
    }

    #[test]
    fn test_clear_single_quoted_key() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("credentials.env");
        fs::write(&path, "NEWS_API_KEY='abc123'\n")?;

        let store = CredentialStore::new(&path);
        assert!(store.clear()?);
        assert_eq!(store.load()?, Credential::Missing);
        Ok(())
    }

    #[test]
    fn test_auth_status_messages() {
        let mut status = AuthStatus {
            stored: false,
            override_set: false,
            path: PathBuf::from("/tmp/credentials.env"),
        };
        assert!(!status.has_credentials());
        assert!(status.status_message().contains("Missing"));

        status.stored = true;
        assert!(status.status_message().contains("stored"));

        status.override_set = true;
        assert!(status.status_message().contains("NEWS_API_KEY"));
    }
}
