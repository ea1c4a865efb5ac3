use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to access token file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse token: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Login failed: {0}")]
    LoginRejected(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenInfo {
    pub access_token: String,
    pub token_type: String,
    pub username: String,
}

impl TokenInfo {
    pub fn new(access_token: String, username: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            username,
        }
    }
}

pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save_token(&self, token: &TokenInfo) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(token)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load_token(&self) -> Result<TokenInfo, AuthError> {
        let content = std::fs::read_to_string(&self.path)?;
        let token: TokenInfo = serde_json::from_str(&content)?;
        Ok(token)
    }

    /// `Ok(None)` when nobody has logged in yet.
    pub fn stored_token(&self) -> Result<Option<TokenInfo>, AuthError> {
        match self.load_token() {
            Ok(token) => Ok(Some(token)),
            Err(AuthError::ReadError(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns whether a token was actually removed.
    pub fn clear(&self) -> Result<bool, AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

pub struct Authenticator {
    base_url: String,
    storage: TokenStorage,
    client: reqwest::Client,
}

impl Authenticator {
    pub fn new(base_url: impl Into<String>, token_path: PathBuf) -> Self {
        Self {
            base_url: base_url.into(),
            storage: TokenStorage::new(token_path),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, AuthError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn storage(&self) -> &TokenStorage {
        &self.storage
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenInfo, AuthError> {
        let url = format!("{}/token", self.base_url.trim_end_matches('/'));
        let params = [("username", username), ("password", password)];

        tracing::info!("Logging in as {}", username);

        let response = self.client
            .post(&url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::warn!("Login rejected with status {}", status);
            return Err(AuthError::LoginRejected(format!("Status {}: {}", status, error_text)));
        }

        let token_response: TokenResponse = response.json().await?;

        let mut token = TokenInfo::new(token_response.access_token, username.to_string());
        if let Some(token_type) = token_response.token_type {
            token.token_type = token_type;
        }

        self.storage.save_token(&token)?;
        tracing::info!("Login succeeded; token cached at {}", self.storage.path().display());

        Ok(token)
    }

    pub fn logout(&self) -> Result<bool, AuthError> {
        let removed = self.storage.clear()?;
        if removed {
            tracing::info!("Cleared cached token");
        }
        Ok(removed)
    }

    pub fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.storage.stored_token()?.map(|token| token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_token() -> TokenInfo {
        TokenInfo::new("test_access_token".to_string(), "alice".to_string())
    }

    #[test]
    fn save_token_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("nested").join("token.json");
        let storage = TokenStorage::new(token_path.clone());

        storage.save_token(&create_test_token()).unwrap();

        assert!(token_path.exists());
    }

    #[test]
    fn load_token_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path().join("token.json"));
        let original = create_test_token();

        storage.save_token(&original).unwrap();
        let loaded = storage.load_token().unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_token_file_means_logged_out() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path().join("nonexistent.json"));

        assert!(storage.load_token().is_err());
        assert_eq!(storage.stored_token().unwrap(), None);
    }

    #[test]
    fn corrupt_token_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token.json");
        std::fs::write(&token_path, "not json").unwrap();
        let storage = TokenStorage::new(token_path);

        assert!(matches!(storage.stored_token(), Err(AuthError::ParseError(_))));
    }

    #[test]
    fn clear_removes_token_once() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TokenStorage::new(temp_dir.path().join("token.json"));
        storage.save_token(&create_test_token()).unwrap();

        assert!(storage.clear().unwrap());
        assert!(!storage.clear().unwrap());
        assert_eq!(storage.stored_token().unwrap(), None);
    }

    #[test]
    fn authenticator_reads_cached_access_token() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token.json");
        TokenStorage::new(token_path.clone()).save_token(&create_test_token()).unwrap();

        let auth = Authenticator::new("http://localhost:8000", token_path);

        assert_eq!(auth.access_token().unwrap(), Some("test_access_token".to_string()));
    }
}
