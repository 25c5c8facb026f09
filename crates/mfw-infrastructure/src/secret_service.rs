//! Secret service implementation.
//!
//! Reads the Gemini API key and access codes from `secret.json`. The
//! `GEMINI_API_KEY` environment variable, when set, replaces the file's key.

use crate::paths::MfwPaths;
use mfw_core::config::{GeminiSecret, SecretConfig};
use mfw_core::error::Result;
use mfw_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Service for managing secret configuration.
///
/// Secrets are read once and cached for the life of the service.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    api_key_override: Option<String>,
    /// Cached secret config loaded from storage.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Uses the default secret file and honours `GEMINI_API_KEY`.
    pub fn new(paths: &MfwPaths) -> Result<Self> {
        Ok(Self::with_path(paths.secret_file()?)
            .with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Reads only `path`; no environment lookup.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            api_key_override: None,
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Replaces the file's API key with `key` when it is non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        self.api_key_override = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        if let Ok(read_lock) = self.secrets.read() {
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            serde_json::from_str::<SecretConfig>(&content)?
        } else {
            tracing::warn!("Secret file not found at {:?}", self.path);
            SecretConfig::default()
        };

        if let Some(key) = &self.api_key_override {
            tracing::debug!("Using Gemini API key from {}", API_KEY_ENV);
            loaded.gemini = Some(GeminiSecret {
                api_key: key.clone(),
            });
        }

        if let Ok(mut write_lock) = self.secrets.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_secret(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("secret.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[tokio::test]
    async fn test_loads_key_and_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secret(
            dir.path(),
            r#"{"gemini": {"api_key": "file-key"}, "access_codes": {"valid_list": "a,b"}}"#,
        );
        let service = SecretServiceImpl::with_path(&path);

        assert!(service.secret_file_exists().await);
        assert_eq!(service.gemini_api_key().await.unwrap(), "file-key");
        let secrets = service.load_secrets().await.unwrap();
        assert_eq!(secrets.access_codes.unwrap().valid_list, "a,b");
    }

    #[tokio::test]
    async fn test_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secret(dir.path(), r#"{"gemini": {"api_key": "file-key"}}"#);
        let service =
            SecretServiceImpl::with_path(&path).with_api_key_override(Some("env-key".into()));
        assert_eq!(service.gemini_api_key().await.unwrap(), "env-key");
    }

    #[tokio::test]
    async fn test_blank_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secret(dir.path(), r#"{"gemini": {"api_key": "file-key"}}"#);
        let service =
            SecretServiceImpl::with_path(&path).with_api_key_override(Some("   ".into()));
        assert_eq!(service.gemini_api_key().await.unwrap(), "file-key");
    }

    #[tokio::test]
    async fn test_missing_file_has_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let service = SecretServiceImpl::with_path(dir.path().join("secret.json"));
        assert!(!service.secret_file_exists().await);
        assert!(service.gemini_api_key().await.unwrap_err().is_config());
    }

    #[tokio::test]
    async fn test_malformed_file_does_not_echo_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_secret(dir.path(), r#"{"gemini": {"api_key": "leak-me""#);
        let err = SecretServiceImpl::with_path(&path)
            .load_secrets()
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("leak-me"));
    }
}
