//! Secret management service trait.
//!
//! Defines the interface for loading the Gemini API key and access codes.

use crate::config::SecretConfig;
use crate::error::{MfwError, Result};

/// Service for loading secret configuration.
///
/// # Security Note
///
/// Implementations must never log secret values or embed them in error
/// messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;

    /// Returns the Gemini API key or a configuration error naming where it
    /// was looked for.
    async fn gemini_api_key(&self) -> Result<String> {
        let secrets = self.load_secrets().await?;
        secrets
            .gemini
            .map(|gemini| gemini.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| MfwError::config("Gemini API key not found in secrets"))
    }
}
