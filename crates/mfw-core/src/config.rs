//! Configuration models.
//!
//! `RootConfig` maps `config.toml`; `SecretConfig` maps `secret.json`. Both
//! are plain data; loading lives in `mfw-infrastructure`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub workbench: WorkbenchSettings,
}

/// Non-secret settings for the Gemini client.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Off unless set; the transport default applies otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: None,
            request_timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkbenchSettings {
    #[serde(default = "default_true")]
    pub require_access_code: bool,
    /// Wrap width for the teleprompter view.
    #[serde(default = "default_prompter_width")]
    pub prompter_width: usize,
    /// Lines shown per teleprompter page.
    #[serde(default = "default_prompter_page_lines")]
    pub prompter_page_lines: usize,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            require_access_code: true,
            prompter_width: default_prompter_width(),
            prompter_page_lines: default_prompter_page_lines(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_prompter_width() -> usize {
    36
}

fn default_prompter_page_lines() -> usize {
    12
}

/// Root of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
    #[serde(default)]
    pub access_codes: Option<AccessCodes>,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct GeminiSecret {
    pub api_key: String,
}

impl std::fmt::Debug for GeminiSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSecret")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Comma-separated list of valid access codes.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct AccessCodes {
    #[serde(default)]
    pub valid_list: String,
}

impl std::fmt::Debug for AccessCodes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessCodes")
            .field("valid_list", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert!(config.workbench.require_access_code);
        assert!(config.gemini.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: RootConfig = toml::from_str(
            r#"
            [gemini]
            model = "gemini-2.5-flash"
            temperature = 0.7

            [workbench]
            require_access_code = false
            "#,
        )
        .unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.gemini.temperature, Some(0.7));
        assert!(!config.workbench.require_access_code);
        assert_eq!(config.workbench.prompter_width, 36);
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret: SecretConfig = serde_json::from_str(
            r#"{"gemini": {"api_key": "AIza-secret"}, "access_codes": {"valid_list": "vip1,vip2"}}"#,
        )
        .unwrap();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("AIza-secret"));
        assert!(!debug.contains("vip1"));
    }
}
