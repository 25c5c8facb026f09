//! Error types for the MF Workbench.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::generation::GenerationError;

/// A shared error type for configuration, secrets and local I/O.
///
/// Pipeline failures use [`PipelineError`] instead so callers can branch on
/// the failure kind without inspecting message text.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MfwError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Access gate rejected the caller
    #[error("Security error: {0}")]
    Security(String),
}

impl MfwError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a security error
    pub fn is_security(&self) -> bool {
        matches!(self, Self::Security(_))
    }
}

impl From<std::io::Error> for MfwError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MfwError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MfwError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MfwError>`.
pub type Result<T> = std::result::Result<T, MfwError>;

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PipelineErrorKind {
    Validation,
    Format,
    Transport,
}

/// Failure of a single pipeline call.
///
/// None of these are fatal: the session state is left exactly as it was
/// before the call and the caller may try again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Input rejected before any remote call was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model answered but nothing usable could be parsed from it.
    #[error("Format error: {0}")]
    Format(String),

    /// The remote call itself failed.
    #[error("Transport error: {0}")]
    Transport(#[from] GenerationError),
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn kind(&self) -> PipelineErrorKind {
        match self {
            Self::Validation(_) => PipelineErrorKind::Validation,
            Self::Format(_) => PipelineErrorKind::Format,
            Self::Transport(_) => PipelineErrorKind::Transport,
        }
    }

    /// Whether re-issuing the same call could succeed without the user
    /// changing their input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Format(_) => true,
            Self::Transport(err) => err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_kind() {
        assert_eq!(
            PipelineError::validation("empty").kind(),
            PipelineErrorKind::Validation
        );
        assert_eq!(
            PipelineError::format("no topics").kind(),
            PipelineErrorKind::Format
        );
        let transport: PipelineError = GenerationError::EmptyResponse.into();
        assert_eq!(transport.kind(), PipelineErrorKind::Transport);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PipelineErrorKind::Transport.to_string(), "transport");
        assert_eq!(
            "format".parse::<PipelineErrorKind>().unwrap(),
            PipelineErrorKind::Format
        );
    }

    #[test]
    fn test_transport_message_is_verbatim() {
        let err: PipelineError = GenerationError::http(403, "PERMISSION_DENIED: API key invalid").into();
        assert!(err.to_string().contains("PERMISSION_DENIED: API key invalid"));
    }

    #[test]
    fn test_retryable() {
        assert!(!PipelineError::validation("x").is_retryable());
        assert!(PipelineError::format("x").is_retryable());
        let quota: PipelineError = GenerationError::http(429, "RESOURCE_EXHAUSTED").into();
        assert!(quota.is_retryable());
        let auth: PipelineError = GenerationError::http(401, "UNAUTHENTICATED").into();
        assert!(!auth.is_retryable());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MfwError = io.into();
        assert!(matches!(err, MfwError::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_from_toml_error() {
        let err: MfwError = toml::from_str::<toml::Value>("[broken").unwrap_err().into();
        assert!(matches!(err, MfwError::Serialization { ref format, .. } if format == "TOML"));
    }
}
