//! Remote text generation seam.
//!
//! The pipeline only knows this trait; the Gemini REST implementation lives
//! in `mfw-interaction`.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of one outbound generation call.
///
/// Messages carry whatever the transport reported so they can be shown to
/// the user verbatim. They never contain the credential.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The request never produced an HTTP response (DNS, connect, TLS...).
    #[error("request failed: {message}")]
    Request { message: String, is_retryable: bool },

    /// The service answered with a non-success status.
    #[error("HTTP {status_code}: {message}")]
    Http { status_code: u16, message: String },

    /// The response parsed but contained no text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No API key was available to the client.
    #[error("API key is missing")]
    MissingCredential,

    /// The caller-imposed deadline elapsed.
    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl GenerationError {
    pub fn request(message: impl Into<String>, is_retryable: bool) -> Self {
        Self::Request {
            message: message.into(),
            is_retryable,
        }
    }

    pub fn http(status_code: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status_code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Quota exhaustion, server errors and timeouts may clear up on their
    /// own; authentication and decoding failures will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { is_retryable, .. } => *is_retryable,
            Self::Http { status_code, .. } => matches!(status_code, 429 | 500 | 502 | 503 | 504),
            Self::EmptyResponse | Self::Timeout(_) => true,
            Self::MalformedResponse(_) | Self::MissingCredential => false,
        }
    }
}

/// A hosted text-generation model: one prompt in, one completion out.
///
/// Implementations make exactly one outbound call per invocation and never
/// retry on their own.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Short human-readable description of the backing model.
    fn describe(&self) -> String;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T: GenerationClient + ?Sized> GenerationClient for std::sync::Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }
}
