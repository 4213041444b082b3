//! Text Generator Port - interface to the generative-language model.

use async_trait::async_trait;
use thiserror::Error;

/// Port for AI text generation.
///
/// Implementations call an external model with a single composed prompt and
/// return the generated Markdown. The pipeline makes exactly one attempt per
/// request: no retries, no streaming, no token configuration.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates Markdown for the composed prompt.
    async fn generate_markdown(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Failures from the text generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// API key rejected by the provider.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a server-side error or refused the request.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network failure during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The call did not complete within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Provider response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The model answered but produced no usable text.
    #[error("model returned no usable content")]
    EmptyCompletion,
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_without_leaking_internals() {
        assert_eq!(
            GenerationError::AuthenticationFailed.to_string(),
            "authentication failed"
        );
        assert_eq!(
            GenerationError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
        assert_eq!(
            GenerationError::unavailable("503").to_string(),
            "provider unavailable: 503"
        );
        assert_eq!(
            GenerationError::EmptyCompletion.to_string(),
            "model returned no usable content"
        );
    }
}
