//! PDF Renderer Port - turns Markdown into a paginated PDF document.

use async_trait::async_trait;
use thiserror::Error;

/// Port for Markdown-to-PDF rendering.
///
/// One implementation is chosen per deployment. The returned bytes are a
/// complete PDF document; persistence is the artifact store's concern, so a
/// rendering failure never leaves a partial file behind.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Renders the Markdown text into a complete PDF document.
    async fn render(&self, markdown: &str) -> Result<Vec<u8>, RenderError>;
}

/// Failures from PDF rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Page layout could not be produced (fonts, text placement).
    #[error("pdf layout failed: {0}")]
    Layout(String),

    /// The assembled document could not be serialized.
    #[error("pdf encoding failed: {0}")]
    Encode(String),
}

impl RenderError {
    /// Creates a layout error.
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout(message.into())
    }

    /// Creates an encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }
}
