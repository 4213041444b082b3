//! Document Pipeline - validate → generate → render → store.
//!
//! One logical pipeline per request, stages strictly sequential, every
//! external call attempted exactly once. Failures carry the stage that
//! produced them; no artifact is written unless rendering succeeded.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{ArtifactName, GenerationRequest};
use crate::ports::{
    ArtifactStore, GenerationError, PdfRenderer, RenderError, StorageError, TextGenerator,
};

/// Composes the text generator, the PDF renderer and the artifact store into
/// the request-to-artifact pipeline. Dependencies are injected at
/// construction; there is no ambient global state.
pub struct DocumentPipeline {
    generator: Arc<dyn TextGenerator>,
    renderer: Arc<dyn PdfRenderer>,
    store: Arc<dyn ArtifactStore>,
}

impl DocumentPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        renderer: Arc<dyn PdfRenderer>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            generator,
            renderer,
            store,
        }
    }

    /// Runs one validated request through generation, rendering and storage,
    /// returning the name of the stored artifact.
    pub async fn run(&self, request: &GenerationRequest) -> Result<ArtifactName, PipelineError> {
        let prompt = request.composed_prompt();

        debug!(topic = request.topic(), "generating markdown");
        let markdown = self.generator.generate_markdown(&prompt).await?;
        if markdown.trim().is_empty() {
            return Err(PipelineError::Generation(GenerationError::EmptyCompletion));
        }

        debug!(
            topic = request.topic(),
            markdown_bytes = markdown.len(),
            "rendering pdf"
        );
        let pdf = self.renderer.render(&markdown).await?;

        let name = request.artifact_name();
        self.store.store(&name, &pdf).await?;

        info!(artifact = %name, size_bytes = pdf.len(), "artifact ready");
        Ok(name)
    }
}

/// Pipeline failures, classified by the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("pdf rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("artifact storage failed: {0}")]
    Storage(#[from] StorageError),
}
