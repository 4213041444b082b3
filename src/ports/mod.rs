//! Ports - trait interfaces between the pipeline and the outside world.
//!
//! The application layer depends only on these traits; adapters supply the
//! concrete integrations (Gemini API, printpdf layout, local filesystem).

mod artifact_store;
mod renderer;
mod text_generator;

pub use artifact_store::{ArtifactGuard, ArtifactStore, StorageError};
pub use renderer::{PdfRenderer, RenderError};
pub use text_generator::{GenerationError, TextGenerator};
