//! Domain types for the document generation pipeline.

mod artifact;
mod request;

pub use artifact::{slugify, ArtifactName, InvalidArtifactName};
pub use request::{GenerationRequest, RequestError};
