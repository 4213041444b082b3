//! Application layer - the request-to-artifact pipeline.

mod pipeline;

pub use pipeline::{DocumentPipeline, PipelineError};
