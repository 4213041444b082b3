//! Storage adapters implementing the [`ArtifactStore`](crate::ports::ArtifactStore) port.

mod local;

pub use local::LocalArtifactStore;
