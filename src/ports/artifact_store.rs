//! Artifact Store Port - transient handoff buffer for rendered PDFs.
//!
//! Storage is not a repository: an artifact exists only between rendering and
//! delivery. Acquisition is scoped through [`ArtifactGuard`], which deletes
//! the file on every exit path and reports unlink failures as warnings.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::domain::ArtifactName;

/// Port for the ephemeral artifact directory.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists rendered bytes under the given name, fully written before the
    /// future resolves. An existing artifact with the same name is replaced.
    async fn store(&self, name: &ArtifactName, bytes: &[u8]) -> Result<(), StorageError>;

    /// Acquires the named artifact for delivery.
    ///
    /// Returns `None` when no such artifact exists. The returned guard owns
    /// the file: dropping it deletes the artifact regardless of whether the
    /// delivery succeeded.
    async fn acquire(&self, name: &ArtifactName) -> Result<Option<ArtifactGuard>, StorageError>;
}

/// Scoped ownership of one stored artifact.
///
/// Dropping the guard removes the file. Deletion failures are logged as
/// warnings rather than surfaced: by that point the response is already
/// decided and a leftover temp file must not fail the request.
#[derive(Debug)]
pub struct ArtifactGuard {
    path: PathBuf,
}

impl ArtifactGuard {
    /// Takes ownership of the artifact at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the full artifact contents.
    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            StorageError::io(format!("failed to read {}: {}", self.path.display(), e))
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArtifactGuard {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "failed to delete artifact after delivery"
            );
        }
    }
}

/// Failures from artifact storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(String),
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn guard_reads_then_deletes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF-").unwrap();

        let guard = ArtifactGuard::new(&path);
        assert_eq!(guard.read().await.unwrap(), b"%PDF-");
        drop(guard);

        assert!(!path.exists());
    }

    #[test]
    fn guard_drop_on_missing_file_only_warns() {
        let dir = tempfile::tempdir().unwrap();
        let guard = ArtifactGuard::new(dir.path().join("never-created.pdf"));
        drop(guard);
    }
}
