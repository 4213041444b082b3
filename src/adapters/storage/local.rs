//! Local Artifact Store - filesystem implementation of the artifact port.
//!
//! One flat directory of transient PDFs. Writes are atomic (temp file with a
//! random suffix, fsync, rename) so a stored artifact is always fully written
//! before `store` resolves, and a crash mid-write never leaves a partial
//! artifact under its final name.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::ArtifactName;
use crate::ports::{ArtifactGuard, ArtifactStore, StorageError};

/// Filesystem-backed ephemeral artifact store.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    /// Directory holding the transient PDFs. Created lazily on first store.
    base_path: PathBuf,
}

impl LocalArtifactStore {
    /// Creates a store rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Final on-disk path for an artifact.
    fn artifact_path(&self, name: &ArtifactName) -> PathBuf {
        self.base_path.join(name.as_str())
    }

    /// Temp path with a per-write random suffix so concurrent writes to the
    /// same artifact name never clobber each other's in-flight file.
    fn temp_path(&self, name: &ArtifactName) -> PathBuf {
        self.base_path
            .join(format!(".{}.{}.tmp", name.as_str(), Uuid::new_v4()))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(&self, name: &ArtifactName, bytes: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "failed to create storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let temp_path = self.temp_path(name);
        let final_path = self.artifact_path(name);

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(bytes).await.map_err(|e| {
            StorageError::io(format!(
                "failed to write temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::io(format!(
                "failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    async fn acquire(&self, name: &ArtifactName) -> Result<Option<ArtifactGuard>, StorageError> {
        let path = self.artifact_path(name);

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(ArtifactGuard::new(path))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(format!(
                "failed to stat {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
