//! Ephemeral artifact storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Storage configuration
///
/// The directory is a transient handoff buffer, not a durable store. On
/// restricted filesystems (read-only deployments with only a writable temp
/// mount) the system temp directory is used instead of a local one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Explicit storage directory; overrides the restricted-filesystem logic
    pub directory: Option<PathBuf>,

    /// Deployment only has a writable temp filesystem
    #[serde(default)]
    pub restricted_filesystem: bool,
}

impl StorageConfig {
    /// Directory where transient PDFs are written.
    pub fn resolve_directory(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }
        if self.restricted_filesystem {
            return std::env::temp_dir();
        }
        PathBuf::from("documents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolves_to_local_documents_dir() {
        let config = StorageConfig::default();
        assert_eq!(config.resolve_directory(), PathBuf::from("documents"));
    }

    #[test]
    fn restricted_filesystem_resolves_to_temp_dir() {
        let config = StorageConfig {
            restricted_filesystem: true,
            ..Default::default()
        };
        assert_eq!(config.resolve_directory(), std::env::temp_dir());
    }

    #[test]
    fn explicit_directory_wins() {
        let config = StorageConfig {
            directory: Some(PathBuf::from("/srv/docs")),
            restricted_filesystem: true,
        };
        assert_eq!(config.resolve_directory(), PathBuf::from("/srv/docs"));
    }
}
