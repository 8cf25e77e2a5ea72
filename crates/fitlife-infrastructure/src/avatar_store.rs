//! On-disk avatar cache.

use crate::paths::FitlifePaths;
use fitlife_core::avatar::AvatarStore;
use fitlife_core::error::{FitlifeError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// [`AvatarStore`] keeping one image file under the data directory.
#[derive(Debug, Clone)]
pub struct FileAvatarStore {
    path: PathBuf,
}

impl FileAvatarStore {
    pub fn new(paths: &FitlifePaths) -> Self {
        Self::at(paths.avatar_file())
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl AvatarStore for FileAvatarStore {
    async fn persist_from(&self, source: &Path) -> Result<PathBuf> {
        if source == self.path {
            return Ok(self.path.clone());
        }

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = tokio::fs::copy(source, &self.path).await.map_err(|e| {
            FitlifeError::io(format!(
                "Failed to copy avatar from {}: {e}",
                source.display()
            ))
        })?;

        tracing::info!(path = %self.path.display(), bytes, "Avatar cached");
        Ok(self.path.clone())
    }

    async fn current(&self) -> Option<PathBuf> {
        match tokio::fs::try_exists(&self.path).await {
            Ok(true) => Some(self.path.clone()),
            _ => None,
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Avatar removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_persist_replaces_previous_avatar() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileAvatarStore::new(&FitlifePaths::with_base(temp_dir.path()));
        assert!(store.current().await.is_none());

        let first = temp_dir.path().join("first.jpg");
        let second = temp_dir.path().join("second.jpg");
        std::fs::write(&first, b"one").unwrap();
        std::fs::write(&second, b"two").unwrap();

        store.persist_from(&first).await.unwrap();
        let cached = store.persist_from(&second).await.unwrap();

        assert_eq!(store.current().await, Some(cached.clone()));
        assert_eq!(std::fs::read(&cached).unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileAvatarStore::at(temp_dir.path().join("avatar.jpg"));
        let source = temp_dir.path().join("pic.jpg");
        std::fs::write(&source, b"img").unwrap();
        store.persist_from(&source).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.current().await.is_none());
        assert!(source.exists());
    }

    #[tokio::test]
    async fn test_missing_source_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileAvatarStore::at(temp_dir.path().join("avatar.jpg"));

        let err = store
            .persist_from(&temp_dir.path().join("missing.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, FitlifeError::Io { .. }));
    }
}
