//! Locally cached profile picture.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Keeps a single on-device copy of the user's avatar image.
#[async_trait::async_trait]
pub trait AvatarStore: Send + Sync {
    /// Copies `source` into the cache, replacing any previous avatar, and
    /// returns the cached path.
    async fn persist_from(&self, source: &Path) -> Result<PathBuf>;

    /// Path of the cached avatar, if one exists.
    async fn current(&self) -> Option<PathBuf>;

    /// Removes the cached avatar. Succeeds when nothing is cached.
    async fn clear(&self) -> Result<()>;
}
