//! Unified path management for FitLife files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/fitlife/           # Config directory
//! ├── config.toml              # Application configuration
//! └── credentials.toml         # Session fields and per-user stats
//!
//! ~/.local/share/fitlife/      # Data directory
//! └── avatar/
//!     └── avatar.jpg           # Cached profile picture
//! ```
//!
//! With a base directory override both trees live under that directory
//! (`<base>/config.toml`, `<base>/credentials.toml`, `<base>/avatar/avatar.jpg`).

use fitlife_core::error::{FitlifeError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "fitlife";
const CONFIG_FILE: &str = "config.toml";
const CREDENTIALS_FILE: &str = "credentials.toml";
const AVATAR_DIR: &str = "avatar";
const AVATAR_FILE: &str = "avatar.jpg";

/// Resolves every FitLife file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitlifePaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl FitlifePaths {
    /// Creates paths rooted at `base_path`, or at the platform directories
    /// when `None`.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        match base_path {
            Some(base) => Ok(Self::with_base(base)),
            None => Self::platform(),
        }
    }

    /// Places everything under one directory (tests, portable installs).
    pub fn with_base(base: &Path) -> Self {
        Self {
            config_dir: base.to_path_buf(),
            data_dir: base.to_path_buf(),
        }
    }

    /// Uses the platform config and data directories (XDG on Linux).
    pub fn platform() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FitlifeError::Path("Cannot find config directory".to_string()))?
            .join(APP_DIR);
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FitlifeError::Path("Cannot find data directory".to_string()))?
            .join(APP_DIR);
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// The credential record.
    ///
    /// # Security Note
    ///
    /// The file holds the bearer token in plaintext; it is created with mode
    /// 600 on Unix.
    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join(CREDENTIALS_FILE)
    }

    pub fn avatar_file(&self) -> PathBuf {
        self.data_dir.join(AVATAR_DIR).join(AVATAR_FILE)
    }
}
