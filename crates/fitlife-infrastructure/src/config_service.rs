//! Configuration service.
//!
//! Loads [`AppConfig`] from `config.toml`, applies environment overrides and
//! caches the result.

use crate::paths::FitlifePaths;
use crate::storage::AtomicTomlFile;
use fitlife_core::config::AppConfig;
use fitlife_core::error::Result;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "FITLIFE_API_URL";
/// Overrides `logging.level`.
pub const ENV_LOG: &str = "FITLIFE_LOG";
/// Overrides `storage.base_dir` and the location of `config.toml` itself.
pub const ENV_HOME: &str = "FITLIFE_HOME";
/// Overrides `nutrition.app_id`.
pub const ENV_NUTRITION_APP_ID: &str = "FITLIFE_NUTRITION_APP_ID";
/// Overrides `nutrition.app_key`.
pub const ENV_NUTRITION_APP_KEY: &str = "FITLIFE_NUTRITION_APP_KEY";

/// Loads and caches the application configuration.
///
/// A missing or blank `config.toml` yields [`AppConfig::default`]; the file is
/// never created implicitly.
#[derive(Debug)]
pub struct ConfigService {
    file: AtomicTomlFile<AppConfig>,
    config: RwLock<Option<AppConfig>>,
}

impl ConfigService {
    pub fn new(paths: &FitlifePaths) -> Self {
        Self::at(paths.config_file())
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
            config: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the configuration, reading the file on first access.
    pub fn get_config(&self) -> Result<AppConfig> {
        if let Some(cached) = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let loaded = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            path = %self.file.path().display(),
            base_url = %loaded.api.base_url,
            "Loaded configuration"
        );

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Writes `config` to disk and replaces the cached copy.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.save(config)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(())
    }

    /// Forces the next [`get_config`](Self::get_config) to re-read the file.
    pub fn invalidate_cache(&self) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Returns the base directory requested through [`ENV_HOME`], if any.
pub fn home_override(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    non_empty(lookup(ENV_HOME)).map(PathBuf::from)
}

/// Applies the `FITLIFE_*` environment overrides on top of `config`.
///
/// `lookup` is usually `|key| std::env::var(key).ok()`. Empty values are
/// ignored.
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = non_empty(lookup(ENV_API_URL)) {
        config.api.base_url = url;
    }
    if let Some(level) = non_empty(lookup(ENV_LOG)) {
        config.logging.level = level;
    }
    if let Some(home) = home_override(&lookup) {
        config.storage.base_dir = Some(home);
    }
    if let Some(app_id) = non_empty(lookup(ENV_NUTRITION_APP_ID)) {
        config.nutrition.app_id = Some(app_id);
    }
    if let Some(app_key) = non_empty(lookup(ENV_NUTRITION_APP_KEY)) {
        config.nutrition.app_key = Some(app_key);
    }
}

/// Resolves the storage paths selected by `config`.
pub fn storage_paths(config: &AppConfig) -> Result<FitlifePaths> {
    FitlifePaths::new(config.storage.base_dir.as_deref())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
