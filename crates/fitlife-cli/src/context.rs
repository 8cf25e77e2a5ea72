//! Wiring of stores, API client and controller for one CLI invocation.

use anyhow::{Context, Result, bail};
use fitlife_application::SessionController;
use fitlife_application::session::messages;
use fitlife_core::account::AccountApi;
use fitlife_core::avatar::AvatarStore;
use fitlife_core::config::AppConfig;
use fitlife_core::credential::CredentialStore;
use fitlife_infrastructure::config_service::{apply_env_overrides, home_override, storage_paths};
use fitlife_infrastructure::{
    ConfigService, FileAvatarStore, FitlifePaths, InMemoryCredentialStore, TomlCredentialStore,
};
use fitlife_interaction::{HttpAccountClient, RequestPipeline};
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub home: Option<PathBuf>,
    pub api_url: Option<String>,
    pub ephemeral: bool,
}

/// Resolves the configuration: `config.toml`, then `FITLIFE_*`, then flags.
pub fn load_config(options: &GlobalOptions) -> Result<AppConfig> {
    let env = |key: &str| std::env::var(key).ok();

    let home = options.home.clone().or_else(|| home_override(env));
    let config_paths = FitlifePaths::new(home.as_deref())?;
    let service = ConfigService::new(&config_paths);
    let mut config = service
        .get_config()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;

    apply_env_overrides(&mut config, env);
    if let Some(home) = home {
        config.storage.base_dir = Some(home);
    }
    if let Some(url) = &options.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

pub struct AppContext {
    pub config: AppConfig,
    pub credentials: Arc<dyn CredentialStore>,
    pub avatars: Arc<dyn AvatarStore>,
    pub api: Arc<dyn AccountApi>,
    pub controller: Arc<SessionController>,
}

impl AppContext {
    pub async fn new(config: AppConfig, ephemeral: bool) -> Result<Self> {
        let paths = storage_paths(&config)?;

        let credentials: Arc<dyn CredentialStore> = if ephemeral {
            tracing::debug!("Using in-memory credential store");
            Arc::new(InMemoryCredentialStore::new())
        } else {
            Arc::new(
                TomlCredentialStore::open(&paths)
                    .await
                    .context("Failed to open credential store")?,
            )
        };
        let avatars: Arc<dyn AvatarStore> = Arc::new(FileAvatarStore::new(&paths));
        let api: Arc<dyn AccountApi> = Arc::new(HttpAccountClient::new(
            &config.api,
            RequestPipeline::authenticated(credentials.clone()),
        )?);

        let controller = Arc::new(
            SessionController::new(credentials.clone(), api.clone())
                .with_avatar_store(avatars.clone()),
        );
        controller.restore().await;

        Ok(Self {
            config,
            credentials,
            avatars,
            api,
            controller,
        })
    }

    /// Cancels background work still running for this invocation.
    pub async fn shutdown(&self) {
        self.controller.shutdown().await;
    }

    /// Email of the signed-in user.
    pub fn session_email(&self) -> Result<String> {
        let state = self.controller.current();
        match state.session.email() {
            Some(email) if state.is_authenticated() => Ok(email.to_string()),
            _ => bail!(messages::NO_SESSION),
        }
    }
}
