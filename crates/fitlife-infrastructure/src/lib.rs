//! File-backed implementations of the FitLife storage traits.

pub mod avatar_store;
pub mod config_service;
pub mod credential_record;
pub mod memory_credential_store;
pub mod paths;
pub mod storage;
pub mod toml_credential_store;

pub use crate::avatar_store::FileAvatarStore;
pub use crate::config_service::ConfigService;
pub use crate::memory_credential_store::InMemoryCredentialStore;
pub use crate::paths::FitlifePaths;
pub use crate::toml_credential_store::TomlCredentialStore;
