//! Configuration System
//!
//! Layered configuration, lowest precedence first: built-in defaults, the
//! global user file, workspace `config/config.toml`, `config/<DIRTREE_ENV>.toml`,
//! then `DIRTREE_*` environment variables.

use crate::error::TreeError;
use crate::logging::{self, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod defaults;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirTreeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where directory records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sled,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "sled" or "memory"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Sled database directory, relative to the workspace root unless absolute
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_backend() -> String {
    defaults::DEFAULT_BACKEND.to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_STORE_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            store_path: default_store_path(),
        }
    }
}

impl StorageConfig {
    pub fn backend_kind(&self) -> Result<StorageBackend, TreeError> {
        match self.backend.to_ascii_lowercase().as_str() {
            "sled" => Ok(StorageBackend::Sled),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(TreeError::ConfigError(format!(
                "Unknown storage backend: {} (must be 'sled' or 'memory')",
                other
            ))),
        }
    }

    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            workspace_root.join(&self.store_path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DirTreeConfig {
    /// Validate the entire configuration. An empty list means valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = self.storage.backend_kind() {
            errors.push(ValidationError::Storage(e.to_string()));
        }
        if self.storage.store_path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }

        if !logging::is_valid_level(&self.logging.level) {
            errors.push(ValidationError::Logging(format!(
                "Invalid log level: {}",
                self.logging.level
            )));
        }
        if let Err(e) = logging::parse_format(&self.logging.format) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        if let Err(e) = logging::parse_output(&self.logging.output) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        errors
    }

    /// Fold validation errors into a single `ConfigError`.
    pub fn ensure_valid(self) -> Result<Self, TreeError> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(self);
        }
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        Err(TreeError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            messages.join("\n")
        )))
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the layered configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<DirTreeConfig, TreeError> {
        let builder = defaults::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load defaults plus one explicit file. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<DirTreeConfig, TreeError> {
        let config = defaults::builder_with_defaults()?
            .add_source(config::File::from(path).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// `--config` wins over the workspace layering when given.
    pub fn load_for(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<DirTreeConfig, TreeError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }
}

#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
