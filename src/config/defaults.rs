//! Merge rules: built-in defaults sit below every file and env source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub const DEFAULT_BACKEND: &str = "sled";
pub const DEFAULT_STORE_PATH: &str = ".dirtree/store";

/// Create a Config builder with the defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.backend", DEFAULT_BACKEND)?
        .set_default("storage.store_path", DEFAULT_STORE_PATH)
}
