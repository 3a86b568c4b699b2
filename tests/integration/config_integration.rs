//! Configuration layering as seen from a workspace

use super::test_utils::{env_lock, ScopedEnv};
use dirtree::config::{ConfigLoader, StorageBackend};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_env_specific_file_overrides_base() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("xdg");
    let _env = ScopedEnv::set(&[("XDG_CONFIG_HOME", config_home.as_path())]);

    let workspace = temp_dir.path().join("ws");
    let config_dir = workspace.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[storage]\nbackend = \"sled\"\nstore_path = \"data/base\"\n",
    )
    .unwrap();
    fs::write(
        config_dir.join("staging.toml"),
        "[storage]\nstore_path = \"data/staging\"\n",
    )
    .unwrap();

    let base = ConfigLoader::load(&workspace).unwrap();
    assert_eq!(base.storage.store_path, PathBuf::from("data/base"));

    let staging = {
        let _env_name = ScopedEnv::set(&[("DIRTREE_ENV", std::path::Path::new("staging"))]);
        ConfigLoader::load(&workspace).unwrap()
    };
    assert_eq!(staging.storage.store_path, PathBuf::from("data/staging"));
    assert_eq!(
        staging.storage.backend_kind().unwrap(),
        StorageBackend::Sled
    );
    assert_eq!(
        staging.storage.resolve_path(&workspace),
        workspace.join("data/staging")
    );
}

#[test]
fn test_malformed_workspace_file_is_an_error() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("xdg");
    let _env = ScopedEnv::set(&[("XDG_CONFIG_HOME", config_home.as_path())]);

    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[storage\nbackend = ").unwrap();

    assert!(ConfigLoader::load(temp_dir.path()).is_err());
}
