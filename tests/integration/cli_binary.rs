//! The dirtree binary end to end

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn dirtree(workspace: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_dirtree"))
        .arg("--workspace")
        .arg(workspace.path())
        .arg("--quiet")
        .args(args)
        .env("XDG_CONFIG_HOME", workspace.path().join("xdg"))
        .output()
        .unwrap()
}

#[test]
fn test_binary_create_list_delete() {
    let ws = TempDir::new().unwrap();

    let out = dirtree(&ws, &["create", "fruits/apples/fuji"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "CREATE fruits/apples/fuji\n");

    let out = dirtree(&ws, &["list"]);
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "fruits\n  apples\n    fuji\n"
    );

    let out = dirtree(&ws, &["delete", "fruits/apples"]);
    assert!(out.status.success());
    let out = dirtree(&ws, &["list"]);
    assert_eq!(String::from_utf8_lossy(&out.stdout), "fruits\n");
}

#[test]
fn test_binary_conflict_exits_nonzero() {
    let ws = TempDir::new().unwrap();
    assert!(dirtree(&ws, &["create", "a"]).status.success());

    let out = dirtree(&ws, &["create", "a"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&out.stderr).trim_end(),
        "Directory already exists with path: a"
    );
}

#[test]
fn test_binary_invalid_config_exits_with_two() {
    let ws = TempDir::new().unwrap();
    let config = ws.path().join("bad.toml");
    fs::write(&config, "[storage]\nbackend = \"postgres\"\n").unwrap();

    let out = dirtree(&ws, &["--config", config.to_str().unwrap(), "list"]);
    assert_eq!(out.status.code(), Some(2));
}
