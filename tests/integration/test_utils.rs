//! Shared test utilities for integration tests

use dirtree::service::DirectoryTreeService;
use dirtree::store::SledNodeStore;
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Set environment variables for the guard's lifetime, restoring the old values on drop.
pub struct ScopedEnv {
    saved: Vec<(String, Option<std::ffi::OsString>)>,
}

impl ScopedEnv {
    pub fn set(vars: &[(&str, &std::path::Path)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, value)| {
                let previous = std::env::var_os(key);
                std::env::set_var(key, value);
                (key.to_string(), previous)
            })
            .collect();
        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..) {
            match previous {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Service over a sled store in a fresh temp dir. Keep the TempDir alive.
pub fn sled_service() -> (TempDir, DirectoryTreeService) {
    let dir = TempDir::new().unwrap();
    let store = SledNodeStore::new(dir.path().join("store")).unwrap();
    (dir, DirectoryTreeService::new(Arc::new(store)))
}

/// Run `body` against both store backends.
pub fn for_each_backend(body: impl Fn(&DirectoryTreeService)) {
    body(&DirectoryTreeService::in_memory());
    let (_dir, service) = sled_service();
    body(&service);
}
