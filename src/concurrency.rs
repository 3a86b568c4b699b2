//! Per-root mutation locks
//!
//! Every mutation touches at most two top-level subtrees. Holding the locks for
//! those root names keeps two concurrent creates of the same path from both
//! observing "absent" and racing to insert.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Lock registry keyed by top-level directory name.
#[derive(Default)]
pub struct RootLockManager {
    locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
}

impl RootLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a root name.
    pub fn get_lock(&self, root: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(root.to_string()).or_default())
    }

    /// Locks for several roots in a fixed global order, duplicates removed.
    ///
    /// Callers must acquire them in the returned order.
    pub fn ordered_locks(&self, roots: &[&str]) -> Vec<Arc<RwLock<()>>> {
        let mut names: Vec<&str> = roots.to_vec();
        names.sort_unstable();
        names.dedup();
        names.into_iter().map(|name| self.get_lock(name)).collect()
    }

    /// Number of root names that have ever been locked.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
