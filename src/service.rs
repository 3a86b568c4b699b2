//! Directory Tree Service
//!
//! Single entry point for transports. Delegates to the resolver, mutation engine
//! and renderer, serializes mutations per top-level directory, and translates
//! every outcome into a [`ServiceResponse`].

use crate::concurrency::RootLockManager;
use crate::error::TreeError;
use crate::store::{MemoryNodeStore, NodeStore};
use crate::tree::path;
use crate::tree::{MutationEngine, TreeRenderer, TreeResolver, TreeView};
use crate::types::{DirectoryNode, ROOT_SENTINEL};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// User-facing outcome of a service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum ServiceResponse<T> {
    Success(T),
    /// The requested directory already exists.
    Conflict(String),
    /// A source or target path does not resolve.
    NotFound(String),
    /// The request itself is unusable (bad path, move into own subtree).
    BadInput(String),
    Internal(String),
}

impl<T> ServiceResponse<T> {
    /// HTTP-style status a transport can use for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceResponse::Success(_) => 200,
            ServiceResponse::Conflict(_) => 409,
            ServiceResponse::NotFound(_) | ServiceResponse::BadInput(_) => 400,
            ServiceResponse::Internal(_) => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResponse::Success(_))
    }

    /// Failure message, `None` on success.
    pub fn message(&self) -> Option<&str> {
        match self {
            ServiceResponse::Success(_) => None,
            ServiceResponse::Conflict(m)
            | ServiceResponse::NotFound(m)
            | ServiceResponse::BadInput(m)
            | ServiceResponse::Internal(m) => Some(m),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            ServiceResponse::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ServiceResponse<U> {
        match self {
            ServiceResponse::Success(value) => ServiceResponse::Success(f(value)),
            ServiceResponse::Conflict(m) => ServiceResponse::Conflict(m),
            ServiceResponse::NotFound(m) => ServiceResponse::NotFound(m),
            ServiceResponse::BadInput(m) => ServiceResponse::BadInput(m),
            ServiceResponse::Internal(m) => ServiceResponse::Internal(m),
        }
    }
}

/// Messages shared by every transport.
pub mod messages {
    pub fn created(path: &str) -> String {
        format!("CREATE {}", path)
    }

    pub fn moved(source: &str, target: &str) -> String {
        format!("MOVE {} {}", source, target)
    }

    pub fn deleted(path: &str) -> String {
        format!("DELETE {}", path)
    }

    pub fn move_not_found(source: &str) -> String {
        format!("Cannot move {} - source or target does not exist", source)
    }

    pub fn delete_not_found(path: &str) -> String {
        format!("Cannot delete {} - directory does not exist", path)
    }

    pub fn create_failed(path: &str) -> String {
        format!("Error creating directory with path: {}", path)
    }

    pub fn move_failed(source: &str, target: &str) -> String {
        format!("Error moving directory from {} to {}", source, target)
    }

    pub fn delete_failed(path: &str) -> String {
        format!("Error deleting directory with path: {}", path)
    }

    pub const LIST_FAILED: &str = "Error listing directories";
}

/// Facade over one explicit node store.
pub struct DirectoryTreeService {
    store: Arc<dyn NodeStore>,
    locks: Arc<RootLockManager>,
}

impl DirectoryTreeService {
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self::with_lock_manager(store, Arc::new(RootLockManager::new()))
    }

    /// Share a lock manager between services that wrap the same store.
    pub fn with_lock_manager(store: Arc<dyn NodeStore>, locks: Arc<RootLockManager>) -> Self {
        Self { store, locks }
    }

    /// Service over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryNodeStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn NodeStore> {
        &self.store
    }

    /// Create `path`, including any missing parents.
    pub fn create_directory(&self, path: &str) -> ServiceResponse<DirectoryNode> {
        info!(path, "Creating directory from path");
        let locks = self.locks.ordered_locks(&[path::root_segment(path)]);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.write()).collect();

        match MutationEngine::new(self.store.as_ref()).create_from_path(path) {
            Ok(node) => {
                info!(path, node_id = node.id.get(), "Created directory");
                ServiceResponse::Success(node)
            }
            Err(e @ TreeError::AlreadyExists(_)) => {
                warn!(path, "Directory already exists");
                ServiceResponse::Conflict(e.to_string())
            }
            Err(e @ TreeError::InvalidPath(_)) => {
                warn!(path, "Rejected directory path");
                ServiceResponse::BadInput(e.to_string())
            }
            Err(e) => {
                error!(path, error = %e, "Error creating directory");
                ServiceResponse::Internal(messages::create_failed(path))
            }
        }
    }

    /// Move the directory at `source` under `target`; an empty target means the top level.
    pub fn move_directory(&self, source: &str, target: &str) -> ServiceResponse<DirectoryNode> {
        info!(source_path = source, target_path = target, "Moving directory");
        let destination_root = if target == ROOT_SENTINEL {
            source.rsplit(path::SEPARATOR).next().unwrap_or(source)
        } else {
            path::root_segment(target)
        };
        let locks = self
            .locks
            .ordered_locks(&[path::root_segment(source), destination_root]);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.write()).collect();

        match MutationEngine::new(self.store.as_ref()).move_node(source, target) {
            Ok(Some(node)) => {
                let destination = if target.is_empty() { "root" } else { target };
                info!(source_path = source, target_path = destination, "Moved directory");
                ServiceResponse::Success(node)
            }
            Ok(None) => {
                warn!(
                    source_path = source,
                    target_path = target,
                    "Cannot move - source or target does not exist"
                );
                ServiceResponse::NotFound(messages::move_not_found(source))
            }
            Err(e @ TreeError::AlreadyExists(_)) => {
                warn!(
                    source_path = source,
                    target_path = target,
                    "Move destination already exists"
                );
                ServiceResponse::Conflict(e.to_string())
            }
            Err(e @ TreeError::MoveIntoDescendant { .. }) => {
                warn!(
                    source_path = source,
                    target_path = target,
                    "Rejected move into own subtree"
                );
                ServiceResponse::BadInput(e.to_string())
            }
            Err(e) => {
                error!(
                    source_path = source,
                    target_path = target,
                    error = %e,
                    "Error moving directory"
                );
                ServiceResponse::Internal(messages::move_failed(source, target))
            }
        }
    }

    /// Delete the directory at `path` together with its subtree.
    pub fn delete_directory(&self, path: &str) -> ServiceResponse<()> {
        info!(path, "Deleting directory");
        let locks = self.locks.ordered_locks(&[path::root_segment(path)]);
        let _guards: Vec<_> = locks.iter().map(|lock| lock.write()).collect();

        match MutationEngine::new(self.store.as_ref()).delete(path) {
            Ok(true) => ServiceResponse::Success(()),
            Ok(false) => {
                warn!(path, "Cannot delete - directory does not exist");
                ServiceResponse::NotFound(messages::delete_not_found(path))
            }
            Err(e) => {
                error!(path, error = %e, "Error deleting directory");
                ServiceResponse::Internal(messages::delete_failed(path))
            }
        }
    }

    /// Indented text rendering of the whole forest.
    pub fn list_directories(&self) -> ServiceResponse<String> {
        match TreeRenderer::new(self.store.as_ref()).render() {
            Ok(rendered) => {
                info!(lines = rendered.lines().count(), "Listed directories");
                ServiceResponse::Success(rendered)
            }
            Err(e) => {
                error!(error = %e, "Error listing directories");
                ServiceResponse::Internal(messages::LIST_FAILED.to_string())
            }
        }
    }

    /// Nested view of the whole forest, ordered like [`list_directories`](Self::list_directories).
    pub fn directory_tree(&self) -> ServiceResponse<Vec<TreeView>> {
        match TreeRenderer::new(self.store.as_ref()).tree_view() {
            Ok(views) => ServiceResponse::Success(views),
            Err(e) => {
                error!(error = %e, "Error listing directories");
                ServiceResponse::Internal(messages::LIST_FAILED.to_string())
            }
        }
    }

    /// Every stored directory, ordered by id.
    pub fn all_directories(&self) -> ServiceResponse<Vec<DirectoryNode>> {
        match self.store.list_all() {
            Ok(mut nodes) => {
                nodes.sort_by_key(|node| node.id);
                ServiceResponse::Success(nodes)
            }
            Err(e) => {
                error!(error = %e, "Error listing directories");
                ServiceResponse::Internal(messages::LIST_FAILED.to_string())
            }
        }
    }

    /// Look up a single directory by path.
    pub fn find_directory(&self, path: &str) -> ServiceResponse<DirectoryNode> {
        match TreeResolver::new(self.store.as_ref()).resolve(path) {
            Ok(Some(node)) => ServiceResponse::Success(node),
            Ok(None) => ServiceResponse::NotFound(format!("Directory not found: {}", path)),
            Err(e) => {
                error!(path, error = %e, "Error finding directory");
                ServiceResponse::Internal(format!("Error finding directory with path: {}", path))
            }
        }
    }
}
