//! Directory Node Store
//!
//! Keyed storage of directory nodes and their parent links. The parent link is
//! the only stored relationship; children are always answered by a query over
//! the `(parent, name)` index, so the two can never disagree.

pub mod memory;
pub mod persistence;

pub use memory::MemoryNodeStore;
pub use persistence::SledNodeStore;

use crate::error::StorageError;
use crate::types::{DirectoryNode, NodeId};

/// Node store interface
///
/// "Absent" lookups return `Ok(None)`; only genuine storage failures are errors.
/// Listing order is unspecified, callers sort.
pub trait NodeStore: Send + Sync {
    fn get(&self, id: NodeId) -> Result<Option<DirectoryNode>, StorageError>;

    fn find_root_by_name(&self, name: &str) -> Result<Option<DirectoryNode>, StorageError>;

    fn find_child_by_name(
        &self,
        parent: NodeId,
        name: &str,
    ) -> Result<Option<DirectoryNode>, StorageError>;

    fn list_root_nodes(&self) -> Result<Vec<DirectoryNode>, StorageError>;

    fn list_children(&self, parent: NodeId) -> Result<Vec<DirectoryNode>, StorageError>;

    /// Insert a new node if no sibling already has `name`.
    ///
    /// Fails with `DuplicateSibling` (storing nothing) when `(parent, name)` is taken,
    /// and with `NodeNotFound` when `parent` does not exist.
    fn insert(&self, name: &str, parent: Option<NodeId>) -> Result<DirectoryNode, StorageError>;

    /// Point `id` at a new parent. The node's own subtree follows it unchanged.
    ///
    /// Fails with `DuplicateSibling` if the destination already holds the name.
    /// Does not check for cycles.
    fn reparent(
        &self,
        id: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<DirectoryNode, StorageError>;

    /// Remove `id` and every descendant. Returns the number of nodes removed.
    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError>;

    fn list_all(&self) -> Result<Vec<DirectoryNode>, StorageError>;

    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    /// Lookup under `parent`, or at the root level when `parent` is `None`.
    fn find_by_name(
        &self,
        parent: Option<NodeId>,
        name: &str,
    ) -> Result<Option<DirectoryNode>, StorageError> {
        match parent {
            Some(parent) => self.find_child_by_name(parent, name),
            None => self.find_root_by_name(name),
        }
    }

    /// Children of `parent`, or the root-level nodes when `parent` is `None`.
    fn list_under(&self, parent: Option<NodeId>) -> Result<Vec<DirectoryNode>, StorageError> {
        match parent {
            Some(parent) => self.list_children(parent),
            None => self.list_root_nodes(),
        }
    }
}

/// Collect `root` and all of its descendants, parents before children.
pub(crate) fn collect_subtree(
    store: &dyn NodeStore,
    root: NodeId,
) -> Result<Vec<NodeId>, StorageError> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        out.push(id);
        for child in store.list_children(id)? {
            stack.push(child.id);
        }
    }
    Ok(out)
}
