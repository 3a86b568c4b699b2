//! Path-to-node resolution

use crate::error::StorageError;
use crate::store::NodeStore;
use crate::tree::path;
use crate::types::{DirectoryNode, NodeId};
use std::collections::HashSet;
use tracing::debug;

/// Walks a path one segment at a time through the store.
///
/// Single pass, one lookup per segment, no side effects. The first miss ends
/// the walk; there is no backtracking.
pub struct TreeResolver<'a> {
    store: &'a dyn NodeStore,
}

impl<'a> TreeResolver<'a> {
    pub fn new(store: &'a dyn NodeStore) -> Self {
        Self { store }
    }

    /// Resolve `path` to a node, or `None` if any segment is missing.
    pub fn resolve(&self, path: &str) -> Result<Option<DirectoryNode>, StorageError> {
        let mut current: Option<DirectoryNode> = None;
        for segment in path::segments(path) {
            let parent = current.as_ref().map(|node| node.id);
            match self.store.find_by_name(parent, segment)? {
                Some(node) => current = Some(node),
                None => {
                    debug!(path, segment, "Path segment not found");
                    return Ok(None);
                }
            }
        }
        Ok(current)
    }

    /// Ancestor ids of `node`, nearest first.
    ///
    /// A parent chain that revisits a node is reported as corruption.
    pub fn ancestors(&self, node: &DirectoryNode) -> Result<Vec<NodeId>, StorageError> {
        let mut visited = HashSet::from([node.id]);
        let mut out = Vec::new();
        let mut next = node.parent;
        while let Some(id) = next {
            if !visited.insert(id) {
                return Err(StorageError::Corrupt(format!(
                    "Parent chain of {} does not terminate",
                    node.id
                )));
            }
            out.push(id);
            next = self
                .store
                .get(id)?
                .ok_or(StorageError::NodeNotFound(id))?
                .parent;
        }
        Ok(out)
    }

    /// Slash-joined path of `node` from its root.
    pub fn path_of(&self, node: &DirectoryNode) -> Result<String, StorageError> {
        let mut names = vec![node.name.clone()];
        for id in self.ancestors(node)? {
            let ancestor = self.store.get(id)?.ok_or(StorageError::NodeNotFound(id))?;
            names.push(ancestor.name);
        }
        names.reverse();
        Ok(names.join("/"))
    }
}
