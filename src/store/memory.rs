//! In-memory arena store.

use crate::error::StorageError;
use crate::store::NodeStore;
use crate::types::{DirectoryNode, NodeId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

type SiblingKey = (Option<NodeId>, String);

#[derive(Debug, Default)]
struct Arena {
    nodes: HashMap<NodeId, DirectoryNode>,
    /// (parent, name) -> id. Ordered so a parent's children form one contiguous range.
    siblings: BTreeMap<SiblingKey, NodeId>,
    last_id: u64,
}

impl Arena {
    fn children_range(&self, parent: Option<NodeId>) -> Vec<DirectoryNode> {
        let start: SiblingKey = (parent, String::new());
        let end: SiblingKey = match parent {
            Some(id) => (Some(NodeId(id.0 + 1)), String::new()),
            // Real ids start at 1, so Some(0) sorts after every root-level key.
            None => (Some(NodeId(0)), String::new()),
        };
        self.siblings
            .range(start..end)
            .filter_map(|(_, id)| self.nodes.get(id).cloned())
            .collect()
    }

    fn lookup(&self, parent: Option<NodeId>, name: &str) -> Option<DirectoryNode> {
        self.siblings
            .get(&(parent, name.to_string()))
            .and_then(|id| self.nodes.get(id))
            .cloned()
    }
}

/// Arena of nodes keyed by id, each holding only its parent's id.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    arena: RwLock<Arena>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NodeStore for MemoryNodeStore {
    fn get(&self, id: NodeId) -> Result<Option<DirectoryNode>, StorageError> {
        Ok(self.arena.read().nodes.get(&id).cloned())
    }

    fn find_root_by_name(&self, name: &str) -> Result<Option<DirectoryNode>, StorageError> {
        Ok(self.arena.read().lookup(None, name))
    }

    fn find_child_by_name(
        &self,
        parent: NodeId,
        name: &str,
    ) -> Result<Option<DirectoryNode>, StorageError> {
        Ok(self.arena.read().lookup(Some(parent), name))
    }

    fn list_root_nodes(&self) -> Result<Vec<DirectoryNode>, StorageError> {
        Ok(self.arena.read().children_range(None))
    }

    fn list_children(&self, parent: NodeId) -> Result<Vec<DirectoryNode>, StorageError> {
        Ok(self.arena.read().children_range(Some(parent)))
    }

    fn insert(&self, name: &str, parent: Option<NodeId>) -> Result<DirectoryNode, StorageError> {
        let mut arena = self.arena.write();
        if let Some(parent_id) = parent {
            if !arena.nodes.contains_key(&parent_id) {
                return Err(StorageError::NodeNotFound(parent_id));
            }
        }
        let key = (parent, name.to_string());
        if arena.siblings.contains_key(&key) {
            return Err(StorageError::DuplicateSibling {
                parent,
                name: name.to_string(),
            });
        }

        arena.last_id += 1;
        let node = DirectoryNode::new(NodeId(arena.last_id), name, parent);
        arena.siblings.insert(key, node.id);
        arena.nodes.insert(node.id, node.clone());
        Ok(node)
    }

    fn reparent(
        &self,
        id: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<DirectoryNode, StorageError> {
        let mut arena = self.arena.write();
        let node = arena
            .nodes
            .get(&id)
            .cloned()
            .ok_or(StorageError::NodeNotFound(id))?;
        if let Some(parent_id) = new_parent {
            if !arena.nodes.contains_key(&parent_id) {
                return Err(StorageError::NodeNotFound(parent_id));
            }
        }
        if node.parent == new_parent {
            return Ok(node);
        }

        let new_key = (new_parent, node.name.clone());
        if arena.siblings.contains_key(&new_key) {
            return Err(StorageError::DuplicateSibling {
                parent: new_parent,
                name: node.name,
            });
        }

        arena.siblings.remove(&(node.parent, node.name.clone()));
        arena.siblings.insert(new_key, id);
        let moved = DirectoryNode {
            parent: new_parent,
            ..node
        };
        arena.nodes.insert(id, moved.clone());
        Ok(moved)
    }

    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError> {
        let mut arena = self.arena.write();
        if !arena.nodes.contains_key(&id) {
            return Err(StorageError::NodeNotFound(id));
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            stack.extend(arena.children_range(Some(current)).into_iter().map(|c| c.id));
            if let Some(node) = arena.nodes.remove(&current) {
                arena.siblings.remove(&(node.parent, node.name));
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn list_all(&self) -> Result<Vec<DirectoryNode>, StorageError> {
        let mut nodes: Vec<DirectoryNode> = self.arena.read().nodes.values().cloned().collect();
        nodes.sort_by_key(|n| n.id);
        Ok(nodes)
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.arena.read().nodes.len())
    }
}
