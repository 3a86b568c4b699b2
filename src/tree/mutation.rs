//! Mutation Engine: create, move and delete by path.

use crate::error::{StorageError, TreeError};
use crate::store::NodeStore;
use crate::tree::path;
use crate::tree::resolver::TreeResolver;
use crate::types::{DirectoryNode, NodeId, ROOT_SENTINEL};
use tracing::{debug, info};

pub struct MutationEngine<'a> {
    store: &'a dyn NodeStore,
}

impl<'a> MutationEngine<'a> {
    pub fn new(store: &'a dyn NodeStore) -> Self {
        Self { store }
    }

    fn resolver(&self) -> TreeResolver<'a> {
        TreeResolver::new(self.store)
    }

    /// Create the directory at `path`, creating any missing ancestors on the way.
    ///
    /// Fails with `AlreadyExists` only when the final segment already exists.
    /// Ancestors created before a failure are kept.
    pub fn create_from_path(&self, path: &str) -> Result<DirectoryNode, TreeError> {
        let segments = path::creatable_segments(path)?;
        let last = segments.len() - 1;

        let mut parent: Option<NodeId> = None;
        let mut current: Option<DirectoryNode> = None;
        for (index, segment) in segments.into_iter().enumerate() {
            let is_leaf = index == last;
            let node = match self.store.find_by_name(parent, segment)? {
                Some(_) if is_leaf => return Err(TreeError::AlreadyExists(path.to_string())),
                Some(existing) => existing,
                None => match self.store.insert(segment, parent) {
                    Ok(created) => {
                        debug!(path, segment, node_id = created.id.get(), "Created directory");
                        created
                    }
                    Err(StorageError::DuplicateSibling { .. }) if is_leaf => {
                        return Err(TreeError::AlreadyExists(path.to_string()));
                    }
                    // Another writer created this ancestor first; continue under theirs.
                    Err(StorageError::DuplicateSibling { .. }) => {
                        self.store.find_by_name(parent, segment)?.ok_or_else(|| {
                            StorageError::Corrupt(format!(
                                "Directory {:?} vanished while creating {}",
                                segment, path
                            ))
                        })?
                    }
                    Err(e) => return Err(e.into()),
                },
            };
            parent = Some(node.id);
            current = Some(node);
        }

        current.ok_or_else(|| TreeError::InvalidPath(path.to_string()))
    }

    /// Re-parent the directory at `source_path` under `target_path`.
    ///
    /// An empty target moves the directory to the top level. Returns `None` if
    /// either path does not resolve, leaving the tree unchanged.
    pub fn move_node(
        &self,
        source_path: &str,
        target_path: &str,
    ) -> Result<Option<DirectoryNode>, TreeError> {
        let resolver = self.resolver();
        let Some(source) = resolver.resolve(source_path)? else {
            return Ok(None);
        };

        let target = if target_path == ROOT_SENTINEL {
            None
        } else {
            match resolver.resolve(target_path)? {
                Some(target) => Some(target),
                None => return Ok(None),
            }
        };

        if let Some(target) = &target {
            if target.id == source.id || resolver.ancestors(target)?.contains(&source.id) {
                return Err(TreeError::MoveIntoDescendant {
                    source_path: source_path.to_string(),
                    target_path: target_path.to_string(),
                });
            }
        }

        match self.store.reparent(source.id, target.as_ref().map(|t| t.id)) {
            Ok(moved) => {
                info!(
                    source_path,
                    target_path,
                    node_id = moved.id.get(),
                    "Re-parented directory"
                );
                Ok(Some(moved))
            }
            Err(StorageError::DuplicateSibling { name, .. }) => {
                let clash = if target_path == ROOT_SENTINEL {
                    name
                } else {
                    format!("{}/{}", target_path, name)
                };
                Err(TreeError::AlreadyExists(clash))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the directory at `path` and its whole subtree.
    ///
    /// Returns `false` when nothing resolves at `path`.
    pub fn delete(&self, path: &str) -> Result<bool, TreeError> {
        let Some(node) = self.resolver().resolve(path)? else {
            return Ok(false);
        };
        let removed = self.store.delete_subtree(node.id)?;
        info!(path, removed, "Deleted directory subtree");
        Ok(true)
    }
}
