//! Persistence layer for the Node Store

use crate::error::StorageError;
use crate::store::{collect_subtree, NodeStore};
use crate::types::{DirectoryNode, NodeId};
use sled::transaction::{ConflictableTransactionError, TransactionError, TransactionResult};
use sled::Transactional;
use std::path::Path;

const TREE_NODES: &str = "dir_nodes";
const TREE_NAMES: &str = "dir_names";

/// Parent key used for root-level entries in the name index.
const ROOT_PARENT: [u8; 8] = [0u8; 8];

/// Sled-based implementation of NodeStore
///
/// `dir_nodes` maps big-endian id to a bincode record. `dir_names` maps
/// `parent id (8 bytes, 0 for root) ++ name` to the child's id, so a parent's
/// children are one prefix scan.
#[derive(Clone)]
pub struct SledNodeStore {
    db: sled::Db,
    nodes: sled::Tree,
    names: sled::Tree,
}

fn parent_prefix(parent: Option<NodeId>) -> [u8; 8] {
    match parent {
        Some(id) => id.to_be_bytes(),
        None => ROOT_PARENT,
    }
}

fn name_key(parent: Option<NodeId>, name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + name.len());
    key.extend_from_slice(&parent_prefix(parent));
    key.extend_from_slice(name.as_bytes());
    key
}

fn decode_id(bytes: &[u8]) -> Result<NodeId, StorageError> {
    let raw: [u8; 8] = bytes
        .try_into()
        .map_err(|_| StorageError::Corrupt(format!("Bad id length: {}", bytes.len())))?;
    Ok(NodeId::from_be_bytes(raw))
}

fn decode_node(bytes: &[u8]) -> Result<DirectoryNode, StorageError> {
    Ok(bincode::deserialize(bytes)?)
}

fn abort<T>(err: StorageError) -> Result<T, ConflictableTransactionError<StorageError>> {
    Err(ConflictableTransactionError::Abort(err))
}

fn from_tx(err: TransactionError<StorageError>) -> StorageError {
    match err {
        TransactionError::Abort(e) => e,
        TransactionError::Storage(e) => e.into(),
    }
}

impl SledNodeStore {
    /// Open (or create) a store at the given directory
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    /// Wrap an already-open database
    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let nodes = db.open_tree(TREE_NODES)?;
        let names = db.open_tree(TREE_NAMES)?;
        Ok(Self { db, nodes, names })
    }

    /// Temporary store that is removed when dropped
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn lookup(
        &self,
        parent: Option<NodeId>,
        name: &str,
    ) -> Result<Option<DirectoryNode>, StorageError> {
        match self.names.get(name_key(parent, name))? {
            Some(id_bytes) => self.get(decode_id(&id_bytes)?),
            None => Ok(None),
        }
    }

    fn scan(&self, parent: Option<NodeId>) -> Result<Vec<DirectoryNode>, StorageError> {
        let mut out = Vec::new();
        for item in self.names.scan_prefix(parent_prefix(parent)) {
            let (_, id_bytes) = item?;
            // The scan is not a snapshot; a delete can commit between the two reads.
            if let Some(node) = self.get(decode_id(&id_bytes)?)? {
                out.push(node);
            }
        }
        Ok(out)
    }
}

impl NodeStore for SledNodeStore {
    fn get(&self, id: NodeId) -> Result<Option<DirectoryNode>, StorageError> {
        match self.nodes.get(id.to_be_bytes())? {
            Some(value) => Ok(Some(decode_node(&value)?)),
            None => Ok(None),
        }
    }

    fn find_root_by_name(&self, name: &str) -> Result<Option<DirectoryNode>, StorageError> {
        self.lookup(None, name)
    }

    fn find_child_by_name(
        &self,
        parent: NodeId,
        name: &str,
    ) -> Result<Option<DirectoryNode>, StorageError> {
        self.lookup(Some(parent), name)
    }

    fn list_root_nodes(&self) -> Result<Vec<DirectoryNode>, StorageError> {
        self.scan(None)
    }

    fn list_children(&self, parent: NodeId) -> Result<Vec<DirectoryNode>, StorageError> {
        self.scan(Some(parent))
    }

    fn insert(&self, name: &str, parent: Option<NodeId>) -> Result<DirectoryNode, StorageError> {
        // generate_id starts at 0 and survives restarts; shift so 0 stays free for the root key.
        let id = NodeId(self.db.generate_id()? + 1);
        let node = DirectoryNode::new(id, name, parent);
        let encoded = bincode::serialize(&node)?;
        let key = name_key(parent, name);
        let id_bytes = id.to_be_bytes();

        let result: TransactionResult<(), StorageError> =
            (&self.nodes, &self.names).transaction(|(nodes, names)| {
                if let Some(parent_id) = parent {
                    if nodes.get(parent_id.to_be_bytes())?.is_none() {
                        return abort(StorageError::NodeNotFound(parent_id));
                    }
                }
                if names.get(key.as_slice())?.is_some() {
                    return abort(StorageError::DuplicateSibling {
                        parent,
                        name: name.to_string(),
                    });
                }
                nodes.insert(&id_bytes[..], encoded.clone())?;
                names.insert(key.as_slice(), &id_bytes[..])?;
                Ok(())
            });
        result.map_err(from_tx)?;
        Ok(node)
    }

    fn reparent(
        &self,
        id: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<DirectoryNode, StorageError> {
        let id_bytes = id.to_be_bytes();

        let result: TransactionResult<DirectoryNode, StorageError> =
            (&self.nodes, &self.names).transaction(|(nodes, names)| {
                let node = match nodes.get(id_bytes)? {
                    Some(raw) => match decode_node(&raw) {
                        Ok(node) => node,
                        Err(e) => return abort(e),
                    },
                    None => return abort(StorageError::NodeNotFound(id)),
                };
                if let Some(parent_id) = new_parent {
                    if nodes.get(parent_id.to_be_bytes())?.is_none() {
                        return abort(StorageError::NodeNotFound(parent_id));
                    }
                }
                if node.parent == new_parent {
                    return Ok(node);
                }

                let new_key = name_key(new_parent, &node.name);
                if names.get(new_key.as_slice())?.is_some() {
                    return abort(StorageError::DuplicateSibling {
                        parent: new_parent,
                        name: node.name.clone(),
                    });
                }

                let moved = DirectoryNode {
                    parent: new_parent,
                    ..node.clone()
                };
                let encoded = match bincode::serialize(&moved) {
                    Ok(bytes) => bytes,
                    Err(e) => return abort(e.into()),
                };
                names.remove(name_key(node.parent, &node.name))?;
                names.insert(new_key, &id_bytes[..])?;
                nodes.insert(&id_bytes[..], encoded)?;
                Ok(moved)
            });
        result.map_err(from_tx)
    }

    fn delete_subtree(&self, id: NodeId) -> Result<usize, StorageError> {
        if self.get(id)?.is_none() {
            return Err(StorageError::NodeNotFound(id));
        }
        let doomed = collect_subtree(self, id)?;

        let result: TransactionResult<usize, StorageError> =
            (&self.nodes, &self.names).transaction(|(nodes, names)| {
                let mut removed = 0;
                for node_id in &doomed {
                    let Some(raw) = nodes.remove(&node_id.to_be_bytes()[..])? else {
                        continue;
                    };
                    let node = match decode_node(&raw) {
                        Ok(node) => node,
                        Err(e) => return abort(e),
                    };
                    names.remove(name_key(node.parent, &node.name))?;
                    removed += 1;
                }
                Ok(removed)
            });
        result.map_err(from_tx)
    }

    fn list_all(&self) -> Result<Vec<DirectoryNode>, StorageError> {
        let mut records = Vec::new();
        for item in self.nodes.iter() {
            let (_, value) = item?;
            records.push(decode_node(&value)?);
        }
        Ok(records)
    }

    fn len(&self) -> Result<usize, StorageError> {
        Ok(self.nodes.len())
    }
}
