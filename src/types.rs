//! Core identifiers and the directory node record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target path meaning "move to the top level" rather than under a named directory.
pub const ROOT_SENTINEL: &str = "";

/// Store-assigned directory identifier
///
/// Allocated monotonically starting at 1 and never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Big-endian key bytes; preserves numeric order under byte comparison.
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        NodeId(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// A directory in the forest.
///
/// Only the parent link is stored; children are always a store query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
}

impl DirectoryNode {
    pub fn new(id: NodeId, name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
        }
    }

    pub fn is_root_level(&self) -> bool {
        self.parent.is_none()
    }
}
