//! Error types for the directory tree.

use crate::script::ScriptError;
use crate::types::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Sibling already named {name:?} under {}", parent_label(.parent))]
    DuplicateSibling {
        parent: Option<NodeId>,
        name: String,
    },

    #[error("Corrupt store: {0}")]
    Corrupt(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

fn parent_label(parent: &Option<NodeId>) -> String {
    match parent {
        Some(id) => id.to_string(),
        None => "root".to_string(),
    }
}

/// Tree operation errors
///
/// Path misses are not errors; resolution returns `Ok(None)` for those.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Directory already exists with path: {0}")]
    AlreadyExists(String),

    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("Cannot move {source_path} into its own subtree {target_path}")]
    MoveIntoDescendant {
        source_path: String,
        target_path: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

/// Errors surfaced by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    /// The service refused the request; `status` is its HTTP-style code.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("Failed to read {}: {}", .path.display(), .error)]
    Input {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::Tree(TreeError::StorageError(err))
    }
}

impl From<config::ConfigError> for TreeError {
    fn from(err: config::ConfigError) -> Self {
        TreeError::ConfigError(err.to_string())
    }
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        match err {
            sled::Error::Io(e) => StorageError::IoError(e),
            sled::Error::Corruption { .. } => StorageError::Corrupt(err.to_string()),
            other => StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("sled: {}", other),
            )),
        }
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Corrupt(format!("Failed to decode record: {}", err))
    }
}
