//! Dirtree: Hierarchical Directory Tree Service
//!
//! An in-memory or sled-backed tree of named directories addressed by
//! slash-separated paths. Supports create (with missing parents), move,
//! recursive delete and a deterministic indented listing.

pub mod cli;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod script;
pub mod service;
pub mod store;
pub mod tree;
pub mod types;

pub use error::{StorageError, TreeError};
pub use service::{DirectoryTreeService, ServiceResponse};
pub use types::{DirectoryNode, NodeId};
