//! Directory Tree
//!
//! Path resolution, structural mutation and rendering over a [`NodeStore`].
//!
//! [`NodeStore`]: crate::store::NodeStore

pub mod mutation;
pub mod path;
pub mod render;
pub mod resolver;

pub use mutation::MutationEngine;
pub use render::{TreeRenderer, TreeView};
pub use resolver::TreeResolver;
