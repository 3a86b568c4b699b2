//! Deterministic rendering of the whole forest
//!
//! Siblings are ordered case-insensitively, with exact-name order breaking
//! ties, so the same tree always renders the same way regardless of storage
//! or insertion order.

use crate::error::StorageError;
use crate::store::NodeStore;
use crate::types::{DirectoryNode, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const INDENT: &str = "  ";

/// Nested, serializable form of a directory and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeView>,
}

/// Case-insensitive name order, falling back to exact order on ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

pub fn sort_siblings(nodes: &mut [DirectoryNode]) {
    nodes.sort_by(|a, b| compare_names(&a.name, &b.name));
}

pub struct TreeRenderer<'a> {
    store: &'a dyn NodeStore,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(store: &'a dyn NodeStore) -> Self {
        Self { store }
    }

    /// Pre-order walk of the forest as `(depth, node)` pairs, siblings sorted.
    ///
    /// Uses an explicit stack so depth is not limited by the call stack.
    pub fn walk(&self) -> Result<Vec<(usize, DirectoryNode)>, StorageError> {
        let mut roots = self.store.list_root_nodes()?;
        sort_siblings(&mut roots);

        let mut out = Vec::new();
        let mut stack: Vec<(usize, DirectoryNode)> =
            roots.into_iter().rev().map(|node| (0, node)).collect();
        while let Some((depth, node)) = stack.pop() {
            let mut children = self.store.list_children(node.id)?;
            sort_siblings(&mut children);
            stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
            out.push((depth, node));
        }
        Ok(out)
    }

    /// One line per directory, indented two spaces per level. Empty forest renders as "".
    pub fn render(&self) -> Result<String, StorageError> {
        let mut out = String::new();
        for (depth, node) in self.walk()? {
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            out.push_str(&node.name);
            out.push('\n');
        }
        Ok(out)
    }

    /// Same ordering as [`render`](Self::render), as nested views.
    pub fn tree_view(&self) -> Result<Vec<TreeView>, StorageError> {
        let mut forest = Vec::new();
        let mut open: Vec<TreeView> = Vec::new();
        for (depth, node) in self.walk()? {
            while open.len() > depth {
                close_view(&mut open, &mut forest);
            }
            open.push(TreeView {
                id: node.id,
                name: node.name,
                children: Vec::new(),
            });
        }
        while !open.is_empty() {
            close_view(&mut open, &mut forest);
        }
        Ok(forest)
    }
}

fn close_view(open: &mut Vec<TreeView>, forest: &mut Vec<TreeView>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => forest.push(done),
        }
    }
}
