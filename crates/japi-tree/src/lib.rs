//! japi tree - arena-backed N-ary tree
//!
//! Every node lives in a single arena owned by [`Tree`]. Parent, root and
//! sibling links are plain [`NodeId`] handles into that arena, so the
//! doubly-linked sibling chains never form owning cycles.
//!
//! Payloads describe themselves through [`TreeNode`]: a kind tag, a debug
//! name and an [`Arity`] that decides whether the node holds no children,
//! at most one child, or an ordered list of children.

mod attributes;
mod node;
mod operations;
mod traversal;
mod tree;

pub use attributes::NodeAttribute;
pub use node::{Arity, Node, TreeNode};
pub use operations::{TreeError, TreeResult};
pub use traversal::{Ancestors, Children, Descendants};
pub use tree::Tree;

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node inside the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
