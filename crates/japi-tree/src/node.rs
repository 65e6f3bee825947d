//! Tree Node - structural links plus payload
//!
//! A node only stores handles: its parent, its neighbours inside the parent's
//! child list, and (for containers) the first and last child. The root is
//! never stored; it is recomputed by walking parents.

use std::borrow::Cow;
use std::fmt;

use crate::NodeId;
use crate::attributes::NodeAttribute;

/// How many children a node kind may own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No children at all
    Leaf,
    /// Zero or one child
    Single,
    /// Ordered sequence of zero or more children
    Multi,
}

impl Arity {
    /// Can this node own children?
    #[inline]
    pub fn is_container(self) -> bool {
        !matches!(self, Arity::Leaf)
    }

    /// Maximum number of children, `None` when unbounded
    pub fn capacity(self) -> Option<usize> {
        match self {
            Arity::Leaf => Some(0),
            Arity::Single => Some(1),
            Arity::Multi => None,
        }
    }
}

/// Payload stored in a tree node
pub trait TreeNode {
    /// Closed enumeration of node kinds
    type Kind: Copy + Eq + fmt::Debug + fmt::Display;

    /// Kind tag of this payload
    fn kind(&self) -> Self::Kind;

    /// Child capacity of this payload
    fn arity(&self) -> Arity;

    /// Human readable name used in logs and error messages
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.kind().to_string())
    }
}

/// Tree node - links and payload
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) data: T,
    pub(crate) attributes: Vec<NodeAttribute>,
}

impl<T> Node<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data,
            attributes: Vec::new(),
        }
    }

    /// Owning parent (None if this node is a root)
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    #[inline]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// Payload
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// A node without a parent is the root of its tree
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

impl<T: TreeNode> Node<T> {
    /// Kind tag of the payload
    #[inline]
    pub fn kind(&self) -> T::Kind {
        self.data.kind()
    }

    /// Debug name of the payload
    pub fn name(&self) -> Cow<'_, str> {
        self.data.name()
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.data.arity()
    }
}
