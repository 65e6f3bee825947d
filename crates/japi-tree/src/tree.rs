//! Tree (arena-based allocation)

use crate::operations::{TreeError, TreeResult};
use crate::traversal::{Ancestors, Children, Descendants};
use crate::{Node, NodeId, TreeNode};

/// Arena owning every node of one or more trees.
///
/// Freshly created nodes are detached roots; they join a tree through
/// [`Tree::append_child`] or [`Tree::replace_child`]. Removing a node leaves
/// it (and its subtree) in the arena as an orphaned tree of its own.
#[derive(Debug)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<T: TreeNode> Tree<T> {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a detached node
    pub fn create(&mut self, data: T) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    /// Get a node by ID, failing if the handle is not part of this arena
    pub fn node(&self, id: NodeId) -> TreeResult<&Node<T>> {
        self.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut Node<T>> {
        self.nodes
            .get_mut(id.index())
            .ok_or(TreeError::NodeNotFound(id))
    }

    /// Payload of a node
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(Node::data)
    }

    /// Mutable payload of a node. Callers must not change the payload's kind.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.data)
    }

    /// Kind of a node
    pub fn kind(&self, id: NodeId) -> Option<T::Kind> {
        self.get(id).map(Node::kind)
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root of the tree containing `id`, found by walking parents
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Is `ancestor` a strict ancestor of `id`?
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Direct children in order
    pub fn children(&self, parent: NodeId) -> Children<'_, T> {
        Children::new(self, parent)
    }

    /// Snapshot of the direct children, safe to hold across mutations
    pub fn child_ids(&self, parent: NodeId) -> Vec<NodeId> {
        self.children(parent).map(|(id, _)| id).collect()
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).count()
    }

    /// Pre-order traversal of everything below `id`, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, T> {
        Descendants::new(self, id, false)
    }

    /// Pre-order traversal of `id` followed by everything below it
    pub fn subtree(&self, id: NodeId) -> Descendants<'_, T> {
        Descendants::new(self, id, true)
    }

    /// Strict ancestors, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors::new(self, id)
    }

    /// First direct child of the given kind
    pub fn find_child(&self, parent: NodeId, kind: T::Kind) -> Option<NodeId> {
        self.find_child_where(parent, kind, |_| true)
    }

    /// First direct child of the given kind accepted by `pred`
    pub fn find_child_where<F>(&self, parent: NodeId, kind: T::Kind, pred: F) -> Option<NodeId>
    where
        F: Fn(&T) -> bool,
    {
        self.children(parent)
            .find(|(_, node)| node.kind() == kind && pred(node.data()))
            .map(|(id, _)| id)
    }

    /// Does `parent` have a direct child of `kind`? Descendants are not searched.
    pub fn contains_kind(&self, parent: NodeId, kind: T::Kind) -> bool {
        self.find_child(parent, kind).is_some()
    }

    /// Like [`Tree::contains_kind`] with a custom equality on the payload
    pub fn contains_kind_where<F>(&self, parent: NodeId, kind: T::Kind, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.find_child_where(parent, kind, pred).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arity;
    use std::fmt;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Branch,
        Leaf,
    }

    impl fmt::Display for Kind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    struct Payload(Kind);

    impl TreeNode for Payload {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            self.0
        }

        fn arity(&self) -> Arity {
            match self.0 {
                Kind::Branch => Arity::Multi,
                Kind::Leaf => Arity::Leaf,
            }
        }
    }

    #[test]
    fn test_create_detached() {
        let mut tree = Tree::new();
        assert!(tree.is_empty());

        let a = tree.create(Payload(Kind::Branch));
        let b = tree.create(Payload(Kind::Leaf));

        assert_eq!(tree.len(), 2);
        assert_ne!(a, b);
        assert_eq!(tree.root_of(b), b);
        assert_eq!(tree.kind(a), Some(Kind::Branch));
    }

    #[test]
    fn test_find_child_by_kind() {
        let mut tree = Tree::new();
        let root = tree.create(Payload(Kind::Branch));
        let branch = tree.create_and_append(root, Payload(Kind::Branch)).unwrap();
        let leaf = tree.create_and_append(root, Payload(Kind::Leaf)).unwrap();

        assert_eq!(tree.find_child(root, Kind::Branch), Some(branch));
        assert_eq!(tree.find_child(root, Kind::Leaf), Some(leaf));
        assert!(tree.contains_kind(root, Kind::Leaf));
        assert!(!tree.contains_kind(branch, Kind::Leaf));
    }

    #[test]
    fn test_missing_node() {
        let tree: Tree<Payload> = Tree::new();
        assert!(tree.get(NodeId(7)).is_none());
        assert!(matches!(tree.node(NodeId(7)), Err(TreeError::NodeNotFound(_))));
        assert_eq!(tree.children(NodeId(7)).count(), 0);
    }
}
