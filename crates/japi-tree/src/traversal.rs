//! Traversal
//!
//! Iterators derived from the structural links at the moment they are
//! created. They are finite and restartable: asking the tree again walks the
//! current structure again.

use crate::{Node, NodeId, Tree, TreeNode};

/// Iterator over the direct children of a node
pub struct Children<'a, T> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
}

impl<'a, T: TreeNode> Children<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, parent: NodeId) -> Self {
        let current = tree.get(parent).and_then(|n| n.first_child);
        Self { tree, current }
    }
}

impl<'a, T: TreeNode> Iterator for Children<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.tree.get(id)?;
        self.current = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order depth-first traversal.
///
/// The stack holds one cursor per depth: the next sibling still to be
/// visited at that level. Visiting a node advances its level's cursor and
/// pushes a cursor on its first child.
pub struct Descendants<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Option<NodeId>>,
    /// The bottom cursor is the start node itself; its siblings are not visited
    pinned_start: bool,
}

impl<'a, T: TreeNode> Descendants<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, start: NodeId, include_start: bool) -> Self {
        let stack = match tree.get(start) {
            None => Vec::new(),
            Some(_) if include_start => vec![Some(start)],
            Some(node) => vec![node.first_child],
        };
        Self {
            tree,
            stack,
            pinned_start: include_start,
        }
    }
}

impl<'a, T: TreeNode> Iterator for Descendants<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            let cursor = self.stack.last_mut()?;
            match *cursor {
                Some(id) => {
                    let node = self.tree.get(id)?;
                    *cursor = if self.pinned_start && depth == 1 {
                        None
                    } else {
                        node.next_sibling
                    };
                    self.stack.push(node.first_child);
                    return Some((id, node));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Strict ancestors of a node, nearest first
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
}

impl<'a, T: TreeNode> Ancestors<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, id: NodeId) -> Self {
        let current = tree.get(id).and_then(|n| n.parent);
        Self { tree, current }
    }
}

impl<'a, T: TreeNode> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.get(id).and_then(|n| n.parent);
        Some(id)
    }
}
