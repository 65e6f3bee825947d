//! Tree Operations
//!
//! Structural mutation: append, remove, replace, get-or-create.
//! Every failure here is a caller bug (double attach, wrong parent, ...),
//! reported as an error and never silently corrected.

use thiserror::Error;

use crate::{Arity, NodeId, Tree, TreeNode};

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} does not exist in this tree")]
    NodeNotFound(NodeId),

    #[error("{child} is already attached to {parent}")]
    AlreadyAttached { child: String, parent: String },

    #[error("{child} is not a child of {parent}")]
    NotAChild { child: String, parent: String },

    #[error("{parent} cannot own children")]
    NotAContainer { parent: String },

    #[error("{parent} already owns its single child")]
    ContainerFull { parent: String },

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { child: String, parent: String },

    #[error("{node} already has attribute '{name}'")]
    AttributeExists { node: String, name: String },

    #[error("{node} has no attribute '{name}'")]
    AttributeMissing { node: String, name: String },

    #[error("attribute '{name}' on {node} is not a {expected}")]
    AttributeType {
        node: String,
        name: String,
        expected: &'static str,
    },
}

impl<T: TreeNode> Tree<T> {
    fn display_name(&self, id: NodeId) -> String {
        self.get(id)
            .map(|n| n.name().into_owned())
            .unwrap_or_else(|| id.to_string())
    }

    /// Checks shared by append and replace: `child` must be a detached root
    /// that does not contain `parent`.
    fn check_attachable(&self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let node = self.node(child)?;
        if let Some(owner) = node.parent {
            return Err(TreeError::AlreadyAttached {
                child: self.display_name(child),
                parent: self.display_name(owner),
            });
        }
        if parent == child || self.root_of(parent) == child {
            return Err(TreeError::Cycle {
                child: self.display_name(child),
                parent: self.display_name(parent),
            });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let parent_node = self.node(parent)?;
        match parent_node.arity() {
            Arity::Leaf => {
                return Err(TreeError::NotAContainer {
                    parent: self.display_name(parent),
                });
            }
            Arity::Single if parent_node.first_child.is_some() => {
                return Err(TreeError::ContainerFull {
                    parent: self.display_name(parent),
                });
            }
            _ => {}
        }
        self.check_attachable(parent, child)?;

        let last = self.node(parent)?.last_child;
        {
            let node = self.node_mut(child)?;
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }
        match last {
            Some(last) => self.node_mut(last)?.next_sibling = Some(child),
            None => self.node_mut(parent)?.first_child = Some(child),
        }
        self.node_mut(parent)?.last_child = Some(child);

        tracing::trace!(
            "append {} {} -> {} {}",
            child,
            self.display_name(child),
            parent,
            self.display_name(parent)
        );
        Ok(())
    }

    /// Detach `child` from `parent`. The child becomes the root of its own subtree.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.node(parent)?;
        let node = self.node(child)?;
        if node.parent != Some(parent) {
            return Err(TreeError::NotAChild {
                child: self.display_name(child),
                parent: self.display_name(parent),
            });
        }
        let (prev, next) = (node.prev_sibling, node.next_sibling);

        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = next,
            None => self.node_mut(parent)?.first_child = next,
        }
        match next {
            Some(next) => self.node_mut(next)?.prev_sibling = prev,
            None => self.node_mut(parent)?.last_child = prev,
        }
        let node = self.node_mut(child)?;
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;

        tracing::trace!("remove {} from {}", child, parent);
        Ok(())
    }

    /// Swap `old_child` for `new_child` at the same position.
    ///
    /// Neighbours are relinked in place, so the surrounding siblings keep
    /// their identities and order.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        old_child: NodeId,
        new_child: NodeId,
    ) -> TreeResult<()> {
        self.node(parent)?;
        let old = self.node(old_child)?;
        if old.parent != Some(parent) {
            return Err(TreeError::NotAChild {
                child: self.display_name(old_child),
                parent: self.display_name(parent),
            });
        }
        let (prev, next) = (old.prev_sibling, old.next_sibling);
        self.check_attachable(parent, new_child)?;

        {
            let node = self.node_mut(new_child)?;
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = Some(new_child),
            None => self.node_mut(parent)?.first_child = Some(new_child),
        }
        match next {
            Some(next) => self.node_mut(next)?.prev_sibling = Some(new_child),
            None => self.node_mut(parent)?.last_child = Some(new_child),
        }
        let old = self.node_mut(old_child)?;
        old.parent = None;
        old.prev_sibling = None;
        old.next_sibling = None;

        tracing::trace!("replace {} with {} under {}", old_child, new_child, parent);
        Ok(())
    }

    /// Allocate a node and append it to `parent`
    pub fn create_and_append(&mut self, parent: NodeId, data: T) -> TreeResult<NodeId> {
        let id = self.create(data);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Existing direct child of `kind`, or a new one built by `factory`
    pub fn get_or_create<F>(&mut self, parent: NodeId, kind: T::Kind, factory: F) -> TreeResult<NodeId>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.find_child(parent, kind) {
            return Ok(existing);
        }
        self.create_and_append(parent, factory())
    }
}
