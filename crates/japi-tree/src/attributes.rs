//! Node Attributes
//!
//! Name/value side-table hung off a node, outside the structural tree.
//! Used for caching derived facts about a node. Setting a name twice or
//! reading a missing name is reported as an error.

use std::any::Any;
use std::fmt;

use crate::operations::{TreeError, TreeResult};
use crate::{NodeId, Tree, TreeNode};

/// Single named attribute
pub struct NodeAttribute {
    name: String,
    value: Box<dyn Any + Send + Sync>,
}

impl NodeAttribute {
    pub fn new<V: Any + Send + Sync>(name: impl Into<String>, value: V) -> Self {
        Self {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Typed view of the value
    pub fn value<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }
}

impl fmt::Debug for NodeAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeAttribute")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: TreeNode> Tree<T> {
    /// Attach a new attribute to a node
    pub fn set_attribute<V: Any + Send + Sync>(
        &mut self,
        id: NodeId,
        name: &str,
        value: V,
    ) -> TreeResult<()> {
        let node = self.node_mut(id)?;
        if node.attributes.iter().any(|a| a.name == name) {
            return Err(TreeError::AttributeExists {
                node: node.name().into_owned(),
                name: name.to_string(),
            });
        }
        node.attributes.push(NodeAttribute::new(name, value));
        Ok(())
    }

    /// Read an attribute that must be present with the requested type
    pub fn attribute<V: Any>(&self, id: NodeId, name: &str) -> TreeResult<&V> {
        let node = self.node(id)?;
        let attr = node
            .attributes
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| TreeError::AttributeMissing {
                node: node.name().into_owned(),
                name: name.to_string(),
            })?;
        attr.value::<V>().ok_or_else(|| TreeError::AttributeType {
            node: node.name().into_owned(),
            name: name.to_string(),
            expected: std::any::type_name::<V>(),
        })
    }

    /// Read an attribute that may be absent
    pub fn try_attribute<V: Any>(&self, id: NodeId, name: &str) -> Option<&V> {
        self.get(id)?
            .attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value::<V>())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get(id)
            .is_some_and(|n| n.attributes.iter().any(|a| a.name == name))
    }

    /// Drop an attribute, returning whether it existed
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Ok(node) = self.node_mut(id) else {
            return false;
        };
        let before = node.attributes.len();
        node.attributes.retain(|a| a.name != name);
        node.attributes.len() != before
    }

    /// Names of all attributes on a node, in insertion order
    pub fn attribute_names(&self, id: NodeId) -> impl Iterator<Item = &str> {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.attributes.iter().map(NodeAttribute::name))
    }
}
