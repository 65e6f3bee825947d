//! Document - root of a DOM tree and its builder API
//!
//! [`DomDocument`] owns the arena, the Document root node and a shared
//! handle to the [`ServiceModel`]. Every structural change is checked
//! against the structural rules first and clears the memoized document
//! type afterwards.

use std::sync::Arc;

use japi_model::{
    Attributes, ErrorObject, JsonApiVersion, Link, Linkage, Links, Meta, ModelError, Relationship,
    Resource, ResourceIdentifier, ResourceType, ServiceModel,
};
use japi_tree::{NodeId, Tree, TreeNode};

use crate::document_type::DOCUMENT_TYPE_ATTRIBUTE;
use crate::node::IdValue;
use crate::{DomConfig, DomError, DomNode, DomNodeKind, DomResult, rules};

/// A document tree under construction or being read
#[derive(Debug)]
pub struct DomDocument {
    pub(crate) tree: Tree<DomNode>,
    pub(crate) root: NodeId,
    pub(crate) service_model: Arc<ServiceModel>,
    pub(crate) config: DomConfig,
}

impl DomDocument {
    /// Empty document with the default configuration
    pub fn new(service_model: Arc<ServiceModel>) -> Self {
        Self::with_config(service_model, DomConfig::default())
    }

    pub fn with_config(service_model: Arc<ServiceModel>, config: DomConfig) -> Self {
        let mut tree = Tree::new();
        let root = tree.create(DomNode::Document);
        Self {
            tree,
            root,
            service_model,
            config,
        }
    }

    /// Read-only view of the underlying tree
    pub fn tree(&self) -> &Tree<DomNode> {
        &self.tree
    }

    /// The Document node
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn service_model(&self) -> &ServiceModel {
        &self.service_model
    }

    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    pub fn kind(&self, node: NodeId) -> DomResult<DomNodeKind> {
        Ok(self.tree.node(node)?.kind())
    }

    pub fn payload(&self, node: NodeId) -> DomResult<&DomNode> {
        Ok(self.tree.node(node)?.data())
    }

    /// First direct child of `parent` with the given kind
    pub fn child(&self, parent: NodeId, kind: DomNodeKind) -> Option<NodeId> {
        self.tree.find_child(parent, kind)
    }

    /// Data or DataCollection under the Document
    pub fn primary_data(&self) -> Option<NodeId> {
        self.child(self.root, DomNodeKind::Data)
            .or_else(|| self.child(self.root, DomNodeKind::DataCollection))
    }

    /// API type of a Resource or ResourceIdentifier node
    pub fn type_of(&self, node: NodeId) -> Option<&str> {
        self.child(node, DomNodeKind::Type)
            .and_then(|id| self.tree.data(id))
            .and_then(DomNode::as_type)
    }

    /// Id payload of a Resource or ResourceIdentifier node
    pub fn id_of(&self, node: NodeId) -> Option<&IdValue> {
        self.child(node, DomNodeKind::Id)
            .and_then(|id| self.tree.data(id))
            .and_then(DomNode::as_id)
    }

    pub(crate) fn display_name(&self, node: NodeId) -> String {
        self.tree
            .get(node)
            .map(|n| n.name().into_owned())
            .unwrap_or_else(|| node.to_string())
    }

    pub(crate) fn expect_kind(&self, node: NodeId, expected: DomNodeKind) -> DomResult<()> {
        let found = self.kind(node)?;
        if found != expected {
            return Err(DomError::UnexpectedKind {
                expected: expected.as_str(),
                found,
            });
        }
        Ok(())
    }

    /// Payload of the first `kind` child of `parent`
    pub(crate) fn require_child(&self, parent: NodeId, kind: DomNodeKind) -> DomResult<&DomNode> {
        self.child(parent, kind)
            .and_then(|id| self.tree.data(id))
            .ok_or_else(|| DomError::MissingChild {
                parent: self.display_name(parent),
                child: kind,
            })
    }

    fn invalidate(&mut self) {
        if self.tree.remove_attribute(self.root, DOCUMENT_TYPE_ATTRIBUTE) {
            tracing::trace!("document type memo cleared");
        }
    }

    // ------------------------------------------------------------------
    // Generic validated mutation
    // ------------------------------------------------------------------

    /// Allocate a detached node. It joins the document through
    /// [`attach`](Self::attach) or [`replace`](Self::replace).
    pub fn create_node(&mut self, node: DomNode) -> NodeId {
        self.tree.create(node)
    }

    /// Attach a detached node (and its subtree) as the last child of `parent`
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        rules::check_attach(&self.tree, parent, child, None, &self.config)?;
        self.tree.append_child(parent, child)?;
        self.invalidate();
        Ok(())
    }

    /// Create a node and attach it under `parent`
    pub fn append(&mut self, parent: NodeId, node: DomNode) -> DomResult<NodeId> {
        let id = self.create_node(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Detach `child` from `parent`; it stays in the arena as an orphan
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_removal(parent, child, None)?;
        self.tree.remove_child(parent, child)?;
        self.invalidate();
        Ok(())
    }

    /// Put the detached node `new_child` where `old_child` is
    pub fn replace(&mut self, parent: NodeId, old_child: NodeId, new_child: NodeId) -> DomResult<()> {
        rules::check_attach(&self.tree, parent, new_child, Some(old_child), &self.config)?;
        self.check_removal(parent, old_child, Some(self.kind(new_child)?))?;
        self.tree.replace_child(parent, old_child, new_child)?;
        self.invalidate();
        Ok(())
    }

    /// A Resource keeps its Type, an identifier its Type and Id, unless a
    /// node of the same kind takes the place
    fn check_removal(
        &self,
        parent: NodeId,
        child: NodeId,
        replacement: Option<DomNodeKind>,
    ) -> DomResult<()> {
        if self.tree.get(child).and_then(|n| n.parent()) != Some(parent) {
            return Ok(());
        }
        let child_kind = self.kind(child)?;
        let parent_kind = self.kind(parent)?;
        if replacement != Some(child_kind) && rules::required_children(parent_kind).contains(&child_kind) {
            return Err(DomError::RequiredChild {
                parent: parent_kind,
                child: child_kind,
            });
        }
        Ok(())
    }

    fn get_or_append(&mut self, parent: NodeId, node: DomNode) -> DomResult<NodeId> {
        match self.child(parent, node.kind()) {
            Some(existing) => Ok(existing),
            None => self.append(parent, node),
        }
    }

    /// Replace the child of the same kind, or append when there is none
    fn set_singleton(&mut self, parent: NodeId, node: DomNode) -> DomResult<NodeId> {
        let existing = self.child(parent, node.kind());
        let id = self.create_node(node);
        match existing {
            Some(old) => self.replace(parent, old, id)?,
            None => self.attach(parent, id)?,
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Top-level members
    // ------------------------------------------------------------------

    pub fn set_json_api_version(&mut self, version: JsonApiVersion) -> DomResult<NodeId> {
        let node = DomNode::json_api_version(version)?;
        self.set_singleton(self.root, node)
    }

    /// Set the document-level meta, replacing any previous one
    pub fn set_meta(&mut self, meta: Meta) -> DomResult<NodeId> {
        self.set_singleton(self.root, DomNode::meta(meta))
    }

    /// Add a Meta node under `parent`; a second Meta is an error
    pub fn add_meta(&mut self, parent: NodeId, meta: Meta) -> DomResult<NodeId> {
        self.append(parent, DomNode::meta(meta))
    }

    pub fn get_or_add_links(&mut self, parent: NodeId) -> DomResult<NodeId> {
        self.get_or_append(parent, DomNode::Links)
    }

    /// Add a named link under a Links node
    pub fn add_link(&mut self, links: NodeId, rel: &str, link: &Link) -> DomResult<NodeId> {
        if link.href.is_none() && link.meta.is_none() {
            return Err(DomError::InvalidPayload {
                kind: DomNodeKind::Link,
                reason: format!("link '{rel}' has neither href nor meta"),
            });
        }
        let node = self.create_node(DomNode::link(rel)?);
        if let Some(href) = &link.href {
            self.append(node, DomNode::href(href.as_str())?)?;
        }
        if let Some(meta) = &link.meta {
            self.add_meta(node, meta.clone())?;
        }
        self.attach(links, node)?;
        Ok(node)
    }

    /// Get or add the Links node under `parent` and add every link to it
    pub fn add_links(&mut self, parent: NodeId, links: &Links) -> DomResult<NodeId> {
        let node = self.get_or_add_links(parent)?;
        for (rel, link) in links {
            self.add_link(node, rel, link)?;
        }
        Ok(node)
    }

    pub fn add_data(&mut self) -> DomResult<NodeId> {
        self.append(self.root, DomNode::Data)
    }

    pub fn add_data_collection(&mut self) -> DomResult<NodeId> {
        self.append(self.root, DomNode::DataCollection)
    }

    pub fn get_or_add_included(&mut self) -> DomResult<NodeId> {
        self.get_or_append(self.root, DomNode::Included)
    }

    pub fn get_or_add_errors(&mut self) -> DomResult<NodeId> {
        self.get_or_append(self.root, DomNode::Errors)
    }

    pub fn add_error(&mut self, error: &ErrorObject) -> DomResult<NodeId> {
        let errors = self.get_or_add_errors()?;
        self.append(errors, DomNode::error(error.clone()))
    }

    /// Add a resource to the Included node
    pub fn add_included(&mut self, resource: &Resource) -> DomResult<NodeId> {
        let included = self.get_or_add_included()?;
        self.add_resource(included, resource)
    }

    // ------------------------------------------------------------------
    // Resources and linkage
    // ------------------------------------------------------------------

    /// Build a Resource subtree from a wire resource and attach it under
    /// `parent` (Data, DataCollection or Included)
    pub fn add_resource(&mut self, parent: NodeId, resource: &Resource) -> DomResult<NodeId> {
        self.build_resource(parent, resource, None)
    }

    pub fn add_resource_identifier(
        &mut self,
        parent: NodeId,
        identifier: &ResourceIdentifier,
    ) -> DomResult<NodeId> {
        self.build_identifier(parent, identifier, None)
    }

    /// Add a named relationship to a Resource node
    pub fn add_relationship(
        &mut self,
        resource: NodeId,
        rel: &str,
        relationship: &Relationship,
    ) -> DomResult<NodeId> {
        self.expect_kind(resource, DomNodeKind::Resource)?;
        let relationships = self.get_or_append(resource, DomNode::Relationships)?;
        self.build_relationship(relationships, rel, relationship)
    }

    /// `index` is the element's position when it comes from a wire array
    pub(crate) fn build_resource(
        &mut self,
        parent: NodeId,
        resource: &Resource,
        index: Option<usize>,
    ) -> DomResult<NodeId> {
        let model = Arc::clone(&self.service_model);
        let resource_type = model.resolve(&resource.api_type)?;

        let node = self.create_node(DomNode::Resource);
        self.append(node, DomNode::type_name(resource.api_type.as_str())?)?;
        if let Some(api_id) = &resource.id {
            self.append(node, id_node(resource_type, api_id)?)?;
        }
        if let Some(index) = index {
            self.append(node, DomNode::index(index))?;
        }
        if let Some(attributes) = &resource.attributes {
            self.add_attributes(node, resource_type, attributes)?;
        }
        if let Some(relationships) = &resource.relationships {
            let container = self.append(node, DomNode::Relationships)?;
            for (rel, relationship) in relationships {
                self.build_relationship(container, rel, relationship)?;
            }
        }
        if let Some(links) = &resource.links {
            self.add_links(node, links)?;
        }
        if let Some(meta) = &resource.meta {
            self.add_meta(node, meta.clone())?;
        }

        self.attach(parent, node)?;
        Ok(node)
    }

    pub(crate) fn build_identifier(
        &mut self,
        parent: NodeId,
        identifier: &ResourceIdentifier,
        index: Option<usize>,
    ) -> DomResult<NodeId> {
        let model = Arc::clone(&self.service_model);
        let resource_type = model.resolve(&identifier.api_type)?;

        let node = self.create_node(DomNode::ResourceIdentifier);
        self.append(node, DomNode::type_name(identifier.api_type.as_str())?)?;
        self.append(node, id_node(resource_type, &identifier.id)?)?;
        if let Some(index) = index {
            self.append(node, DomNode::index(index))?;
        }
        if let Some(meta) = &identifier.meta {
            self.add_meta(node, meta.clone())?;
        }

        self.attach(parent, node)?;
        Ok(node)
    }

    pub(crate) fn build_relationship(
        &mut self,
        relationships: NodeId,
        rel: &str,
        relationship: &Relationship,
    ) -> DomResult<NodeId> {
        let node = self.create_node(DomNode::relationship(rel)?);
        if let Some(links) = &relationship.links {
            self.add_links(node, links)?;
        }
        match &relationship.data {
            None => {}
            Some(Linkage::Null) => {
                self.append(node, DomNode::Data)?;
            }
            Some(Linkage::ToOne(identifier)) => {
                let data = self.append(node, DomNode::Data)?;
                self.build_identifier(data, identifier, None)?;
            }
            Some(Linkage::ToMany(identifiers)) => {
                let collection = self.append(node, DomNode::DataCollection)?;
                for (i, identifier) in identifiers.iter().enumerate() {
                    self.build_identifier(collection, identifier, Some(i))?;
                }
            }
        }
        if let Some(meta) = &relationship.meta {
            self.add_meta(node, meta.clone())?;
        }

        self.attach(relationships, node)?;
        Ok(node)
    }

    fn add_attributes(
        &mut self,
        resource: NodeId,
        resource_type: &ResourceType,
        attributes: &Attributes,
    ) -> DomResult<NodeId> {
        let node = self.append(resource, DomNode::Attributes)?;
        for (name, value) in attributes {
            let binding = resource_type.attribute(name);
            if binding.is_none() {
                if self.config.reject_unknown_attributes {
                    return Err(ModelError::UnknownAttribute {
                        api_type: resource_type.api_type().to_string(),
                        attribute: name.clone(),
                    }
                    .into());
                }
                tracing::warn!(
                    "'{}' has no binding for attribute '{}', keeping it unbound",
                    resource_type.api_type(),
                    name
                );
            }
            self.append(node, DomNode::attribute(name.as_str(), value.clone(), binding)?)?;
        }
        Ok(node)
    }
}

/// Id node for a wire id, converted through the resource type's identity binding
pub(crate) fn id_node(resource_type: &ResourceType, api_id: &str) -> DomResult<DomNode> {
    let domain_id = resource_type.wire_id_to_domain_id(api_id)?;
    DomNode::id(api_id, domain_id, resource_type.identity().property_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Tag {
        id: u32,
        label: String,
    }

    fn dom() -> DomDocument {
        let tags = ResourceType::builder::<Tag>("tags")
            .id("id", |t: &Tag| t.id, |t, id| t.id = id)
            .attribute("label", "label", |t: &Tag| t.label.clone(), |t, v| t.label = v)
            .build()
            .unwrap();
        let model = ServiceModel::builder().resource_type(tags).build().unwrap();
        DomDocument::new(Arc::new(model))
    }

    #[test]
    fn test_new_document_is_bare_root() {
        let dom = dom();
        assert_eq!(dom.kind(dom.root()).unwrap(), DomNodeKind::Document);
        assert_eq!(dom.tree().child_count(dom.root()), 0);
        assert!(dom.primary_data().is_none());
    }

    #[test]
    fn test_set_meta_replaces_in_place() {
        let mut dom = dom();
        let mut first = Meta::new();
        first.insert("page".into(), json!(1));
        let mut second = Meta::new();
        second.insert("page".into(), json!(2));

        let links = dom.get_or_add_links(dom.root()).unwrap();
        dom.set_meta(first).unwrap();
        let data = dom.add_data().unwrap();
        let meta = dom.set_meta(second.clone()).unwrap();

        assert_eq!(dom.tree().child_ids(dom.root()), [links, meta, data]);
        assert_eq!(dom.payload(meta).unwrap().as_meta(), Some(&second));
    }

    #[test]
    fn test_get_or_add_is_idempotent() {
        let mut dom = dom();
        let a = dom.get_or_add_errors().unwrap();
        let b = dom.get_or_add_errors().unwrap();
        assert_eq!(a, b);
        assert_eq!(dom.tree().child_count(dom.root()), 1);
    }

    #[test]
    fn test_link_needs_href_or_meta() {
        let mut dom = dom();
        let links = dom.get_or_add_links(dom.root()).unwrap();
        let err = dom.add_link(links, "self", &Link::default()).unwrap_err();
        assert!(matches!(err, DomError::InvalidPayload { kind: DomNodeKind::Link, .. }));

        dom.add_link(links, "self", &Link::new("/tags")).unwrap();
        let err = dom.add_link(links, "self", &Link::new("/tags?page=2")).unwrap_err();
        assert!(matches!(err, DomError::DuplicateName { ref name, .. } if name == "self"));
    }

    #[test]
    fn test_unknown_type_fails_resolution() {
        let mut dom = dom();
        let data = dom.add_data().unwrap();
        let err = dom.add_resource(data, &Resource::new("people", "1")).unwrap_err();
        assert_eq!(
            err,
            DomError::Model(ModelError::UnknownResourceType("people".into()))
        );
        assert!(dom.tree().child_ids(data).is_empty());
    }

    #[test]
    fn test_resource_subtree_shape() {
        let mut dom = dom();
        let data = dom.add_data().unwrap();
        let resource = dom
            .add_resource(data, &Resource::new("tags", "7").with_attribute("label", "rust"))
            .unwrap();

        let kinds: Vec<_> = dom
            .tree()
            .children(resource)
            .map(|(_, n)| n.kind())
            .collect();
        assert_eq!(kinds, [DomNodeKind::Type, DomNodeKind::Id, DomNodeKind::Attributes]);
        assert_eq!(dom.type_of(resource), Some("tags"));

        let id = dom.id_of(resource).unwrap();
        assert_eq!(id.api_id, "7");
        assert_eq!(id.domain_id, json!(7));
        assert_eq!(id.domain_type, "u32");
    }

    #[test]
    fn test_relationship_needs_resource_parent() {
        let mut dom = dom();
        let err = dom
            .add_relationship(dom.root(), "tags", &Relationship::null())
            .unwrap_err();
        assert!(matches!(err, DomError::UnexpectedKind { found: DomNodeKind::Document, .. }));
    }
}
