//! Materializer: nodes back to wire-level value objects
//!
//! Nothing is cached. Each call walks the node's current children and
//! assembles a fresh value, so reading while still building always
//! reflects the tree as it is now.

use japi_model::{
    Attributes, Document, ErrorObject, Link, Linkage, Links, Meta, PrimaryData, Relationship,
    Relationships, Resource, ResourceIdentifier,
};
use japi_tree::{NodeId, TreeNode};

use crate::{DomDocument, DomError, DomNode, DomNodeKind, DomResult};

impl DomDocument {
    /// Reconstruct the whole wire document
    pub fn to_wire(&self) -> DomResult<Document> {
        let mut document = Document::default();
        for (id, node) in self.tree.children(self.root) {
            match node.data() {
                DomNode::JsonApiVersion(version) => document.jsonapi = Some(version.clone()),
                DomNode::Meta(meta) => document.meta = Some(meta.clone()),
                DomNode::Links => document.links = Some(self.materialize_links(id)?),
                DomNode::Data | DomNode::DataCollection => {
                    document.data = Some(self.materialize_primary_data(id)?)
                }
                DomNode::Included => document.included = Some(self.materialize_included(id)?),
                DomNode::Errors => document.errors = Some(self.materialize_errors(id)?),
                other => {
                    return Err(DomError::UnexpectedKind {
                        expected: "top-level member",
                        found: other.kind(),
                    });
                }
            }
        }
        Ok(document)
    }

    /// Primary data from a Data or DataCollection node.
    ///
    /// An empty collection comes back as `Identifiers(vec![])`, the same
    /// value an empty `data` array decodes to.
    pub fn materialize_primary_data(&self, node: NodeId) -> DomResult<PrimaryData> {
        match self.kind(node)? {
            DomNodeKind::Data => match self.tree.node(node)?.first_child() {
                None => Ok(PrimaryData::Null),
                Some(child) => match self.kind(child)? {
                    DomNodeKind::Resource => Ok(PrimaryData::Resource(self.materialize_resource(child)?)),
                    DomNodeKind::ResourceIdentifier => Ok(PrimaryData::Identifier(
                        self.materialize_resource_identifier(child)?,
                    )),
                    found => Err(DomError::UnexpectedKind {
                        expected: "Resource or ResourceIdentifier",
                        found,
                    }),
                },
            },
            DomNodeKind::DataCollection => {
                let children = self.tree.child_ids(node);
                match children.first().map(|&id| self.kind(id)).transpose()? {
                    None => Ok(PrimaryData::Identifiers(Vec::new())),
                    Some(DomNodeKind::Resource) => {
                        let resources: Vec<Resource> = children
                            .iter()
                            .map(|&id| self.collection_member(id, DomNodeKind::Resource))
                            .map(|id| id.and_then(|id| self.materialize_resource(id)))
                            .collect::<DomResult<_>>()?;
                        Ok(PrimaryData::Resources(resources))
                    }
                    Some(DomNodeKind::ResourceIdentifier) => {
                        Ok(PrimaryData::Identifiers(self.materialize_identifiers(node)?))
                    }
                    Some(found) => Err(DomError::UnexpectedKind {
                        expected: "Resource or ResourceIdentifier",
                        found,
                    }),
                }
            }
            found => Err(DomError::UnexpectedKind {
                expected: "Data or DataCollection",
                found,
            }),
        }
    }

    /// Check a collection element against the kind of its first sibling
    fn collection_member(&self, id: NodeId, expected: DomNodeKind) -> DomResult<NodeId> {
        let found = self.kind(id)?;
        if found != expected {
            return Err(DomError::HeterogeneousCollection {
                existing: expected,
                child: found,
            });
        }
        Ok(id)
    }

    fn materialize_identifiers(&self, collection: NodeId) -> DomResult<Vec<ResourceIdentifier>> {
        self.tree
            .child_ids(collection)
            .into_iter()
            .map(|id| {
                self.collection_member(id, DomNodeKind::ResourceIdentifier)
                    .and_then(|id| self.materialize_resource_identifier(id))
            })
            .collect()
    }

    pub fn materialize_resource(&self, node: NodeId) -> DomResult<Resource> {
        self.expect_kind(node, DomNodeKind::Resource)?;
        self.require_child(node, DomNodeKind::Type)?;
        let mut resource = Resource::default();

        for (child, entry) in self.tree.children(node) {
            match entry.data() {
                DomNode::Type(api_type) => resource.api_type = api_type.clone(),
                DomNode::Id(id) => resource.id = Some(id.api_id.clone()),
                DomNode::Attributes => resource.attributes = Some(self.materialize_attributes(child)?),
                DomNode::Relationships => {
                    resource.relationships = Some(self.materialize_relationships(child)?)
                }
                DomNode::Links => resource.links = Some(self.materialize_links(child)?),
                DomNode::Meta(meta) => resource.meta = Some(meta.clone()),
                DomNode::Index(_) => {}
                other => {
                    return Err(DomError::UnexpectedKind {
                        expected: "resource member",
                        found: other.kind(),
                    });
                }
            }
        }
        Ok(resource)
    }

    pub fn materialize_resource_identifier(&self, node: NodeId) -> DomResult<ResourceIdentifier> {
        self.expect_kind(node, DomNodeKind::ResourceIdentifier)?;
        let api_type = self
            .require_child(node, DomNodeKind::Type)?
            .as_type()
            .unwrap_or_default();
        let api_id = self
            .require_child(node, DomNodeKind::Id)?
            .as_id()
            .map(|id| id.api_id.as_str())
            .unwrap_or_default();

        let mut identifier = ResourceIdentifier::new(api_type, api_id);
        if let Some(meta) = self.child(node, DomNodeKind::Meta) {
            identifier.meta = Some(self.materialize_meta(meta)?);
        }
        Ok(identifier)
    }

    pub fn materialize_attributes(&self, node: NodeId) -> DomResult<Attributes> {
        self.expect_kind(node, DomNodeKind::Attributes)?;
        Ok(self
            .tree
            .children(node)
            .filter_map(|(_, entry)| entry.data().as_attribute())
            .map(|attribute| (attribute.api_name.clone(), attribute.value.clone()))
            .collect())
    }

    pub fn materialize_relationships(&self, node: NodeId) -> DomResult<Relationships> {
        self.expect_kind(node, DomNodeKind::Relationships)?;
        let mut relationships = Relationships::new();
        for (child, entry) in self.tree.children(node) {
            if let DomNode::Relationship { rel } = entry.data() {
                relationships.insert(rel.clone(), self.materialize_relationship(child)?);
            }
        }
        Ok(relationships)
    }

    pub fn materialize_relationship(&self, node: NodeId) -> DomResult<Relationship> {
        self.expect_kind(node, DomNodeKind::Relationship)?;
        let mut relationship = Relationship::default();

        for (child, entry) in self.tree.children(node) {
            match entry.data() {
                DomNode::Links => relationship.links = Some(self.materialize_links(child)?),
                DomNode::Meta(meta) => relationship.meta = Some(meta.clone()),
                DomNode::Data => {
                    let linkage = match entry.first_child() {
                        None => Linkage::Null,
                        Some(identifier) => {
                            Linkage::ToOne(self.materialize_resource_identifier(identifier)?)
                        }
                    };
                    relationship.data = Some(linkage);
                }
                DomNode::DataCollection => {
                    relationship.data = Some(Linkage::ToMany(self.materialize_identifiers(child)?));
                }
                other => {
                    return Err(DomError::UnexpectedKind {
                        expected: "relationship member",
                        found: other.kind(),
                    });
                }
            }
        }
        Ok(relationship)
    }

    pub fn materialize_links(&self, node: NodeId) -> DomResult<Links> {
        self.expect_kind(node, DomNodeKind::Links)?;
        let mut links = Links::new();
        for (child, entry) in self.tree.children(node) {
            if let DomNode::Link { rel } = entry.data() {
                links.insert(rel.clone(), self.materialize_link(child)?);
            }
        }
        Ok(links)
    }

    pub fn materialize_link(&self, node: NodeId) -> DomResult<Link> {
        self.expect_kind(node, DomNodeKind::Link)?;
        let mut link = Link::default();
        for (_, entry) in self.tree.children(node) {
            match entry.data() {
                DomNode::Href(href) => link.href = Some(href.clone()),
                DomNode::Meta(meta) => link.meta = Some(meta.clone()),
                _ => {}
            }
        }
        Ok(link)
    }

    pub fn materialize_meta(&self, node: NodeId) -> DomResult<Meta> {
        match self.payload(node)? {
            DomNode::Meta(meta) => Ok(meta.clone()),
            other => Err(DomError::UnexpectedKind {
                expected: DomNodeKind::Meta.as_str(),
                found: other.kind(),
            }),
        }
    }

    pub fn materialize_included(&self, node: NodeId) -> DomResult<Vec<Resource>> {
        self.expect_kind(node, DomNodeKind::Included)?;
        self.tree
            .child_ids(node)
            .into_iter()
            .map(|id| self.materialize_resource(id))
            .collect()
    }

    pub fn materialize_errors(&self, node: NodeId) -> DomResult<Vec<ErrorObject>> {
        self.expect_kind(node, DomNodeKind::Errors)?;
        Ok(self
            .tree
            .children(node)
            .filter_map(|(_, entry)| entry.data().as_error().cloned())
            .collect())
    }

    /// Error objects of an errors document; empty when there is no Errors node
    pub fn errors(&self) -> DomResult<Vec<ErrorObject>> {
        match self.child(self.root, DomNodeKind::Errors) {
            Some(errors) => self.materialize_errors(errors),
            None => Ok(Vec::new()),
        }
    }
}
