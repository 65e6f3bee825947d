//! Domain mapping
//!
//! Resource nodes to domain objects and back, driven by the resource type
//! registered in the service model. Domain objects are produced on demand
//! from the tree rather than stored in it. A member with no node leaves the
//! corresponding domain property at its default.

use std::any::type_name;
use std::sync::Arc;

use japi_model::{DomainObject, ModelError};
use japi_tree::NodeId;

use crate::{DomDocument, DomError, DomNode, DomNodeKind, DomResult, IdentityScope};

impl DomDocument {
    /// Build the domain object for a Resource or ResourceIdentifier node.
    ///
    /// Members are applied in the order meta, id, attributes, relationships,
    /// links. Unbound attributes are skipped.
    pub fn to_domain_object(&self, node: NodeId) -> DomResult<DomainObject> {
        let found = self.kind(node)?;
        if !found.is_resource_like() {
            return Err(DomError::UnexpectedKind {
                expected: "Resource or ResourceIdentifier",
                found,
            });
        }
        let api_type = self
            .require_child(node, DomNodeKind::Type)?
            .as_type()
            .unwrap_or_default();
        let resource_type = self.service_model.resolve(api_type)?;
        let mut object = resource_type.create_blank();

        if let Some(meta) = self.child(node, DomNodeKind::Meta) {
            resource_type.apply_meta(&mut *object, self.materialize_meta(meta)?)?;
        }
        if let Some(id) = self.id_of(node) {
            resource_type.apply_id(&mut *object, &id.domain_id)?;
        }
        if let Some(attributes) = self.child(node, DomNodeKind::Attributes) {
            for (_, entry) in self.tree.children(attributes) {
                let Some(attribute) = entry.data().as_attribute() else {
                    continue;
                };
                if attribute.is_bound() {
                    resource_type.apply_attribute(
                        &mut *object,
                        &attribute.api_name,
                        attribute.value.clone(),
                    )?;
                }
            }
        }
        if let Some(relationships) = self.child(node, DomNodeKind::Relationships) {
            resource_type.apply_relationships(&mut *object, self.materialize_relationships(relationships)?)?;
        }
        if let Some(links) = self.child(node, DomNodeKind::Links) {
            resource_type.apply_links(&mut *object, self.materialize_links(links)?)?;
        }

        tracing::debug!(
            "materialized {} as {}",
            self.display_name(node),
            resource_type.domain_type()
        );
        Ok(object)
    }

    /// Typed variant of [`to_domain_object`](Self::to_domain_object)
    pub fn to_domain<T: 'static>(&self, node: NodeId) -> DomResult<T> {
        let object = self.to_domain_object(node)?;
        match object.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => {
                let api_type = self.type_of(node).unwrap_or_default();
                let expected = self.service_model.resolve(api_type)?.domain_type();
                tracing::debug!("{} requested as {}", api_type, type_name::<T>());
                Err(ModelError::DomainTypeMismatch {
                    api_type: api_type.to_string(),
                    expected,
                }
                .into())
            }
        }
    }

    /// Primary resources whose resource type maps to `T`, in document order
    pub fn primary_domain_resources<T: 'static>(&self) -> DomResult<Vec<T>> {
        let nodes: Vec<NodeId> = self
            .resource_identities(IdentityScope::Primary)
            .filter(|identity| identity.kind == DomNodeKind::Resource)
            .map(|identity| identity.node)
            .collect();
        self.domain_resources(nodes)
    }

    /// Included resources whose resource type maps to `T`, in document order
    pub fn included_domain_resources<T: 'static>(&self) -> DomResult<Vec<T>> {
        let nodes = self
            .child(self.root, DomNodeKind::Included)
            .map(|included| self.tree.child_ids(included))
            .unwrap_or_default();
        self.domain_resources(nodes)
    }

    fn domain_resources<T: 'static>(&self, nodes: Vec<NodeId>) -> DomResult<Vec<T>> {
        let mut objects = Vec::new();
        for node in nodes {
            let Some(api_type) = self.type_of(node) else {
                continue;
            };
            if self.service_model.resolve(api_type)?.is_domain::<T>() {
                objects.push(self.to_domain::<T>(node)?);
            }
        }
        Ok(objects)
    }

    /// Build a Resource subtree from a domain object and attach it under
    /// `parent`. An unset domain id (see `ResourceType::is_unset_id`) leaves
    /// the resource without an Id node.
    pub fn add_domain_resource<T: 'static>(&mut self, parent: NodeId, object: &T) -> DomResult<NodeId> {
        let model = Arc::clone(&self.service_model);
        let resource_type = model.resolve_domain::<T>()?;

        let node = self.create_node(DomNode::Resource);
        self.append(node, DomNode::type_name(resource_type.api_type())?)?;

        let domain_id = resource_type.id_of(object)?;
        if !resource_type.is_unset_id(&domain_id) {
            let api_id = resource_type.domain_id_to_wire_id(&domain_id)?;
            self.append(
                node,
                DomNode::id(api_id, domain_id, resource_type.identity().property_type())?,
            )?;
        }

        let attributes = self.append(node, DomNode::Attributes)?;
        for (binding, value) in resource_type.attributes_of(object)? {
            self.append(
                attributes,
                DomNode::attribute(binding.api_name(), value, Some(binding))?,
            )?;
        }
        if let Some(relationships) = resource_type.relationships_of(object)? {
            let container = self.append(node, DomNode::Relationships)?;
            for (rel, relationship) in &relationships {
                self.build_relationship(container, rel, relationship)?;
            }
        }
        if let Some(links) = resource_type.links_of(object)? {
            self.add_links(node, &links)?;
        }
        if let Some(meta) = resource_type.meta_of(object)? {
            self.add_meta(node, meta)?;
        }

        self.attach(parent, node)?;
        tracing::debug!("added {} resource from domain object", resource_type.api_type());
        Ok(node)
    }
}
