//! Lookups across the tree: resources by identity, relationship targets,
//! JSON pointers

use japi_tree::NodeId;

use crate::{DomDocument, DomError, DomNode, DomNodeKind, DomResult, IdentityScope};

/// Escape one JSON pointer reference token
fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

impl DomDocument {
    /// Resource node with the given type and id among the primary and included resources
    pub fn find_resource(&self, api_type: &str, api_id: &str) -> Option<NodeId> {
        self.resource_identities(IdentityScope::PrimaryAndIncluded)
            .find(|identity| {
                identity.kind == DomNodeKind::Resource
                    && identity.api_type == api_type
                    && identity.api_id == Some(api_id)
            })
            .map(|identity| identity.node)
    }

    /// Resource nodes a relationship of `resource` points at.
    ///
    /// Linkage entries with no matching resource in the document are skipped.
    pub fn related(&self, resource: NodeId, rel: &str) -> DomResult<Vec<NodeId>> {
        self.expect_kind(resource, DomNodeKind::Resource)?;
        let relationship = self
            .child(resource, DomNodeKind::Relationships)
            .and_then(|relationships| {
                self.tree.find_child_where(relationships, DomNodeKind::Relationship, |n| {
                    n.member_name() == Some(rel)
                })
            })
            .ok_or_else(|| DomError::MissingChild {
                parent: self.display_name(resource),
                child: DomNodeKind::Relationship,
            })?;

        let Some(linkage) = self
            .child(relationship, DomNodeKind::Data)
            .or_else(|| self.child(relationship, DomNodeKind::DataCollection))
        else {
            return Ok(Vec::new());
        };

        Ok(self
            .tree
            .children(linkage)
            .filter_map(|(id, _)| {
                let api_type = self.type_of(id)?;
                let api_id = &self.id_of(id)?.api_id;
                self.find_resource(api_type, api_id)
            })
            .collect())
    }

    /// JSON pointer to the wire member a node stands for, e.g.
    /// `/data/0/relationships/author`. The Document node maps to `""`.
    pub fn pointer(&self, node: NodeId) -> DomResult<String> {
        self.tree.node(node)?;
        if self.tree.root_of(node) != self.root {
            return Err(DomError::NotInDocument(self.display_name(node)));
        }

        let mut segments = Vec::new();
        let mut current = node;
        while current != self.root {
            let entry = self.tree.node(current)?;
            let parent = entry
                .parent()
                .ok_or_else(|| DomError::NotInDocument(self.display_name(current)))?;

            match entry.data() {
                DomNode::Resource | DomNode::ResourceIdentifier | DomNode::Error(_) => {
                    let parent_kind = self.kind(parent)?;
                    if matches!(
                        parent_kind,
                        DomNodeKind::DataCollection | DomNodeKind::Included | DomNodeKind::Errors
                    ) {
                        segments.push(self.position_of(current, parent).to_string());
                    }
                }
                DomNode::Data | DomNode::DataCollection => segments.push("data".to_string()),
                DomNode::Type(_) => segments.push("type".to_string()),
                DomNode::Id(_) => segments.push("id".to_string()),
                DomNode::Attributes => segments.push("attributes".to_string()),
                DomNode::Attribute(attribute) => segments.push(escape_token(&attribute.api_name)),
                DomNode::Relationships => segments.push("relationships".to_string()),
                DomNode::Relationship { rel } | DomNode::Link { rel } => {
                    segments.push(escape_token(rel))
                }
                DomNode::Links => segments.push("links".to_string()),
                DomNode::Href(_) => segments.push("href".to_string()),
                DomNode::Meta(_) => segments.push("meta".to_string()),
                DomNode::JsonApiVersion(_) => segments.push("jsonapi".to_string()),
                DomNode::Included => segments.push("included".to_string()),
                DomNode::Errors => segments.push("errors".to_string()),
                // bookkeeping nodes point at their owner
                DomNode::Index(_) | DomNode::Document => {}
            }
            current = parent;
        }

        segments.reverse();
        Ok(segments.iter().map(|s| format!("/{s}")).collect())
    }

    /// Array position of a collection element: the recorded wire index when
    /// there is one, else the current position among its siblings
    fn position_of(&self, node: NodeId, parent: NodeId) -> usize {
        self.child(node, DomNodeKind::Index)
            .and_then(|index| self.tree.data(index))
            .and_then(DomNode::as_index)
            .unwrap_or_else(|| {
                self.tree
                    .children(parent)
                    .position(|(id, _)| id == node)
                    .unwrap_or_default()
            })
    }
}
