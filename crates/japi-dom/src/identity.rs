//! Resource-identity enumeration
//!
//! A lazy walk over the primary data (and optionally the included
//! resources) yielding the type/id pair of every Resource or
//! ResourceIdentifier node in document order. Nothing is collected up
//! front; each call to [`DomDocument::resource_identities`] re-walks the
//! current tree.

use japi_tree::NodeId;

use crate::{DomDocument, DomNodeKind};

/// Which part of the document to enumerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityScope {
    /// Primary data only
    #[default]
    Primary,
    /// Primary data followed by included resources
    PrimaryAndIncluded,
    /// Resource identifiers in the primary data, full resources skipped
    IdentifiersOnly,
}

/// Type and id of one Resource or ResourceIdentifier node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentity<'a> {
    pub node: NodeId,
    pub kind: DomNodeKind,
    pub api_type: &'a str,
    /// `None` for resources created without an id
    pub api_id: Option<&'a str>,
}

/// Iterator returned by [`DomDocument::resource_identities`]
pub struct ResourceIdentities<'a> {
    document: &'a DomDocument,
    scope: IdentityScope,
    /// Nodes whose children are enumerated, in order
    containers: [Option<NodeId>; 2],
    container: usize,
    cursor: Option<NodeId>,
}

impl<'a> ResourceIdentities<'a> {
    fn new(document: &'a DomDocument, scope: IdentityScope) -> Self {
        let included = match scope {
            IdentityScope::PrimaryAndIncluded => document.child(document.root, DomNodeKind::Included),
            _ => None,
        };
        let mut identities = Self {
            document,
            scope,
            containers: [document.primary_data(), included],
            container: 0,
            cursor: None,
        };
        identities.cursor = identities.first_child_of(0);
        identities
    }

    fn first_child_of(&self, container: usize) -> Option<NodeId> {
        let id = self.containers.get(container).copied().flatten()?;
        self.document.tree.get(id)?.first_child()
    }
}

impl<'a> Iterator for ResourceIdentities<'a> {
    type Item = ResourceIdentity<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(id) = self.cursor else {
                if self.container + 1 >= self.containers.len() {
                    return None;
                }
                self.container += 1;
                self.cursor = self.first_child_of(self.container);
                continue;
            };

            let node = self.document.tree.get(id)?;
            self.cursor = node.next_sibling();

            let kind = node.kind();
            if !kind.is_resource_like()
                || (self.scope == IdentityScope::IdentifiersOnly && kind == DomNodeKind::Resource)
            {
                continue;
            }
            return Some(ResourceIdentity {
                node: id,
                kind,
                api_type: self.document.type_of(id).unwrap_or_default(),
                api_id: self.document.id_of(id).map(|id| id.api_id.as_str()),
            });
        }
    }
}

impl DomDocument {
    /// Enumerate resource identities in document order
    pub fn resource_identities(&self, scope: IdentityScope) -> ResourceIdentities<'_> {
        ResourceIdentities::new(self, scope)
    }
}
