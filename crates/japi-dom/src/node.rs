//! DOM Node payloads
//!
//! One variant per [`DomNodeKind`]. Structural kinds carry no data; leaf
//! kinds own the value they stand for. Payload-carrying variants are built
//! through the validating factories on [`DomNode`]; the document re-checks
//! every node it attaches with [`DomNode::validate`].

use std::borrow::Cow;

use japi_model::{AttributeBinding, ErrorObject, JsonApiVersion, Meta};
use japi_tree::{Arity, TreeNode};
use serde_json::Value;

use crate::{DomError, DomNodeKind, DomResult};

/// Payload of an Id node
#[derive(Debug, Clone, PartialEq)]
pub struct IdValue {
    /// Id string as it appears on the wire
    pub api_id: String,
    /// The same id converted to the domain id type
    pub domain_id: Value,
    /// Rust type name of the domain id
    pub domain_type: &'static str,
}

/// Payload of an Attribute node
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValue {
    pub api_name: String,
    pub value: Value,
    /// Bound domain property, `None` when the resource type has no binding
    pub property: Option<String>,
    pub complex: bool,
}

impl AttributeValue {
    pub fn is_bound(&self) -> bool {
        self.property.is_some()
    }
}

/// Payload stored in every node of a document tree
#[derive(Debug, Clone, PartialEq)]
pub enum DomNode {
    Document,
    Data,
    DataCollection,
    Resource,
    ResourceIdentifier,
    Type(String),
    Id(IdValue),
    Attributes,
    Attribute(AttributeValue),
    Relationships,
    Relationship { rel: String },
    Links,
    Link { rel: String },
    Href(String),
    Meta(Meta),
    JsonApiVersion(JsonApiVersion),
    Included,
    Errors,
    Error(ErrorObject),
    Index(usize),
}

fn invalid(kind: DomNodeKind, reason: impl Into<String>) -> DomError {
    DomError::InvalidPayload {
        kind,
        reason: reason.into(),
    }
}

impl DomNode {
    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    /// Type node; the API type name must not be empty
    pub fn type_name(api_type: impl Into<String>) -> DomResult<Self> {
        DomNode::Type(api_type.into()).validated()
    }

    /// Id node; needs the wire id, its domain value and the domain id type
    pub fn id(
        api_id: impl Into<String>,
        domain_id: Value,
        domain_type: &'static str,
    ) -> DomResult<Self> {
        DomNode::Id(IdValue {
            api_id: api_id.into(),
            domain_id,
            domain_type,
        })
        .validated()
    }

    /// Attribute node, bound to a domain property when a binding is given
    pub fn attribute(
        api_name: impl Into<String>,
        value: Value,
        binding: Option<&AttributeBinding>,
    ) -> DomResult<Self> {
        DomNode::Attribute(AttributeValue {
            api_name: api_name.into(),
            value,
            property: binding.map(|b| b.property().to_string()),
            complex: binding.is_some_and(AttributeBinding::is_complex),
        })
        .validated()
    }

    pub fn relationship(rel: impl Into<String>) -> DomResult<Self> {
        DomNode::Relationship { rel: rel.into() }.validated()
    }

    pub fn link(rel: impl Into<String>) -> DomResult<Self> {
        DomNode::Link { rel: rel.into() }.validated()
    }

    pub fn href(href: impl Into<String>) -> DomResult<Self> {
        DomNode::Href(href.into()).validated()
    }

    pub fn meta(meta: Meta) -> Self {
        DomNode::Meta(meta)
    }

    pub fn json_api_version(version: JsonApiVersion) -> DomResult<Self> {
        DomNode::JsonApiVersion(version).validated()
    }

    pub fn error(error: ErrorObject) -> Self {
        DomNode::Error(error)
    }

    pub fn index(position: usize) -> Self {
        DomNode::Index(position)
    }

    /// Check the payload against the same rules the factories apply.
    ///
    /// [`DomDocument`](crate::DomDocument) runs this on every node it
    /// attaches, so a variant written out by hand gets no further than one
    /// built through a factory.
    pub fn validate(&self) -> DomResult<()> {
        match self {
            DomNode::Type(api_type) if api_type.is_empty() => {
                Err(invalid(DomNodeKind::Type, "empty api type"))
            }
            DomNode::Id(id) => {
                if id.api_id.is_empty() {
                    return Err(invalid(DomNodeKind::Id, "empty api id"));
                }
                if id.domain_id.is_null() {
                    return Err(invalid(
                        DomNodeKind::Id,
                        format!("id '{}' has no domain value", id.api_id),
                    ));
                }
                if id.domain_type.is_empty() {
                    return Err(invalid(DomNodeKind::Id, "missing domain id type"));
                }
                Ok(())
            }
            DomNode::Attribute(attribute) if attribute.api_name.is_empty() => {
                Err(invalid(DomNodeKind::Attribute, "empty attribute name"))
            }
            DomNode::Relationship { rel } if rel.is_empty() => {
                Err(invalid(DomNodeKind::Relationship, "empty relationship name"))
            }
            DomNode::Link { rel } if rel.is_empty() => {
                Err(invalid(DomNodeKind::Link, "empty link relation"))
            }
            DomNode::Href(href) if href.is_empty() => Err(invalid(DomNodeKind::Href, "empty href")),
            DomNode::JsonApiVersion(version)
                if version.version.as_deref().is_some_and(str::is_empty) =>
            {
                Err(invalid(DomNodeKind::JsonApiVersion, "empty version"))
            }
            _ => Ok(()),
        }
    }

    fn validated(self) -> DomResult<Self> {
        self.validate()?;
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn as_type(&self) -> Option<&str> {
        match self {
            DomNode::Type(api_type) => Some(api_type),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&IdValue> {
        match self {
            DomNode::Id(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeValue> {
        match self {
            DomNode::Attribute(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub fn as_href(&self) -> Option<&str> {
        match self {
            DomNode::Href(href) => Some(href),
            _ => None,
        }
    }

    pub fn as_meta(&self) -> Option<&Meta> {
        match self {
            DomNode::Meta(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorObject> {
        match self {
            DomNode::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            DomNode::Index(position) => Some(*position),
            _ => None,
        }
    }

    /// Name distinguishing siblings of the same kind: relationship and link
    /// relations, attribute names
    pub fn member_name(&self) -> Option<&str> {
        match self {
            DomNode::Relationship { rel } | DomNode::Link { rel } => Some(rel),
            DomNode::Attribute(attribute) => Some(&attribute.api_name),
            _ => None,
        }
    }
}

impl TreeNode for DomNode {
    type Kind = DomNodeKind;

    fn kind(&self) -> DomNodeKind {
        match self {
            DomNode::Document => DomNodeKind::Document,
            DomNode::Data => DomNodeKind::Data,
            DomNode::DataCollection => DomNodeKind::DataCollection,
            DomNode::Resource => DomNodeKind::Resource,
            DomNode::ResourceIdentifier => DomNodeKind::ResourceIdentifier,
            DomNode::Type(_) => DomNodeKind::Type,
            DomNode::Id(_) => DomNodeKind::Id,
            DomNode::Attributes => DomNodeKind::Attributes,
            DomNode::Attribute(_) => DomNodeKind::Attribute,
            DomNode::Relationships => DomNodeKind::Relationships,
            DomNode::Relationship { .. } => DomNodeKind::Relationship,
            DomNode::Links => DomNodeKind::Links,
            DomNode::Link { .. } => DomNodeKind::Link,
            DomNode::Href(_) => DomNodeKind::Href,
            DomNode::Meta(_) => DomNodeKind::Meta,
            DomNode::JsonApiVersion(_) => DomNodeKind::JsonApiVersion,
            DomNode::Included => DomNodeKind::Included,
            DomNode::Errors => DomNodeKind::Errors,
            DomNode::Error(_) => DomNodeKind::Error,
            DomNode::Index(_) => DomNodeKind::Index,
        }
    }

    fn arity(&self) -> Arity {
        self.kind().arity()
    }

    fn name(&self) -> Cow<'_, str> {
        match self {
            DomNode::Type(api_type) => Cow::Owned(format!("Type({api_type})")),
            DomNode::Id(id) => Cow::Owned(format!("Id({})", id.api_id)),
            DomNode::Attribute(attribute) => Cow::Owned(format!("Attribute({})", attribute.api_name)),
            DomNode::Relationship { rel } => Cow::Owned(format!("Relationship({rel})")),
            DomNode::Link { rel } => Cow::Owned(format!("Link({rel})")),
            DomNode::Index(position) => Cow::Owned(format!("Index({position})")),
            _ => Cow::Borrowed(self.kind().as_str()),
        }
    }
}
