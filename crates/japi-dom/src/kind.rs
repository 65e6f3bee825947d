//! DOM node kinds

use std::fmt;

use japi_tree::Arity;

/// Closed set of node kinds making up a document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomNodeKind {
    Document,
    Data,
    DataCollection,
    Resource,
    ResourceIdentifier,
    Type,
    Id,
    Attributes,
    Attribute,
    Relationships,
    Relationship,
    Links,
    Link,
    Href,
    Meta,
    JsonApiVersion,
    Included,
    Errors,
    Error,
    Index,
}

impl DomNodeKind {
    pub const ALL: [DomNodeKind; 20] = [
        DomNodeKind::Document,
        DomNodeKind::Data,
        DomNodeKind::DataCollection,
        DomNodeKind::Resource,
        DomNodeKind::ResourceIdentifier,
        DomNodeKind::Type,
        DomNodeKind::Id,
        DomNodeKind::Attributes,
        DomNodeKind::Attribute,
        DomNodeKind::Relationships,
        DomNodeKind::Relationship,
        DomNodeKind::Links,
        DomNodeKind::Link,
        DomNodeKind::Href,
        DomNodeKind::Meta,
        DomNodeKind::JsonApiVersion,
        DomNodeKind::Included,
        DomNodeKind::Errors,
        DomNodeKind::Error,
        DomNodeKind::Index,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DomNodeKind::Document => "Document",
            DomNodeKind::Data => "Data",
            DomNodeKind::DataCollection => "DataCollection",
            DomNodeKind::Resource => "Resource",
            DomNodeKind::ResourceIdentifier => "ResourceIdentifier",
            DomNodeKind::Type => "Type",
            DomNodeKind::Id => "Id",
            DomNodeKind::Attributes => "Attributes",
            DomNodeKind::Attribute => "Attribute",
            DomNodeKind::Relationships => "Relationships",
            DomNodeKind::Relationship => "Relationship",
            DomNodeKind::Links => "Links",
            DomNodeKind::Link => "Link",
            DomNodeKind::Href => "Href",
            DomNodeKind::Meta => "Meta",
            DomNodeKind::JsonApiVersion => "JsonApiVersion",
            DomNodeKind::Included => "Included",
            DomNodeKind::Errors => "Errors",
            DomNodeKind::Error => "Error",
            DomNodeKind::Index => "Index",
        }
    }

    /// Child capacity of nodes of this kind
    pub fn arity(self) -> Arity {
        match self {
            DomNodeKind::Data => Arity::Single,
            DomNodeKind::Type
            | DomNodeKind::Id
            | DomNodeKind::Attribute
            | DomNodeKind::Href
            | DomNodeKind::Meta
            | DomNodeKind::JsonApiVersion
            | DomNodeKind::Index => Arity::Leaf,
            _ => Arity::Multi,
        }
    }

    /// Resource or ResourceIdentifier
    #[inline]
    pub fn is_resource_like(self) -> bool {
        matches!(self, DomNodeKind::Resource | DomNodeKind::ResourceIdentifier)
    }

    /// Data or DataCollection
    #[inline]
    pub fn is_data(self) -> bool {
        matches!(self, DomNodeKind::Data | DomNodeKind::DataCollection)
    }
}

impl fmt::Display for DomNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
