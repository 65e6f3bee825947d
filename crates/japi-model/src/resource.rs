//! Resource objects and resource identifiers

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Link, Links, Meta, Relationship, Relationships};

/// Attribute values keyed by API name
pub type Attributes = serde_json::Map<String, Value>;

/// Resource object: `type`, `id`, `attributes`, `relationships`, `links`, `meta`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub api_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Resource {
    pub fn new(api_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            api_type: api_type.into(),
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Resource without an id (client-generated creation requests)
    pub fn without_id(api_type: impl Into<String>) -> Self {
        Self {
            api_type: api_type.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Attributes::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_relationship(mut self, rel: impl Into<String>, relationship: Relationship) -> Self {
        self.relationships
            .get_or_insert_with(Relationships::new)
            .insert(rel.into(), relationship);
        self
    }

    pub fn with_link(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.links
            .get_or_insert_with(Links::new)
            .insert(rel.into(), link);
        self
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Identifier pointing at this resource, if it has an id
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id
            .as_ref()
            .map(|id| ResourceIdentifier::new(self.api_type.clone(), id.clone()))
    }
}

/// Resource identifier object: `type`, `id`, `meta`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub api_type: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ResourceIdentifier {
    pub fn new(api_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            api_type: api_type.into(),
            id: id.into(),
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }
}
