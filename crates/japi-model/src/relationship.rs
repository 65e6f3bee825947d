//! Relationship objects

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::serde_util::deserialize_some;
use crate::{Link, Links, Meta, ResourceIdentifier};

/// Relationships keyed by name
pub type Relationships = BTreeMap<String, Relationship>;

/// Resource linkage carried in a relationship's `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    /// Empty to-one relationship (`null`)
    Null,
    /// To-many relationship (possibly empty array)
    ToMany(Vec<ResourceIdentifier>),
    /// Non-empty to-one relationship
    ToOne(ResourceIdentifier),
}

impl Linkage {
    pub fn is_to_many(&self) -> bool {
        matches!(self, Linkage::ToMany(_))
    }

    /// Identifiers referenced by this linkage, in order
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            Linkage::Null => &[],
            Linkage::ToOne(id) => std::slice::from_ref(id),
            Linkage::ToMany(ids) => ids,
        }
    }
}

/// Relationship object: `links`, `data`, `meta`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Linkage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Relationship {
    pub fn to_one(identifier: ResourceIdentifier) -> Self {
        Self {
            data: Some(Linkage::ToOne(identifier)),
            ..Self::default()
        }
    }

    pub fn to_many(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: Some(Linkage::ToMany(identifiers)),
            ..Self::default()
        }
    }

    /// Empty to-one relationship
    pub fn null() -> Self {
        Self {
            data: Some(Linkage::Null),
            ..Self::default()
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_data_differs_from_missing_data() {
        let null: Relationship = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(null.data, Some(Linkage::Null));

        let missing: Relationship =
            serde_json::from_value(json!({ "links": { "related": "/a/1/author" } })).unwrap();
        assert!(missing.data.is_none());
    }

    #[test]
    fn test_linkage_shapes() {
        let one: Relationship =
            serde_json::from_value(json!({ "data": { "type": "people", "id": "9" } })).unwrap();
        assert_eq!(one.data, Some(Linkage::ToOne(ResourceIdentifier::new("people", "9"))));

        let many: Relationship = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert_eq!(many.data, Some(Linkage::ToMany(vec![])));
        assert!(many.data.unwrap().is_to_many());
    }

    #[test]
    fn test_identifiers_view() {
        let rel = Relationship::to_many(vec![
            ResourceIdentifier::new("comments", "5"),
            ResourceIdentifier::new("comments", "12"),
        ]);
        let ids: Vec<_> = rel.data.as_ref().unwrap().identifiers().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["5", "12"]);
        assert!(Linkage::Null.identifiers().is_empty());
    }
}
