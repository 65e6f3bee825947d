//! Top-level document, `jsonapi` object and error objects

use serde::{Deserialize, Serialize};

use crate::serde_util::deserialize_some;
use crate::{JSON_API_VERSION, Link, Links, Meta, Resource, ResourceIdentifier};

/// Top-level document
///
/// `data` and `errors` are mutually exclusive in a valid document; the value
/// object itself does not enforce it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<JsonApiVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<PrimaryData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorObject>>,
}

impl Document {
    pub fn with_data(data: PrimaryData) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn with_errors(errors: Vec<ErrorObject>) -> Self {
        Self {
            errors: Some(errors),
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

    pub fn with_included(mut self, included: Vec<Resource>) -> Self {
        self.included = Some(included);
        self
    }
}

/// Primary data of a document
///
/// Arrays of identifiers are tried before arrays of resources, so an empty
/// array decodes as `Identifiers(vec![])`. `Resources(vec![])` and
/// `Identifiers(vec![])` are the same document (both serialize to `[]`);
/// code that builds documents should compare empty collections with
/// [`is_empty_collection`](Self::is_empty_collection) rather than `==`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Null,
    Identifiers(Vec<ResourceIdentifier>),
    Resources(Vec<Resource>),
    Identifier(ResourceIdentifier),
    Resource(Resource),
}

impl PrimaryData {
    pub fn is_collection(&self) -> bool {
        matches!(self, PrimaryData::Identifiers(_) | PrimaryData::Resources(_))
    }

    pub fn is_empty_collection(&self) -> bool {
        match self {
            PrimaryData::Identifiers(ids) => ids.is_empty(),
            PrimaryData::Resources(resources) => resources.is_empty(),
            _ => false,
        }
    }
}

/// The `jsonapi` member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonApiVersion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl JsonApiVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            meta: None,
        }
    }
}

impl Default for JsonApiVersion {
    fn default() -> Self {
        Self::new(JSON_API_VERSION)
    }
}

/// Error object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ErrorObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Point the error at a member of the request document
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.source.get_or_insert_with(ErrorSource::default).pointer = Some(pointer.into());
        self
    }

    /// Point the error at a query parameter
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.source.get_or_insert_with(ErrorSource::default).parameter = Some(parameter.into());
        self
    }
}

/// Source of an error: a JSON pointer or a query parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_data_is_kept() {
        let doc: Document = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(doc.data, Some(PrimaryData::Null));

        let doc: Document = serde_json::from_value(json!({ "meta": { "a": 1 } })).unwrap();
        assert!(doc.data.is_none());
    }

    #[test]
    fn test_primary_data_shapes() {
        let doc: Document = serde_json::from_value(json!({
            "data": { "type": "articles", "id": "1", "attributes": { "title": "Rails is Omakase" } }
        }))
        .unwrap();
        assert!(matches!(doc.data, Some(PrimaryData::Resource(_))));

        let doc: Document = serde_json::from_value(json!({
            "data": [{ "type": "people", "id": "9" }]
        }))
        .unwrap();
        assert!(matches!(doc.data, Some(PrimaryData::Identifiers(ref ids)) if ids.len() == 1));
    }

    #[test]
    fn test_empty_collections_are_one_shape() {
        let resources = PrimaryData::Resources(vec![]);
        let identifiers = PrimaryData::Identifiers(vec![]);
        assert!(resources.is_empty_collection());
        assert!(identifiers.is_empty_collection());
        assert!(!PrimaryData::Null.is_empty_collection());
        assert_eq!(
            serde_json::to_value(&resources).unwrap(),
            serde_json::to_value(&identifiers).unwrap()
        );
    }

    #[test]
    fn test_error_builder() {
        let error = ErrorObject::new()
            .with_status("422")
            .with_title("Invalid Attribute")
            .with_pointer("/data/attributes/firstName");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({
                "status": "422",
                "title": "Invalid Attribute",
                "source": { "pointer": "/data/attributes/firstName" }
            })
        );
    }

    #[test]
    fn test_default_version() {
        assert_eq!(JsonApiVersion::default().version.as_deref(), Some("1.0"));
    }
}
