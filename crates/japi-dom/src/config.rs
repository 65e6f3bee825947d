//! DOM configuration

use serde::{Deserialize, Serialize};

/// Strictness switches for building and reading a document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Reject a DataCollection child whose kind differs from its siblings
    pub homogeneous_collections: bool,
    /// Fail the parse path on wire attributes the resource type does not bind
    pub reject_unknown_attributes: bool,
    /// Cache the document type on the Document node
    pub memoize_document_type: bool,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            homogeneous_collections: true,
            reject_unknown_attributes: false,
            memoize_document_type: true,
        }
    }
}

impl DomConfig {
    /// Defaults plus unknown-attribute rejection
    pub fn strict() -> Self {
        Self {
            reject_unknown_attributes: true,
            ..Self::default()
        }
    }
}
