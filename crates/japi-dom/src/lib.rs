//! japi DOM - document object model for JSON:API documents
//!
//! A [`DomDocument`] is an invariant-checked tree of [`DomNode`]s built on
//! `japi-tree`. It can be assembled from a wire [`Document`](japi_model::Document)
//! (the parse path) or incrementally through builder calls, and read back
//! as wire value objects, domain objects, resource identities or a
//! [`DocumentType`] classification.
//!
//! Resource types are resolved through a shared
//! [`ServiceModel`](japi_model::ServiceModel); one model serves many
//! documents. A single document is meant for one build/read sequence on
//! one thread.

mod config;
mod document;
mod document_type;
mod domain;
mod error;
mod identity;
mod kind;
mod materialize;
mod navigate;
mod node;
mod parse;
mod rules;

pub use config::DomConfig;
pub use document::DomDocument;
pub use document_type::{DOCUMENT_TYPE_ATTRIBUTE, DocumentType};
pub use error::{DomError, DomResult};
pub use identity::{IdentityScope, ResourceIdentities, ResourceIdentity};
pub use kind::DomNodeKind;
pub use node::{AttributeValue, DomNode, IdValue};

pub use japi_tree::NodeId;
