//! japi model - JSON:API value objects and resource metadata
//!
//! Two halves:
//! - wire-level value objects ([`Document`], [`Resource`], [`Relationship`], ...)
//!   mirroring the reserved keys of the format, with serde derives as the
//!   seam for an external codec;
//! - the [`ServiceModel`]: a statically built table of [`ResourceType`]s that
//!   maps API type names, ids and attributes onto plain Rust domain types.

mod bindings;
mod document;
mod error;
mod link;
mod relationship;
mod resource;
mod serde_util;
mod service_model;

pub use bindings::{AttributeBinding, IdentityBinding};
pub use document::{Document, ErrorObject, ErrorSource, JsonApiVersion, PrimaryData};
pub use error::{ModelError, ModelResult};
pub use link::{Link, Links};
pub use relationship::{Linkage, Relationship, Relationships};
pub use resource::{Attributes, Resource, ResourceIdentifier};
pub use service_model::{
    DomainObject, ResourceType, ResourceTypeBuilder, ServiceModel, ServiceModelBuilder,
};

/// Free-form meta information
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Version of the format written into `jsonapi` objects by default
pub const JSON_API_VERSION: &str = "1.0";
