//! Service model errors

use thiserror::Error;

/// Result type for metadata lookup and binding
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while resolving resource types or moving values through bindings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("no resource type registered for api type '{0}'")]
    UnknownResourceType(String),

    #[error("no resource type registered for domain type {0}")]
    UnknownDomainType(&'static str),

    #[error("resource type '{0}' is registered more than once")]
    DuplicateResourceType(String),

    #[error("resource type '{0}' has no id binding")]
    MissingIdentity(String),

    #[error("resource type '{api_type}' binds attribute '{attribute}' more than once")]
    DuplicateAttribute { api_type: String, attribute: String },

    #[error("resource type '{api_type}' has no attribute '{attribute}'")]
    UnknownAttribute { api_type: String, attribute: String },

    #[error("resource type '{api_type}' expects a domain object of type {expected}")]
    DomainTypeMismatch {
        api_type: String,
        expected: &'static str,
    },

    #[error("resource type '{api_type}': invalid id '{id}': {reason}")]
    InvalidId {
        api_type: String,
        id: String,
        reason: String,
    },

    #[error("resource type '{api_type}': attribute '{attribute}' could not be converted: {reason}")]
    AttributeConversion {
        api_type: String,
        attribute: String,
        reason: String,
    },
}
