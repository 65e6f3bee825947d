//! DOM errors

use japi_model::ModelError;
use japi_tree::TreeError;
use thiserror::Error;

use crate::DomNodeKind;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// Structural and resolution failures raised while building or reading a document tree
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    #[error("{parent} cannot contain {child}")]
    ChildNotAllowed {
        parent: DomNodeKind,
        child: DomNodeKind,
    },

    #[error("{parent} already contains {child}")]
    DuplicateChild {
        parent: DomNodeKind,
        child: DomNodeKind,
    },

    #[error("{parent} already contains {child} '{name}'")]
    DuplicateName {
        parent: DomNodeKind,
        child: DomNodeKind,
        name: String,
    },

    #[error("{parent} cannot contain {child} alongside {existing}")]
    MutuallyExclusive {
        parent: DomNodeKind,
        child: DomNodeKind,
        existing: DomNodeKind,
    },

    #[error("{parent} has no {child}")]
    MissingChild { parent: String, child: DomNodeKind },

    #[error("{child} cannot be removed from {parent}")]
    RequiredChild {
        parent: DomNodeKind,
        child: DomNodeKind,
    },

    #[error("collection of {existing} cannot take {child}")]
    HeterogeneousCollection {
        existing: DomNodeKind,
        child: DomNodeKind,
    },

    #[error("invalid {kind} node: {reason}")]
    InvalidPayload { kind: DomNodeKind, reason: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: DomNodeKind,
    },

    #[error("{0} is not attached to this document")]
    NotInDocument(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}
