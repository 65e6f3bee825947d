//! Structural rules
//!
//! Which kinds a parent may own, how many of each, which sibling kinds
//! exclude one another, which siblings must carry distinct names, and which
//! children a node must already have before it joins a parent. Checked
//! before every attach or replace.

use japi_tree::{NodeId, Tree};

use crate::{DomConfig, DomError, DomNode, DomNodeKind as K, DomResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cardinality {
    One,
    Many,
}

use Cardinality::{Many, One};

/// Child kinds allowed under `parent`
pub(crate) fn allowed_children(parent: K) -> &'static [(K, Cardinality)] {
    match parent {
        K::Document => &[
            (K::JsonApiVersion, One),
            (K::Meta, One),
            (K::Links, One),
            (K::Data, One),
            (K::DataCollection, One),
            (K::Included, One),
            (K::Errors, One),
        ],
        K::Data => &[(K::Resource, One), (K::ResourceIdentifier, One)],
        K::DataCollection => &[(K::Resource, Many), (K::ResourceIdentifier, Many)],
        K::Resource => &[
            (K::Type, One),
            (K::Id, One),
            (K::Index, One),
            (K::Attributes, One),
            (K::Relationships, One),
            (K::Links, One),
            (K::Meta, One),
        ],
        K::ResourceIdentifier => &[(K::Type, One), (K::Id, One), (K::Index, One), (K::Meta, One)],
        K::Attributes => &[(K::Attribute, Many)],
        K::Relationships => &[(K::Relationship, Many)],
        K::Relationship => &[
            (K::Links, One),
            (K::Data, One),
            (K::DataCollection, One),
            (K::Meta, One),
        ],
        K::Links => &[(K::Link, Many)],
        K::Link => &[(K::Href, One), (K::Meta, One)],
        K::Included => &[(K::Resource, Many)],
        K::Errors => &[(K::Error, Many)],
        K::Error => &[(K::Index, One)],
        K::Type
        | K::Id
        | K::Attribute
        | K::Href
        | K::Meta
        | K::JsonApiVersion
        | K::Index => &[],
    }
}

/// Sibling kinds that may not appear together under `parent`
pub(crate) fn exclusive_pairs(parent: K) -> &'static [(K, K)] {
    match parent {
        K::Document => &[
            (K::Data, K::DataCollection),
            (K::Data, K::Errors),
            (K::DataCollection, K::Errors),
            (K::Included, K::Errors),
        ],
        K::Relationship => &[(K::Data, K::DataCollection)],
        _ => &[],
    }
}

/// Children a node of kind `kind` cannot exist without
pub(crate) fn required_children(kind: K) -> &'static [K] {
    match kind {
        K::Resource => &[K::Type],
        K::ResourceIdentifier => &[K::Type, K::Id],
        _ => &[],
    }
}

/// Validate attaching the detached node `child` under `parent`.
///
/// With `replacing`, that existing child is ignored as a sibling, since it is
/// about to leave.
pub(crate) fn check_attach(
    tree: &Tree<DomNode>,
    parent: NodeId,
    child: NodeId,
    replacing: Option<NodeId>,
    config: &DomConfig,
) -> DomResult<()> {
    let parent_kind = tree.node(parent)?.kind();
    let child_node = tree.node(child)?;
    let child_kind = child_node.kind();
    child_node.data().validate()?;

    let Some(&(_, cardinality)) = allowed_children(parent_kind)
        .iter()
        .find(|(kind, _)| *kind == child_kind)
    else {
        return Err(DomError::ChildNotAllowed {
            parent: parent_kind,
            child: child_kind,
        });
    };

    for &required in required_children(child_kind) {
        if tree.find_child(child, required).is_none() {
            return Err(DomError::MissingChild {
                parent: child_node.name().into_owned(),
                child: required,
            });
        }
    }

    let siblings = || {
        tree.children(parent)
            .filter(move |&(id, _)| Some(id) != replacing)
            .map(|(_, node)| node)
    };

    // Data holds one resource or identifier in total
    if parent_kind == K::Data {
        if let Some(existing) = siblings().next() {
            return Err(DomError::DuplicateChild {
                parent: parent_kind,
                child: existing.kind(),
            });
        }
    }

    if cardinality == One && siblings().any(|n| n.kind() == child_kind) {
        return Err(DomError::DuplicateChild {
            parent: parent_kind,
            child: child_kind,
        });
    }

    for &(a, b) in exclusive_pairs(parent_kind) {
        let other = if child_kind == a {
            b
        } else if child_kind == b {
            a
        } else {
            continue;
        };
        if siblings().any(|n| n.kind() == other) {
            return Err(DomError::MutuallyExclusive {
                parent: parent_kind,
                child: child_kind,
                existing: other,
            });
        }
    }

    if let Some(name) = child_node.data().member_name() {
        if siblings().any(|n| n.kind() == child_kind && n.data().member_name() == Some(name)) {
            return Err(DomError::DuplicateName {
                parent: parent_kind,
                child: child_kind,
                name: name.to_string(),
            });
        }
    }

    if parent_kind == K::DataCollection && config.homogeneous_collections {
        if let Some(first) = siblings().next() {
            if first.kind() != child_kind {
                return Err(DomError::HeterogeneousCollection {
                    existing: first.kind(),
                    child: child_kind,
                });
            }
        }
    }

    check_linkage(tree, parent, parent_kind, child, child_kind)
}

/// Relationship linkage holds identifiers only
fn check_linkage(
    tree: &Tree<DomNode>,
    parent: NodeId,
    parent_kind: K,
    child: NodeId,
    child_kind: K,
) -> DomResult<()> {
    let resource_in_linkage = if child_kind == K::Resource && parent_kind.is_data() {
        tree.get(parent)
            .and_then(|n| n.parent())
            .and_then(|grandparent| tree.kind(grandparent))
            == Some(K::Relationship)
    } else if parent_kind == K::Relationship && child_kind.is_data() {
        tree.children(child).any(|(_, n)| n.kind() == K::Resource)
    } else {
        false
    };

    if resource_in_linkage {
        return Err(DomError::ChildNotAllowed {
            parent: K::Relationship,
            child: K::Resource,
        });
    }
    Ok(())
}
