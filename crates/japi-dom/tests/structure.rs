//! Structural rule enforcement

mod common;

use japi_dom::{DomConfig, DomDocument, DomError, DomNode, DomNodeKind, IdValue};
use japi_model::{
    Document, ErrorObject, JsonApiVersion, Link, ModelError, PrimaryData, Relationship, Resource,
    ResourceIdentifier,
};
use serde_json::{Value, json};

use common::{article, comment, init_tracing, meta, service_model};

// ============================================================================
// Mutual exclusion
// ============================================================================

#[test]
fn test_data_after_errors_rejected() {
    init_tracing();
    let mut dom = DomDocument::new(service_model());
    dom.add_error(&ErrorObject::new().with_status("500")).unwrap();

    assert_eq!(
        dom.add_data().unwrap_err(),
        DomError::MutuallyExclusive {
            parent: DomNodeKind::Document,
            child: DomNodeKind::Data,
            existing: DomNodeKind::Errors,
        }
    );
    assert!(matches!(
        dom.add_data_collection(),
        Err(DomError::MutuallyExclusive { .. })
    ));
}

#[test]
fn test_errors_after_data_rejected() {
    let mut dom = DomDocument::new(service_model());
    dom.add_data().unwrap();

    assert_eq!(
        dom.get_or_add_errors().unwrap_err(),
        DomError::MutuallyExclusive {
            parent: DomNodeKind::Document,
            child: DomNodeKind::Errors,
            existing: DomNodeKind::Data,
        }
    );
    assert!(dom.add_error(&ErrorObject::new()).is_err());
}

#[test]
fn test_data_and_collection_exclusive() {
    let mut dom = DomDocument::new(service_model());
    dom.add_data_collection().unwrap();
    assert!(matches!(
        dom.add_data(),
        Err(DomError::MutuallyExclusive {
            existing: DomNodeKind::DataCollection,
            ..
        })
    ));
}

#[test]
fn test_included_and_errors_exclusive() {
    let mut dom = DomDocument::new(service_model());
    dom.get_or_add_included().unwrap();
    assert!(matches!(
        dom.get_or_add_errors(),
        Err(DomError::MutuallyExclusive {
            child: DomNodeKind::Errors,
            existing: DomNodeKind::Included,
            ..
        })
    ));
}

#[test]
fn test_wire_document_with_data_and_errors_fails_to_parse() {
    let document = Document {
        data: Some(PrimaryData::Null),
        errors: Some(vec![ErrorObject::new().with_code("E1")]),
        ..Document::default()
    };
    let err = DomDocument::parse(service_model(), &document).unwrap_err();
    assert!(matches!(err, DomError::MutuallyExclusive { .. }));
}

// ============================================================================
// Cardinality and names
// ============================================================================

#[test]
fn test_second_meta_rejected() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    dom.add_meta(root, meta("a", json!(1))).unwrap();

    assert_eq!(
        dom.add_meta(root, meta("b", json!(2))).unwrap_err(),
        DomError::DuplicateChild {
            parent: DomNodeKind::Document,
            child: DomNodeKind::Meta,
        }
    );
}

#[test]
fn test_second_meta_on_resource_rejected() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    let resource = dom.add_resource(data, &comment("1", "First!")).unwrap();

    assert!(matches!(
        dom.add_meta(resource, meta("again", json!(true))),
        Err(DomError::DuplicateChild {
            parent: DomNodeKind::Resource,
            child: DomNodeKind::Meta,
        })
    ));
}

#[test]
fn test_set_json_api_version_replaces() {
    let mut dom = DomDocument::new(service_model());
    dom.set_json_api_version(JsonApiVersion::default()).unwrap();
    let node = dom.set_json_api_version(JsonApiVersion::new("1.1")).unwrap();

    assert_eq!(dom.tree().child_ids(dom.root()), [node]);
    assert_eq!(
        dom.to_wire().unwrap().jsonapi.and_then(|v| v.version),
        Some("1.1".to_string())
    );
}

#[test]
fn test_data_holds_a_single_resource() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    dom.add_resource(data, &Resource::new("articles", "1")).unwrap();

    assert_eq!(
        dom.add_resource(data, &Resource::new("articles", "2")).unwrap_err(),
        DomError::DuplicateChild {
            parent: DomNodeKind::Data,
            child: DomNodeKind::Resource,
        }
    );
}

#[test]
fn test_duplicate_relationship_name_rejected() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    let resource = dom.add_resource(data, &article("1", "Omakase")).unwrap();

    let err = dom
        .add_relationship(resource, "author", &Relationship::null())
        .unwrap_err();
    assert_eq!(
        err,
        DomError::DuplicateName {
            parent: DomNodeKind::Relationships,
            child: DomNodeKind::Relationship,
            name: "author".into(),
        }
    );
    dom.add_relationship(resource, "editor", &Relationship::null())
        .unwrap();
}

#[test]
fn test_disallowed_child_kind() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    assert_eq!(
        dom.append(root, DomNode::Attributes).unwrap_err(),
        DomError::ChildNotAllowed {
            parent: DomNodeKind::Document,
            child: DomNodeKind::Attributes,
        }
    );

    let links = dom.get_or_add_links(root).unwrap();
    let href = DomNode::href("/articles").unwrap();
    assert!(matches!(
        dom.append(links, href),
        Err(DomError::ChildNotAllowed { .. })
    ));
}

#[test]
fn test_leaf_nodes_take_no_children() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    let meta_node = dom.add_meta(root, meta("a", json!(1))).unwrap();
    assert!(matches!(
        dom.append(meta_node, DomNode::index(0)),
        Err(DomError::ChildNotAllowed {
            parent: DomNodeKind::Meta,
            ..
        })
    ));
}

// ============================================================================
// Relationship linkage
// ============================================================================

#[test]
fn test_relationship_linkage_holds_identifiers_only() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    let resource = dom.add_resource(data, &Resource::new("articles", "1")).unwrap();
    let relationship = dom
        .add_relationship(resource, "author", &Relationship::null())
        .unwrap();
    let linkage = dom.child(relationship, DomNodeKind::Data).unwrap();

    assert_eq!(
        dom.add_resource(linkage, &Resource::new("people", "9"))
            .unwrap_err(),
        DomError::ChildNotAllowed {
            parent: DomNodeKind::Relationship,
            child: DomNodeKind::Resource,
        }
    );
    dom.add_resource_identifier(linkage, &ResourceIdentifier::new("people", "9"))
        .unwrap();
}

#[test]
fn test_to_one_and_to_many_linkage_exclusive() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    let resource = dom.add_resource(data, &Resource::new("articles", "1")).unwrap();
    let relationship = dom
        .add_relationship(resource, "author", &Relationship::null())
        .unwrap();

    assert!(matches!(
        dom.append(relationship, DomNode::DataCollection),
        Err(DomError::MutuallyExclusive {
            parent: DomNodeKind::Relationship,
            ..
        })
    ));
}

// ============================================================================
// Tree-level failures surface through the DOM
// ============================================================================

#[test]
fn test_attach_twice_is_a_tree_error() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    let links = dom.get_or_add_links(root).unwrap();
    let link = dom.create_node(DomNode::link("self").unwrap());
    dom.attach(links, link).unwrap();

    let other = dom.create_node(DomNode::Links);
    assert!(matches!(dom.attach(other, link), Err(DomError::Tree(_))));
}

#[test]
fn test_remove_wrong_parent() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    let data = dom.add_data().unwrap();
    let links = dom.get_or_add_links(root).unwrap();

    assert!(matches!(dom.remove(links, data), Err(DomError::Tree(_))));
}

// ============================================================================
// Payload validation and unknown attributes
// ============================================================================

#[test]
fn test_link_without_href_or_meta() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    let links = dom.get_or_add_links(root).unwrap();
    assert!(matches!(
        dom.add_link(links, "self", &Link::default()),
        Err(DomError::InvalidPayload { .. })
    ));
    dom.add_link(links, "describedby", &Link::meta_only(meta("v", json!(2))))
        .unwrap();
}

#[test]
fn test_unknown_attribute_policy() -> anyhow::Result<()> {
    let resource = Resource::new("people", "9")
        .with_attribute("first-name", "Dan")
        .with_attribute("twitter", "@dgeb");
    let document = Document::with_data(PrimaryData::Resource(resource));

    let lenient = DomDocument::parse(service_model(), &document)?;
    assert_eq!(lenient.to_wire()?, document);

    let err = DomDocument::parse_with_config(service_model(), &document, DomConfig::strict())
        .unwrap_err();
    assert_eq!(
        err,
        DomError::Model(ModelError::UnknownAttribute {
            api_type: "people".into(),
            attribute: "twitter".into(),
        })
    );
    Ok(())
}

#[test]
fn test_invalid_wire_id_fails_parse() {
    let document = Document::with_data(PrimaryData::Resource(Resource::new("articles", "one")));
    assert!(matches!(
        DomDocument::parse(service_model(), &document),
        Err(DomError::Model(ModelError::InvalidId { .. }))
    ));
}

// ============================================================================
// Hand-written payloads go through the factory rules
// ============================================================================

#[test]
fn test_raw_variants_rejected_on_attach() {
    let mut dom = DomDocument::new(service_model());
    let root = dom.root();
    let links = dom.get_or_add_links(root).unwrap();

    assert!(matches!(
        dom.append(links, DomNode::Link { rel: String::new() }),
        Err(DomError::InvalidPayload {
            kind: DomNodeKind::Link,
            ..
        })
    ));

    let link = dom.append(links, DomNode::link("self").unwrap()).unwrap();
    assert!(matches!(
        dom.append(link, DomNode::Href(String::new())),
        Err(DomError::InvalidPayload {
            kind: DomNodeKind::Href,
            ..
        })
    ));

    let data = dom.add_data().unwrap();
    let resource = dom
        .add_resource(data, &Resource::without_id("articles"))
        .unwrap();
    let bad_id = DomNode::Id(IdValue {
        api_id: String::new(),
        domain_id: Value::Null,
        domain_type: "",
    });
    assert!(matches!(
        dom.append(resource, bad_id),
        Err(DomError::InvalidPayload {
            kind: DomNodeKind::Id,
            ..
        })
    ));

    let detached = dom.create_node(DomNode::Resource);
    assert!(matches!(
        dom.append(detached, DomNode::Type(String::new())),
        Err(DomError::InvalidPayload {
            kind: DomNodeKind::Type,
            ..
        })
    ));
}

#[test]
fn test_incomplete_resources_rejected() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();

    assert_eq!(
        dom.append(data, DomNode::Resource).unwrap_err(),
        DomError::MissingChild {
            parent: "Resource".into(),
            child: DomNodeKind::Type,
        }
    );

    let identifier = dom.create_node(DomNode::ResourceIdentifier);
    dom.append(identifier, DomNode::type_name("people").unwrap())
        .unwrap();
    assert_eq!(
        dom.attach(data, identifier).unwrap_err(),
        DomError::MissingChild {
            parent: "ResourceIdentifier".into(),
            child: DomNodeKind::Id,
        }
    );

    assert!(dom.tree().child_ids(data).is_empty());
    assert!(dom.to_wire().is_ok());
}

#[test]
fn test_required_children_stay() {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data().unwrap();
    let resource = dom.add_resource(data, &Resource::new("articles", "1")).unwrap();
    let type_node = dom.child(resource, DomNodeKind::Type).unwrap();

    assert_eq!(
        dom.remove(resource, type_node).unwrap_err(),
        DomError::RequiredChild {
            parent: DomNodeKind::Resource,
            child: DomNodeKind::Type,
        }
    );

    let meta_node = dom.create_node(DomNode::meta(meta("a", json!(1))));
    assert!(matches!(
        dom.replace(resource, type_node, meta_node),
        Err(DomError::RequiredChild { .. })
    ));

    let renamed = dom.create_node(DomNode::type_name("articles").unwrap());
    dom.replace(resource, type_node, renamed).unwrap();
    assert_eq!(dom.type_of(resource), Some("articles"));

    let id_node = dom.child(resource, DomNodeKind::Id).unwrap();
    dom.remove(resource, id_node).unwrap();
    assert!(dom.materialize_resource(resource).unwrap().id.is_none());
}
