//! Wire document -> DOM -> wire document

mod common;

use japi_dom::{DomDocument, DomNodeKind};
use japi_model::{
    Document, ErrorObject, JsonApiVersion, Link, Linkage, PrimaryData, Relationship,
    ResourceIdentifier,
};
use serde_json::json;

use common::{article, comment, dan, init_tracing, meta, service_model};

fn round_trip(document: &Document) -> anyhow::Result<Document> {
    let dom = DomDocument::parse(service_model(), document)?;
    Ok(dom.to_wire()?)
}

// ============================================================================
// Required shapes
// ============================================================================

#[test]
fn test_links_and_meta_only() -> anyhow::Result<()> {
    init_tracing();
    let document = Document::default()
        .with_link("self", Link::new("/articles"))
        .with_link("describedby", Link::new("/schema").with_meta(meta("version", json!(2))))
        .with_meta(meta("copyright", json!("Copyright 2015 Example Corp.")));

    assert_eq!(round_trip(&document)?, document);
    Ok(())
}

#[test]
fn test_single_resource_with_relationships() -> anyhow::Result<()> {
    let document = Document::with_data(PrimaryData::Resource(article("1", "Rails is Omakase")));
    let back = round_trip(&document)?;
    assert_eq!(back, document);

    let Some(PrimaryData::Resource(resource)) = back.data else {
        panic!("expected a single resource");
    };
    let relationships = resource.relationships.unwrap_or_default();
    assert!(matches!(relationships["author"].data, Some(Linkage::ToOne(_))));
    assert!(matches!(
        relationships["comments"].data,
        Some(Linkage::ToMany(ref ids)) if ids.len() == 2
    ));
    Ok(())
}

#[test]
fn test_collection_with_shared_included() -> anyhow::Result<()> {
    let document = Document::with_data(PrimaryData::Resources(vec![
        article("1", "Rails is Omakase"),
        article("2", "JSON:API paints my bikeshed!"),
    ]))
    .with_included(vec![dan(), comment("5", "First!"), comment("12", "I like XML better")])
    .with_link("self", Link::new("/articles"));

    assert_eq!(round_trip(&document)?, document);
    Ok(())
}

// ============================================================================
// Other shapes
// ============================================================================

#[test]
fn test_errors_document() -> anyhow::Result<()> {
    let document = Document::with_errors(vec![
        ErrorObject::new()
            .with_status("422")
            .with_title("Invalid Attribute")
            .with_pointer("/data/attributes/title"),
        ErrorObject::new().with_status("409").with_code("conflict"),
    ])
    .with_meta(meta("request-id", json!("abc")));

    let dom = DomDocument::parse(service_model(), &document)?;
    assert_eq!(dom.errors()?.len(), 2);
    assert_eq!(dom.to_wire()?, document);
    Ok(())
}

#[test]
fn test_identifier_documents() -> anyhow::Result<()> {
    let single = Document::with_data(PrimaryData::Identifier(
        ResourceIdentifier::new("people", "9").with_meta(meta("role", json!("author"))),
    ));
    assert_eq!(round_trip(&single)?, single);

    let many = Document::with_data(PrimaryData::Identifiers(vec![
        ResourceIdentifier::new("comments", "5"),
        ResourceIdentifier::new("comments", "12"),
    ]));
    assert_eq!(round_trip(&many)?, many);
    Ok(())
}

#[test]
fn test_null_and_empty_data() -> anyhow::Result<()> {
    let null: Document = serde_json::from_value(json!({ "data": null }))?;
    assert_eq!(round_trip(&null)?, null);

    let empty: Document = serde_json::from_value(json!({ "data": [] }))?;
    let back = round_trip(&empty)?;
    assert_eq!(back, empty);
    assert_eq!(serde_json::to_value(&back)?, json!({ "data": [] }));

    let built = Document::with_data(PrimaryData::Resources(vec![]));
    let data = round_trip(&built)?.data.expect("data member");
    assert!(data.is_empty_collection());
    assert_eq!(serde_json::to_value(&data)?, json!([]));
    Ok(())
}

#[test]
fn test_jsonapi_member_and_empty_relationship() -> anyhow::Result<()> {
    let mut document = Document::with_data(PrimaryData::Resource(
        japi_model::Resource::new("articles", "3")
            .with_relationship("author", Relationship::null())
            .with_relationship("comments", Relationship::to_many(vec![]))
            .with_relationship(
                "tags",
                Relationship::default().with_link("related", Link::new("/articles/3/tags")),
            ),
    ));
    document.jsonapi = Some(JsonApiVersion::default());

    assert_eq!(round_trip(&document)?, document);
    Ok(())
}

#[test]
fn test_textual_round_trip() -> anyhow::Result<()> {
    let text = json!({
        "data": {
            "type": "articles",
            "id": "1",
            "attributes": { "title": "Rails is Omakase", "tags": ["rails", "opinion"] },
            "relationships": {
                "author": {
                    "links": { "self": "/articles/1/relationships/author" },
                    "data": { "type": "people", "id": "9" }
                }
            }
        },
        "included": [
            { "type": "people", "id": "9", "attributes": { "first-name": "Dan" } }
        ]
    });
    let document: Document = serde_json::from_value(text.clone())?;
    let dom = DomDocument::parse(service_model(), &document)?;

    assert_eq!(serde_json::to_value(dom.to_wire()?)?, text);
    Ok(())
}

// ============================================================================
// Materializing while building
// ============================================================================

#[test]
fn test_relationship_reflects_incremental_links() -> anyhow::Result<()> {
    let mut dom = DomDocument::new(service_model());
    let data = dom.add_data()?;
    let resource = dom.add_resource(data, &japi_model::Resource::new("articles", "1"))?;
    let relationship = dom.add_relationship(
        resource,
        "author",
        &Relationship::to_one(ResourceIdentifier::new("people", "9")),
    )?;

    assert!(dom.materialize_relationship(relationship)?.links.is_none());

    let links = dom.get_or_add_links(relationship)?;
    dom.add_link(links, "self", &Link::new("/articles/1/relationships/author"))?;
    let first = dom.materialize_relationship(relationship)?;
    assert_eq!(first.links.as_ref().map(|l| l.len()), Some(1));

    dom.add_link(links, "related", &Link::new("/articles/1/author"))?;
    let second = dom.materialize_relationship(relationship)?;
    assert_eq!(second.links.as_ref().map(|l| l.len()), Some(2));
    assert_eq!(second.data, first.data);

    assert_eq!(dom.kind(links)?, DomNodeKind::Links);
    Ok(())
}
