//! Shared fixtures: a blog service model and wire documents built on it

#![allow(dead_code)]

use std::sync::{Arc, Once};

use japi_model::{
    Link, Links, Meta, Relationship, Relationships, Resource, ResourceIdentifier, ResourceType,
    ServiceModel,
};
use serde_json::json;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test writer; `RUST_LOG` picks the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub tags: Vec<String>,
    pub relationships: Option<Relationships>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub body: String,
}

pub fn service_model() -> Arc<ServiceModel> {
    let articles = ResourceType::builder::<Article>("articles")
        .id("id", |a: &Article| a.id, |a, id| a.id = id)
        .unset_id(0u64)
        .attribute("title", "title", |a: &Article| a.title.clone(), |a, v| a.title = v)
        .attribute("tags", "tags", |a: &Article| a.tags.clone(), |a, v| a.tags = v)
        .relationships(
            |a: &Article| a.relationships.clone(),
            |a, r| a.relationships = Some(r),
        )
        .links(|a: &Article| a.links.clone(), |a, l| a.links = Some(l))
        .meta(|a: &Article| a.meta.clone(), |a, m| a.meta = Some(m))
        .build()
        .expect("articles resource type");

    let people = ResourceType::builder::<Person>("people")
        .id("id", |p: &Person| p.id.clone(), |p, id| p.id = id)
        .attribute(
            "first-name",
            "first_name",
            |p: &Person| p.first_name.clone(),
            |p, v| p.first_name = v,
        )
        .attribute(
            "last-name",
            "last_name",
            |p: &Person| p.last_name.clone(),
            |p, v| p.last_name = v,
        )
        .build()
        .expect("people resource type");

    let comments = ResourceType::builder::<Comment>("comments")
        .id("id", |c: &Comment| c.id, |c, id| c.id = id)
        .attribute("body", "body", |c: &Comment| c.body.clone(), |c, v| c.body = v)
        .build()
        .expect("comments resource type");

    Arc::new(
        ServiceModel::builder()
            .resource_type(articles)
            .resource_type(people)
            .resource_type(comments)
            .build()
            .expect("service model"),
    )
}

pub fn meta(key: &str, value: serde_json::Value) -> Meta {
    let mut meta = Meta::new();
    meta.insert(key.to_string(), value);
    meta
}

pub fn article(id: &str, title: &str) -> Resource {
    Resource::new("articles", id)
        .with_attribute("title", title)
        .with_relationship(
            "author",
            Relationship::to_one(ResourceIdentifier::new("people", "9"))
                .with_link("related", Link::new(format!("/articles/{id}/author"))),
        )
        .with_relationship(
            "comments",
            Relationship::to_many(vec![
                ResourceIdentifier::new("comments", "5"),
                ResourceIdentifier::new("comments", "12"),
            ]),
        )
        .with_link("self", Link::new(format!("/articles/{id}")))
}

pub fn dan() -> Resource {
    Resource::new("people", "9")
        .with_attribute("first-name", "Dan")
        .with_attribute("last-name", "Gebhardt")
        .with_link("self", Link::new("/people/9"))
}

pub fn comment(id: &str, body: &str) -> Resource {
    Resource::new("comments", id)
        .with_attribute("body", body)
        .with_meta(meta("moderated", json!(true)))
}
