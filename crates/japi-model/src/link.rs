//! Links
//!
//! A link is either a bare URL string or an object carrying `href` and
//! `meta`. A meta-only link has no `href`.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::Meta;

/// Links keyed by relation name (`self`, `related`, ...)
pub type Links = BTreeMap<String, Link>;

/// Hypermedia link
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "LinkRepr")]
pub struct Link {
    pub href: Option<String>,
    pub meta: Option<Meta>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            meta: None,
        }
    }

    /// Link that only carries meta information
    pub fn meta_only(meta: Meta) -> Self {
        Self {
            href: None,
            meta: Some(meta),
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn is_meta_only(&self) -> bool {
        self.href.is_none() && self.meta.is_some()
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (&self.href, &self.meta) {
            (Some(href), None) => serializer.serialize_str(href),
            (href, meta) => {
                let len = usize::from(href.is_some()) + usize::from(meta.is_some());
                let mut map = serializer.serialize_map(Some(len))?;
                if let Some(href) = href {
                    map.serialize_entry("href", href)?;
                }
                if let Some(meta) = meta {
                    map.serialize_entry("meta", meta)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinkRepr {
    Href(String),
    Object {
        #[serde(default)]
        href: Option<String>,
        #[serde(default)]
        meta: Option<Meta>,
    },
}

impl From<LinkRepr> for Link {
    fn from(repr: LinkRepr) -> Self {
        match repr {
            LinkRepr::Href(href) => Link::new(href),
            LinkRepr::Object { href, meta } => Link { href, meta },
        }
    }
}
