//! Parse path: wire document to DOM
//!
//! Members are visited in a fixed order: `jsonapi`, `meta`, `links`,
//! `data`, `included`, `errors`. Each one goes through the same validated
//! builder calls the writer side uses, so a wire document that breaks a
//! structural rule (data next to errors, say) fails here.

use std::sync::Arc;

use japi_model::{Document, PrimaryData, ServiceModel};

use crate::{DomConfig, DomDocument, DomNode, DomResult};

impl DomDocument {
    pub fn parse(service_model: Arc<ServiceModel>, document: &Document) -> DomResult<Self> {
        Self::parse_with_config(service_model, document, DomConfig::default())
    }

    pub fn parse_with_config(
        service_model: Arc<ServiceModel>,
        document: &Document,
        config: DomConfig,
    ) -> DomResult<Self> {
        tracing::debug!("parsing wire document");
        let mut dom = Self::with_config(service_model, config);
        let root = dom.root;

        if let Some(version) = &document.jsonapi {
            dom.set_json_api_version(version.clone())?;
        }
        if let Some(meta) = &document.meta {
            dom.add_meta(root, meta.clone())?;
        }
        if let Some(links) = &document.links {
            dom.add_links(root, links)?;
        }
        if let Some(data) = &document.data {
            dom.parse_primary_data(data)?;
        }
        if let Some(included) = &document.included {
            let node = dom.get_or_add_included()?;
            for (i, resource) in included.iter().enumerate() {
                dom.build_resource(node, resource, Some(i))?;
            }
        }
        if let Some(errors) = &document.errors {
            let node = dom.get_or_add_errors()?;
            for (i, error) in errors.iter().enumerate() {
                let error = dom.append(node, DomNode::error(error.clone()))?;
                dom.append(error, DomNode::index(i))?;
            }
        }

        tracing::debug!("parsed wire document into {} nodes", dom.tree.len());
        Ok(dom)
    }

    fn parse_primary_data(&mut self, data: &PrimaryData) -> DomResult<()> {
        match data {
            PrimaryData::Null => {
                self.add_data()?;
            }
            PrimaryData::Resource(resource) => {
                let node = self.add_data()?;
                self.build_resource(node, resource, None)?;
            }
            PrimaryData::Identifier(identifier) => {
                let node = self.add_data()?;
                self.build_identifier(node, identifier, None)?;
            }
            PrimaryData::Resources(resources) => {
                let node = self.add_data_collection()?;
                for (i, resource) in resources.iter().enumerate() {
                    self.build_resource(node, resource, Some(i))?;
                }
            }
            PrimaryData::Identifiers(identifiers) => {
                let node = self.add_data_collection()?;
                for (i, identifier) in identifiers.iter().enumerate() {
                    self.build_identifier(node, identifier, Some(i))?;
                }
            }
        }
        Ok(())
    }
}
