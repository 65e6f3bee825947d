//! Document-type classification

use std::fmt;

use crate::{DomDocument, DomError, DomNodeKind, DomResult};

/// Node attribute holding the memoized classification on the Document node
pub const DOCUMENT_TYPE_ATTRIBUTE: &str = "document-type";

/// Canonical shape of a whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// No primary data and no errors
    Document,
    /// Empty array of primary data
    EmptyDocument,
    ErrorsDocument,
    /// Primary data is `null`
    NullDocument,
    ResourceDocument,
    ResourceIdentifierDocument,
    ResourceCollectionDocument,
    ResourceIdentifierCollectionDocument,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Document => "Document",
            DocumentType::EmptyDocument => "EmptyDocument",
            DocumentType::ErrorsDocument => "ErrorsDocument",
            DocumentType::NullDocument => "NullDocument",
            DocumentType::ResourceDocument => "ResourceDocument",
            DocumentType::ResourceIdentifierDocument => "ResourceIdentifierDocument",
            DocumentType::ResourceCollectionDocument => "ResourceCollectionDocument",
            DocumentType::ResourceIdentifierCollectionDocument => {
                "ResourceIdentifierCollectionDocument"
            }
        }
    }

    /// Primary data is an array
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            DocumentType::EmptyDocument
                | DocumentType::ResourceCollectionDocument
                | DocumentType::ResourceIdentifierCollectionDocument
        )
    }

    /// Document carries a `data` member, possibly null or empty
    pub fn has_data(self) -> bool {
        !matches!(self, DocumentType::Document | DocumentType::ErrorsDocument)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomDocument {
    /// Classify the document from the Document node's direct children.
    ///
    /// Strict priority: Data, then DataCollection, then Errors. Data wins
    /// even when null or empty.
    pub fn classify(&self) -> DomResult<DocumentType> {
        let root = self.root;

        if let Some(data) = self.child(root, DomNodeKind::Data) {
            let inner = self.tree.node(data)?.first_child();
            return match inner.map(|id| self.kind(id)).transpose()? {
                None => Ok(DocumentType::NullDocument),
                Some(DomNodeKind::Resource) => Ok(DocumentType::ResourceDocument),
                Some(DomNodeKind::ResourceIdentifier) => Ok(DocumentType::ResourceIdentifierDocument),
                Some(found) => Err(DomError::UnexpectedKind {
                    expected: "Resource or ResourceIdentifier",
                    found,
                }),
            };
        }

        if let Some(collection) = self.child(root, DomNodeKind::DataCollection) {
            let first = self.tree.node(collection)?.first_child();
            return match first.map(|id| self.kind(id)).transpose()? {
                None => Ok(DocumentType::EmptyDocument),
                Some(DomNodeKind::Resource) => Ok(DocumentType::ResourceCollectionDocument),
                Some(DomNodeKind::ResourceIdentifier) => {
                    Ok(DocumentType::ResourceIdentifierCollectionDocument)
                }
                Some(found) => Err(DomError::UnexpectedKind {
                    expected: "Resource or ResourceIdentifier",
                    found,
                }),
            };
        }

        if self.tree.contains_kind(root, DomNodeKind::Errors) {
            return Ok(DocumentType::ErrorsDocument);
        }
        Ok(DocumentType::Document)
    }

    /// Classification, memoized on the Document node until the next mutation
    pub fn document_type(&mut self) -> DomResult<DocumentType> {
        if let Some(&cached) = self
            .tree
            .try_attribute::<DocumentType>(self.root, DOCUMENT_TYPE_ATTRIBUTE)
        {
            tracing::debug!("document type {} (memoized)", cached);
            return Ok(cached);
        }

        let document_type = self.classify()?;
        if self.config.memoize_document_type {
            self.tree
                .set_attribute(self.root, DOCUMENT_TYPE_ATTRIBUTE, document_type)?;
        }
        tracing::debug!("document type {}", document_type);
        Ok(document_type)
    }
}
