//! Documents
//!
//! The document store hands back loosely typed JSON objects. Everything the storefront reads
//! passes through this module, which maps untrusted fields into the strict types used
//! downstream. Malformed values are defaulted here (zero, empty, absent) rather than raised;
//! the only hard failure is a document without an id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

mod artwork;
pub(crate) mod fields;

/// Collection names exposed by the document store.
pub mod collections {
    /// Artworks
    pub const PRODUCTS: &str = "products";

    /// Product categories
    pub const PRODUCT_CATEGORIES: &str = "productCategories";

    /// Artists
    pub const ARTISTS: &str = "artists";

    /// Home page banners
    pub const BANNERS: &str = "banners";

    /// Store configuration
    pub const CONFIGURATION: &str = "configuration";

    /// Navigation menu items
    pub const MENUS: &str = "menus";

    /// Curated home page collections
    pub const COLLECTIONS: &str = "collections";

    /// Orders
    pub const ORDERS: &str = "orders";
}

/// Errors raised at the document boundary.
#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    /// The payload was not a JSON object.
    #[error("document is not an object")]
    NotAnObject,

    /// The document carried no usable id.
    #[error("document has no id")]
    MissingId,
}

/// A raw document: an id plus untyped fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id
    pub id: String,

    /// Remaining fields, as stored
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates a document from an id and its fields.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Parse this document into a typed record.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the record cannot be built from the document.
    pub fn parse<T: FromDocument>(&self) -> Result<T, DocumentError> {
        T::from_document(self)
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let id = match fields.remove("id") {
            Some(Value::String(id)) => id.trim().to_string(),
            Some(Value::Number(id)) => id.to_string(),
            _ => String::new(),
        };

        if id.is_empty() {
            return Err(DocumentError::MissingId);
        }

        Ok(Self { id, fields })
    }
}

/// Records that can be read from a document store collection.
pub trait FromDocument: Sized {
    /// Collection the records live in.
    const COLLECTION: &'static str;

    /// Map a raw document into the record.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the document cannot be mapped.
    fn from_document(document: &Document) -> Result<Self, DocumentError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn document_takes_id_out_of_fields() -> TestResult {
        let document = Document::try_from(json!({ "id": "abc", "name": "Dusk" }))?;

        assert_eq!(document.id, "abc");
        assert_eq!(document.fields.get("name"), Some(&json!("Dusk")));
        assert!(!document.fields.contains_key("id"));

        Ok(())
    }

    #[test]
    fn numeric_ids_are_stringified() -> TestResult {
        let document = Document::try_from(json!({ "id": 42 }))?;

        assert_eq!(document.id, "42");

        Ok(())
    }

    #[test]
    fn document_without_id_is_rejected() {
        assert_eq!(
            Document::try_from(json!({ "name": "Dusk" })),
            Err(DocumentError::MissingId)
        );
        assert_eq!(
            Document::try_from(json!({ "id": "  " })),
            Err(DocumentError::MissingId)
        );
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(
            Document::try_from(json!(["a"])),
            Err(DocumentError::NotAnObject)
        );
    }
}
