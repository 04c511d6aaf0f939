//! Test Helpers

use atelier::documents::Document;
use serde_json::{Map, Value, json};

/// Build a document from a JSON object, taking `id` out of the fields.
pub(crate) fn document(value: Value) -> Document {
    let mut fields = match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    let id = fields
        .remove("id")
        .and_then(|id| id.as_str().map(ToString::to_string))
        .unwrap_or_default();

    Document::new(id, fields)
}

/// Minimal artwork document named after its id.
pub(crate) fn artwork_document(id: &str, price: i64) -> Document {
    document(json!({
        "id": id,
        "name": format!("Artwork {id}"),
        "price": price,
        "categoryName": "Painting",
        "images": [format!("/images/{id}.jpg")]
    }))
}
