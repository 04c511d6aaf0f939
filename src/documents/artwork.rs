//! Artwork documents

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::warn;

use crate::{
    artworks::{
        Artwork, CategoryRef, ColorVariant, DEFAULT_SIZE_UNIT, DescriptionField, DisplayImage,
        MediaType, OrderType, SizeOption,
    },
    documents::{
        Document, DocumentError, FromDocument, collections,
        fields::{self, Fields},
    },
};

impl FromDocument for Artwork {
    const COLLECTION: &'static str = collections::PRODUCTS;

    fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let fields = &document.fields;

        let mut seen = FxHashSet::default();
        seen.insert(document.id.clone());

        let related_products = fields::strings(fields, "relatedProducts")
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        Ok(Self {
            id: document.id.clone(),
            name: fields::first_text(fields, &["name", "title"]),
            base_price: fields::first_decimal(fields, &["price", "basePrice"]),
            category: category(fields),
            order_type: OrderType::parse(&fields::text(fields, "orderType")),
            is_out_of_stock: fields::flag(fields, "isOutOfStock"),
            quantity: fields::integer(fields, "quantity"),
            weight: fields::optional_decimal(fields, "weight"),
            artist_id: fields::optional_text(fields, "artistId"),
            dimensions: dimensions(&document.id, fields::list(fields, "dimensions")),
            variants: variants(&document.id, fields::list(fields, "variants")),
            images: fields::list(fields, "images")
                .iter()
                .filter_map(|value| image(value, None))
                .collect(),
            description_fields: description_fields(fields::list(fields, "descriptionFields")),
            related_products,
        })
    }
}

/// Category names are kept verbatim; availability rules match them exactly.
fn category(fields: &Fields) -> CategoryRef {
    let mut category = match fields.get("category") {
        Some(Value::Object(object)) => CategoryRef {
            id: fields::text(object, "id"),
            name: fields::verbatim_text(object, "name").unwrap_or_default(),
        },
        Some(Value::String(name)) => CategoryRef {
            id: String::new(),
            name: name.clone(),
        },
        _ => CategoryRef::default(),
    };

    if let Some(id) = fields::optional_text(fields, "categoryId") {
        category.id = id;
    }

    if let Some(name) = fields::verbatim_text(fields, "categoryName") {
        category.name = name;
    }

    category
}

fn image(value: &Value, variant_id: Option<&str>) -> Option<DisplayImage> {
    let (url, media_type) = match value {
        Value::String(url) => (url.trim().to_string(), MediaType::Image),
        Value::Object(object) => {
            let media_type = if fields::first_text(object, &["type", "mediaType"])
                .eq_ignore_ascii_case("video")
            {
                MediaType::Video
            } else {
                MediaType::Image
            };

            (fields::first_text(object, &["url", "src"]), media_type)
        }
        _ => return None,
    };

    if url.is_empty() {
        return None;
    }

    Some(DisplayImage {
        url,
        media_type,
        variant_id: variant_id.map(ToString::to_string),
    })
}

fn dimensions(artwork: &str, values: &[Value]) -> Vec<SizeOption> {
    let mut names = FxHashSet::default();

    values
        .iter()
        .filter_map(|value| {
            let Value::Object(object) = value else {
                warn!(artwork, "dropping size option that is not an object");
                return None;
            };

            let name = fields::text(object, "name");

            if name.is_empty() || !names.insert(name.clone()) {
                warn!(artwork, name = %name, "dropping unnamed or duplicate size option");
                return None;
            }

            let unit = fields::optional_text(object, "unit")
                .unwrap_or_else(|| DEFAULT_SIZE_UNIT.to_string());

            Some(SizeOption {
                name,
                width: fields::decimal(object, "width"),
                height: fields::decimal(object, "height"),
                length: fields::decimal(object, "length"),
                unit,
                price_adjustment: fields::first_decimal(object, &["priceAdjustment", "price"]),
            })
        })
        .collect()
}

fn variants(artwork: &str, values: &[Value]) -> Vec<ColorVariant> {
    let mut ids = FxHashSet::default();

    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let Value::Object(object) = value else {
                warn!(artwork, index, "dropping colour variant that is not an object");
                return None;
            };

            let id = fields::optional_text(object, "id").unwrap_or_else(|| index.to_string());

            if !ids.insert(id.clone()) {
                warn!(artwork, id = %id, "dropping duplicate colour variant");
                return None;
            }

            let images = fields::list(object, "images")
                .iter()
                .filter_map(|value| image(value, Some(&id)))
                .collect();

            Some(ColorVariant {
                color_name: fields::first_text(object, &["colorName", "color"]),
                color_hex: fields::first_text(object, &["colorHex", "hex"]),
                sku: fields::optional_text(object, "sku"),
                price_adjustment: fields::decimal(object, "priceAdjustment"),
                quantity: fields::integer(object, "quantity"),
                images,
                is_default: fields::flag(object, "isDefault"),
                id,
            })
        })
        .collect()
}

fn description_fields(values: &[Value]) -> Vec<DescriptionField> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Object(object) => Some(DescriptionField {
                field: fields::text(object, "field"),
                value: fields::text(object, "value"),
            }),
            _ => None,
        })
        .filter(|row| !row.field.is_empty())
        .collect()
}
