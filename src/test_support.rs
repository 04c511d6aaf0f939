//! Shared builders for unit tests.

use rust_decimal::Decimal;

use crate::artworks::{
    Artwork, CategoryRef, ColorVariant, DEFAULT_SIZE_UNIT, DisplayImage, MediaType, OrderType,
    SizeOption,
};

pub(crate) fn artwork(id: &str, base_price: i64) -> Artwork {
    Artwork {
        id: id.to_string(),
        name: format!("Artwork {id}"),
        base_price: Decimal::from(base_price),
        category: CategoryRef {
            id: "cat-painting".to_string(),
            name: "Painting".to_string(),
        },
        order_type: OrderType::MadeToOrder,
        is_out_of_stock: false,
        quantity: None,
        weight: None,
        artist_id: None,
        dimensions: Vec::new(),
        variants: Vec::new(),
        images: Vec::new(),
        description_fields: Vec::new(),
        related_products: Vec::new(),
    }
}

pub(crate) fn size(name: &str, adjustment: i64) -> SizeOption {
    SizeOption {
        name: name.to_string(),
        width: Decimal::from(30),
        height: Decimal::from(40),
        length: Decimal::ZERO,
        unit: DEFAULT_SIZE_UNIT.to_string(),
        price_adjustment: Decimal::from(adjustment),
    }
}

pub(crate) fn variant(id: &str, adjustment: i64, images: &[&str]) -> ColorVariant {
    ColorVariant {
        id: id.to_string(),
        color_name: format!("Colour {id}"),
        color_hex: "#000000".to_string(),
        sku: Some(format!("SKU-{id}")),
        price_adjustment: Decimal::from(adjustment),
        quantity: None,
        images: images
            .iter()
            .map(|url| DisplayImage {
                url: (*url).to_string(),
                media_type: MediaType::Image,
                variant_id: Some(id.to_string()),
            })
            .collect(),
        is_default: false,
    }
}

pub(crate) fn images(urls: &[&str]) -> Vec<DisplayImage> {
    urls.iter().map(|url| DisplayImage::image(*url)).collect()
}
