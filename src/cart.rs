//! Cart
//!
//! Line items are resolved on the detail page and handed over to a [`CartAggregator`], which
//! owns them from then on.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    artworks::{CategoryRef, ColorVariant, SizeOption},
    pricing::total_price,
};

/// Snapshot of the chosen size at the time the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSnapshot {
    /// Size name
    pub value: String,

    /// Human readable label
    pub label: String,

    /// Price adjustment applied
    pub price_adjustment: Decimal,
}

impl From<&SizeOption> for SizeSnapshot {
    fn from(size: &SizeOption) -> Self {
        Self {
            value: size.name.clone(),
            label: size.label(),
            price_adjustment: size.price_adjustment,
        }
    }
}

/// Snapshot of the chosen colour variant at the time the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSnapshot {
    /// Variant id
    pub id: String,

    /// Colour name
    pub color_name: String,

    /// Colour hex code
    pub color_hex: String,

    /// Price adjustment applied
    pub price_adjustment: Decimal,

    /// SKU
    pub sku: Option<String>,
}

impl From<&ColorVariant> for VariantSnapshot {
    fn from(variant: &ColorVariant) -> Self {
        Self {
            id: variant.id.clone(),
            color_name: variant.color_name.clone(),
            color_hex: variant.color_hex.clone(),
            price_adjustment: variant.price_adjustment,
            sku: variant.sku.clone(),
        }
    }
}

/// A fully resolved purchase intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Synthetic id: artwork id, variant id (or `base`) and creation time in milliseconds
    pub id: String,

    /// Artwork id
    pub artwork_id: String,

    /// Artwork name
    pub title: String,

    /// Unit price including adjustments
    pub price: Decimal,

    /// Units
    pub quantity: u32,

    /// Chosen size
    pub size: Option<SizeSnapshot>,

    /// Chosen colour variant
    pub variant: Option<VariantSnapshot>,

    /// Image shown in the cart
    pub image_url: String,

    /// Artwork category
    pub category: CategoryRef,

    /// Free-text delivery note
    pub delivery_note: String,
}

impl CartLineItem {
    /// Unit price multiplied by quantity, saturating at the bounds of [`Decimal`].
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Build the synthetic id for a line item.
pub fn line_item_id(artwork_id: &str, variant_id: Option<&str>, created_at: Timestamp) -> String {
    format!(
        "{artwork_id}-{}-{}",
        variant_id.unwrap_or("base"),
        created_at.as_millisecond()
    )
}

/// Accepts resolved line items and owns the cart state.
pub trait CartAggregator {
    /// Take ownership of a line item.
    fn add(&mut self, item: CartLineItem);

    /// Toggle the cart drawer open or closed.
    fn toggle(&mut self);
}

/// In-memory cart.
#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
    is_open: bool,
}

impl Cart {
    /// Create an empty, closed cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items, in the order they were added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Find a line item by id.
    pub fn item(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Remove a line item, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<CartLineItem> {
        let position = self.items.iter().position(|item| item.id == id)?;

        Some(self.items.remove(position))
    }

    /// Change the quantity of a line item. A quantity of zero removes it.
    ///
    /// Returns false if no item has the given id.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id).is_some();
        }

        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Decimal {
        total_price(&self.items)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the cart drawer is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

impl CartAggregator for Cart {
    fn add(&mut self, item: CartLineItem) {
        self.items.push(item);
    }

    fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }
}
