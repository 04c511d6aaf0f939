//! Artwork selection
//!
//! Size and colour variant selection for one detail page visit, and the resolution of that
//! selection into a price, an availability verdict and finally a cart line item.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    artworks::{Artwork, ColorVariant, DisplayImage, SizeOption},
    availability::is_out_of_stock,
    cart::{CartAggregator, CartLineItem, SizeSnapshot, VariantSnapshot, line_item_id},
    gallery::{PLACEHOLDER_IMAGE_URL, build_gallery, resolve_active_image},
    pricing::{calculate_price, format_price},
};

/// What to do when add-to-cart is attempted without a required size, or while out of stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSizePolicy {
    /// Produce nothing and report nothing.
    #[default]
    Ignore,

    /// Return an error the caller can surface.
    Reject,
}

/// Errors related to artwork selection.
#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    /// The artwork has no size with this name.
    #[error("artwork has no size named {0}")]
    UnknownSize(String),

    /// The artwork has no variant with this id.
    #[error("artwork has no variant with id {0}")]
    UnknownVariant(String),

    /// The image is not part of the gallery.
    #[error("image is not part of the gallery: {0}")]
    UnknownImage(String),

    /// Quantities start at one.
    #[error("quantity must be at least one")]
    InvalidQuantity,

    /// The artwork has sizes and none is selected.
    #[error("a size must be selected")]
    SizeRequired,

    /// The current selection can not be bought.
    #[error("the selected artwork is out of stock")]
    OutOfStock,
}

/// Resolved price and availability for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    /// Unit price including adjustments
    pub total: Decimal,

    /// Unit price formatted for display
    pub formatted: String,

    /// Whether the selection is sold out
    pub is_out_of_stock: bool,

    /// Whether add-to-cart would produce a line item
    pub can_add_to_cart: bool,
}

/// Selection state for one artwork detail view.
#[derive(Debug, Clone)]
pub struct ArtworkSelection<'a> {
    artwork: &'a Artwork,
    currency: &'static Currency,
    policy: MissingSizePolicy,
    gallery: Vec<DisplayImage>,
    size: Option<&'a SizeOption>,
    variant: Option<&'a ColorVariant>,
    active_image: Option<String>,
    quantity: u32,
}

impl<'a> ArtworkSelection<'a> {
    /// Start a selection. The first declared size is preselected; no variant is.
    pub fn new(artwork: &'a Artwork, currency: &'static Currency) -> Self {
        let gallery = build_gallery(artwork);
        let active_image = resolve_active_image(&gallery, None, None);

        Self {
            artwork,
            currency,
            policy: MissingSizePolicy::default(),
            gallery,
            size: artwork.dimensions.first(),
            variant: None,
            active_image,
            quantity: 1,
        }
    }

    /// Set the policy applied when add-to-cart is blocked.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingSizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The artwork being viewed.
    pub fn artwork(&self) -> &'a Artwork {
        self.artwork
    }

    /// De-duplicated gallery.
    pub fn gallery(&self) -> &[DisplayImage] {
        &self.gallery
    }

    /// Currently selected size.
    pub fn size(&self) -> Option<&'a SizeOption> {
        self.size
    }

    /// Currently selected variant.
    pub fn variant(&self) -> Option<&'a ColorVariant> {
        self.variant
    }

    /// Image currently shown.
    pub fn active_image(&self) -> Option<&str> {
        self.active_image.as_deref()
    }

    /// Units to add.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Select a size by name.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownSize`] if the artwork has no such size.
    pub fn select_size(&mut self, name: &str) -> Result<(), SelectionError> {
        let size = self
            .artwork
            .size(name)
            .ok_or_else(|| SelectionError::UnknownSize(name.to_string()))?;

        self.size = Some(size);

        Ok(())
    }

    /// Drop the size selection.
    pub fn clear_size(&mut self) {
        self.size = None;
    }

    /// Select a variant by id. Selecting the variant that is already selected clears it.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownVariant`] if the artwork has no such variant.
    pub fn select_variant(&mut self, id: &str) -> Result<(), SelectionError> {
        let variant = self
            .artwork
            .variant(id)
            .ok_or_else(|| SelectionError::UnknownVariant(id.to_string()))?;

        if self.variant.is_some_and(|current| current.id == variant.id) {
            self.variant = None;
        } else {
            self.variant = Some(variant);
        }

        self.sync_active_image();

        Ok(())
    }

    /// Clear the variant selection.
    pub fn clear_variant(&mut self) {
        self.variant = None;
        self.sync_active_image();
    }

    /// Show a specific gallery image, e.g. after a thumbnail click.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownImage`] if the URL is not in the gallery.
    pub fn show_image(&mut self, url: &str) -> Result<(), SelectionError> {
        if !self.gallery.iter().any(|image| image.url == url) {
            return Err(SelectionError::UnknownImage(url.to_string()));
        }

        self.active_image = Some(url.to_string());

        Ok(())
    }

    /// Set the number of units to add.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidQuantity`] for zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), SelectionError> {
        if quantity == 0 {
            return Err(SelectionError::InvalidQuantity);
        }

        self.quantity = quantity;

        Ok(())
    }

    fn sync_active_image(&mut self) {
        self.active_image =
            resolve_active_image(&self.gallery, self.variant, self.active_image.as_deref());
    }

    /// Unit price for the current selection.
    pub fn total_price(&self) -> Decimal {
        calculate_price(self.artwork.base_price, self.size, self.variant)
    }

    /// Whether the current selection is sold out.
    pub fn is_out_of_stock(&self) -> bool {
        is_out_of_stock(self.artwork, self.variant)
    }

    fn is_missing_size(&self) -> bool {
        self.artwork.requires_size() && self.size.is_none()
    }

    /// Price and availability for display.
    pub fn summary(&self) -> PriceSummary {
        let total = self.total_price();
        let is_out_of_stock = self.is_out_of_stock();

        PriceSummary {
            total,
            formatted: format_price(total, self.currency),
            is_out_of_stock,
            can_add_to_cart: !is_out_of_stock && !self.is_missing_size(),
        }
    }

    /// Resolve the selection into a line item.
    ///
    /// Returns `Ok(None)` when the selection can not be added and the policy is
    /// [`MissingSizePolicy::Ignore`].
    ///
    /// # Errors
    ///
    /// Under [`MissingSizePolicy::Reject`], returns [`SelectionError::SizeRequired`] when a
    /// required size is missing and [`SelectionError::OutOfStock`] when sold out.
    pub fn line_item(&self, created_at: Timestamp) -> Result<Option<CartLineItem>, SelectionError> {
        if self.is_missing_size() {
            return self.blocked(SelectionError::SizeRequired);
        }

        if self.is_out_of_stock() {
            return self.blocked(SelectionError::OutOfStock);
        }

        let artwork = self.artwork;
        let variant_id = self.variant.map(|variant| variant.id.as_str());

        Ok(Some(CartLineItem {
            id: line_item_id(&artwork.id, variant_id, created_at),
            artwork_id: artwork.id.clone(),
            title: artwork.name.clone(),
            price: self.total_price(),
            quantity: self.quantity,
            size: self.size.map(SizeSnapshot::from),
            variant: self.variant.map(VariantSnapshot::from),
            image_url: self
                .active_image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            category: artwork.category.clone(),
            delivery_note: String::new(),
        }))
    }

    fn blocked(&self, reason: SelectionError) -> Result<Option<CartLineItem>, SelectionError> {
        match self.policy {
            MissingSizePolicy::Ignore => {
                debug!(artwork = %self.artwork.id, %reason, "add to cart ignored");
                Ok(None)
            }
            MissingSizePolicy::Reject => Err(reason),
        }
    }

    /// Resolve the selection and hand the line item to the cart.
    ///
    /// Returns the id of the added line, or `None` if nothing was added.
    ///
    /// # Errors
    ///
    /// See [`ArtworkSelection::line_item`].
    pub fn add_to_cart(
        &self,
        cart: &mut impl CartAggregator,
        created_at: Timestamp,
    ) -> Result<Option<String>, SelectionError> {
        let Some(item) = self.line_item(created_at)? else {
            return Ok(None);
        };

        let id = item.id.clone();
        cart.add(item);

        Ok(Some(id))
    }
}
