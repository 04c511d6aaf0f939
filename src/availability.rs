//! Availability

use crate::artworks::{Artwork, ColorVariant};

/// Whether the artwork, with the given variant selected, can not currently be bought.
///
/// Paintings and sketches are one-off pieces, so their stock is read from quantities: the
/// selected variant's quantity for ready-made work, otherwise the artwork's own quantity. Only
/// a quantity of exactly zero counts as sold out. Every other category uses the stock flag set
/// by an administrator.
pub fn is_out_of_stock(artwork: &Artwork, variant: Option<&ColorVariant>) -> bool {
    if !artwork.is_quantity_tracked() {
        return artwork.is_out_of_stock;
    }

    match variant {
        Some(variant) if artwork.order_type.is_ready_made() => variant.is_depleted(),
        _ => artwork.quantity == Some(0),
    }
}
