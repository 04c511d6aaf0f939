//! Gallery
//!
//! The detail page gallery is the artwork's own images followed by the first image of each
//! colour variant, de-duplicated by URL with the first occurrence kept.

use rustc_hash::FxHashSet;

use crate::artworks::{Artwork, ColorVariant, DisplayImage};

/// Image shown when an artwork has nothing to display.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder-artwork.png";

/// Build the de-duplicated gallery for an artwork.
pub fn build_gallery(artwork: &Artwork) -> Vec<DisplayImage> {
    let variant_images = artwork.variants.iter().filter_map(ColorVariant::first_image);

    dedup_by_url(artwork.images.iter().chain(variant_images))
}

/// De-duplicate images by URL, preserving order. The first occurrence wins.
pub fn dedup_by_url<'a>(images: impl IntoIterator<Item = &'a DisplayImage>) -> Vec<DisplayImage> {
    let mut seen = FxHashSet::default();

    images
        .into_iter()
        .filter(|&image| seen.insert(image.url.as_str()))
        .cloned()
        .collect()
}

/// Resolve which image the detail page should show after the selection changed.
///
/// With a variant selected, its first image becomes active; a variant without images leaves
/// the current image in place. With no variant selected the gallery's first image is shown.
/// Call after every selection mutation.
pub fn resolve_active_image(
    gallery: &[DisplayImage],
    variant: Option<&ColorVariant>,
    previous: Option<&str>,
) -> Option<String> {
    let first = || gallery.first().map(|image| image.url.clone());

    match variant {
        Some(variant) => match variant.first_image() {
            Some(image) if previous != Some(image.url.as_str()) => Some(image.url.clone()),
            _ => previous.map(ToString::to_string).or_else(first),
        },
        None => first(),
    }
}
