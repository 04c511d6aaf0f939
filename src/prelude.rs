//! Atelier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    artworks::{
        Artwork, CategoryRef, ColorVariant, DescriptionField, DisplayImage, MediaType, OrderType,
        SizeOption,
    },
    availability::is_out_of_stock,
    cart::{Cart, CartAggregator, CartLineItem, SizeSnapshot, VariantSnapshot},
    catalog::{Artist, Banner, Category, HomeCollection, StoreConfiguration},
    categories::{MenuItem, TreeItem, TreeNode, build_tree},
    documents::{Document, DocumentError, FromDocument, collections},
    emails::{Customer, Order, order_notification_html, thank_you_html},
    gallery::{PLACEHOLDER_IMAGE_URL, build_gallery, resolve_active_image},
    pricing::{PricingError, calculate_price, format_price, parse_currency},
    selection::{ArtworkSelection, MissingSizePolicy, PriceSummary, SelectionError},
    sitemap::{ChangeFrequency, Sitemap, SitemapEntry, SitemapError},
};
