//! Atelier
//!
//! Atelier is the storefront core of an online art marketplace: artwork variant pricing and
//! availability, cart line items, navigation trees, sitemaps and order emails.

pub mod artworks;
pub mod availability;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod documents;
pub mod emails;
pub mod fixtures;
pub mod gallery;
pub mod prelude;
pub mod pricing;
pub mod selection;
pub mod sitemap;

#[cfg(test)]
mod test_support;
