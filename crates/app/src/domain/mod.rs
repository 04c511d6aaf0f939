//! Atelier Domain Concerns

pub mod artworks;
pub mod catalog;
