//! Artworks

pub mod errors;
pub mod service;

pub use errors::ArtworksServiceError;
pub use service::*;
