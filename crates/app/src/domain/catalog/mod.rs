//! Catalog

pub mod state;
pub mod store;

pub use state::FetchState;
pub use store::CatalogStore;
