//! App Context

use std::sync::Arc;

use atelier::{
    artworks::Artwork,
    cart::{Cart, CartAggregator},
    pricing::{PricingError, parse_currency},
    selection::{ArtworkSelection, MissingSizePolicy, SelectionError},
};
use jiff::Timestamp;
use rusty_money::iso::Currency;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::AppConfig,
    domain::{
        artworks::{ArtworksService, GatewayArtworksService},
        catalog::CatalogStore,
    },
    gateway::{DocumentStore, GatewayError, HttpDocumentStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to create document store client")]
    Gateway(#[source] GatewayError),

    #[error("invalid currency")]
    Currency(#[from] PricingError),
}

#[derive(Clone)]
pub struct AppContext {
    pub artworks: Arc<dyn ArtworksService>,
    pub catalog: Arc<CatalogStore>,
    pub cart: Arc<Mutex<Cart>>,
    pub currency: &'static Currency,
    pub missing_size_policy: MissingSizePolicy,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("currency", &self.currency)
            .field("missing_size_policy", &self.missing_size_policy)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the document store client cannot be created or the currency is
    /// not supported.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let store = HttpDocumentStore::new(config.gateway()).map_err(AppInitError::Gateway)?;
        let currency = parse_currency(&config.currency)?;

        Ok(Self::with_store(
            Arc::new(store),
            currency,
            config.missing_size_policy,
        ))
    }

    /// Build application context around an existing document store.
    #[must_use]
    pub fn with_store(
        store: Arc<dyn DocumentStore>,
        currency: &'static Currency,
        missing_size_policy: MissingSizePolicy,
    ) -> Self {
        Self {
            artworks: Arc::new(GatewayArtworksService::new(Arc::clone(&store))),
            catalog: Arc::new(CatalogStore::new(store)),
            cart: Arc::new(Mutex::new(Cart::new())),
            currency,
            missing_size_policy,
        }
    }

    /// Start a selection for an artwork using the configured currency and policy.
    #[must_use]
    pub fn selection<'a>(&self, artwork: &'a Artwork) -> ArtworkSelection<'a> {
        ArtworkSelection::new(artwork, self.currency).with_policy(self.missing_size_policy)
    }

    /// Resolve a selection and add it to the session cart.
    ///
    /// Returns the id of the new line, or `None` if nothing was added.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] when the selection is blocked and the policy rejects.
    pub async fn add_to_cart(
        &self,
        selection: &ArtworkSelection<'_>,
    ) -> Result<Option<String>, SelectionError> {
        let mut cart = self.cart.lock().await;
        let added = selection.add_to_cart(&mut *cart, Timestamp::now())?;

        if let Some(id) = &added {
            info!(line = %id, lines = cart.len(), "added to cart");
        }

        Ok(added)
    }

    /// Open or close the cart drawer.
    pub async fn toggle_cart(&self) {
        self.cart.lock().await.toggle();
    }
}
