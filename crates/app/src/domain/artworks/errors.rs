//! Artworks service errors.

use atelier::documents::DocumentError;
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Error)]
pub enum ArtworksServiceError {
    #[error("artwork not found")]
    NotFound,

    #[error("invalid artwork document")]
    InvalidDocument(#[from] DocumentError),

    #[error("document store error")]
    Gateway(#[source] GatewayError),
}

impl From<GatewayError> for ArtworksServiceError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Document(error) => Self::InvalidDocument(error),
            error => Self::Gateway(error),
        }
    }
}
