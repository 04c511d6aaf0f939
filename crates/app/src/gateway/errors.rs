//! Gateway errors.

use atelier::documents::DocumentError;
use thiserror::Error;

/// Errors that can occur when reading from the document store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured store address cannot carry document paths.
    #[error("invalid document store url: {0}")]
    InvalidBaseUrl(String),

    /// The store returned a non-2xx response or an unexpected body.
    #[error("unexpected response from document store: {0}")]
    UnexpectedResponse(String),

    /// A returned document was rejected at the boundary.
    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),
}
