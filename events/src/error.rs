//! Error types for catalog construction.

use crate::types::EventId;
use thiserror::Error;

/// Errors raised while building an [`EventCatalog`](crate::EventCatalog)
///
/// Lookups never fail; a missing id is `None`, not an error.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two events share an id
    #[error("duplicate event id: {0}")]
    DuplicateId(EventId),

    /// Catalog JSON could not be parsed
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
