//! Catalog error types.

use thiserror::Error;

use juicebar_core::ProductId;

use crate::storage::StorageError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required draft field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No product with the given id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
