//! Durable storage for store state.
//!
//! The chosen persistence strategy is a local durable store: key-value
//! persistence keyed by logical collection name, read once on store
//! initialization and rewritten after every mutation. Stores are
//! storage-agnostic; a backend is constructor-injected as
//! `Arc<dyn StorageBackend>`.
//!
//! ## Collections
//!
//! - `products` - Catalog snapshot, insertion order
//! - `cart` - Per-owner cart partitions
//! - `orders` - Placed orders, insertion order
//! - `users` - Registered accounts
//! - `token` - Current session (principal + token)

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Logical collection names used by the stores.
pub mod collections {
    /// Catalog snapshot.
    pub const PRODUCTS: &str = "products";
    /// Per-owner cart partitions.
    pub const CART: &str = "cart";
    /// Placed orders.
    pub const ORDERS: &str = "orders";
    /// Registered accounts.
    pub const USERS: &str = "users";
    /// Current session.
    pub const TOKEN: &str = "token";
}

/// Errors that can occur during storage operations.
///
/// These are the "system is unreachable" kind, as opposed to the stores'
/// validation and domain-rule errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying medium failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document could not be decoded.
    #[error("data corruption in collection {collection}: {message}")]
    DataCorruption {
        /// Collection whose document failed to decode.
        collection: String,
        /// Decoder failure message.
        message: String,
    },
}

/// Key-value persistence keyed by logical collection name.
///
/// A collection holds one opaque document: the full serialized snapshot of
/// a store's state slice. Absent collections read as `None`.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a collection's document, `None` if it has never been written.
    async fn read(&self, collection: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace a collection's document.
    async fn write(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StorageError>;

    /// Delete a collection's document; succeeds if it is already absent.
    async fn remove(&self, collection: &str) -> Result<(), StorageError>;
}

/// Load and deserialize a collection snapshot, `None` if absent.
///
/// # Errors
///
/// Returns [`StorageError::DataCorruption`] if the stored document does not
/// decode as `T`, or the backend's error if the read fails.
pub async fn load<T: DeserializeOwned>(
    backend: &dyn StorageBackend,
    collection: &str,
) -> Result<Option<T>, StorageError> {
    match backend.read(collection).await? {
        Some(bytes) => {
            let value =
                serde_json::from_slice(&bytes).map_err(|e| StorageError::DataCorruption {
                    collection: collection.to_owned(),
                    message: e.to_string(),
                })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Serialize and persist a collection snapshot.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] if the value does not serialize,
/// or the backend's error if the write fails.
pub async fn persist<T: Serialize + ?Sized>(
    backend: &dyn StorageBackend,
    collection: &str,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    backend.write(collection, bytes).await
}
