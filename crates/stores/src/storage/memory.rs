//! In-memory storage for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{StorageBackend, StorageError};

/// A backend that keeps collection documents in a process-local map.
///
/// Sharing one instance (via `Arc`) between store constructions simulates
/// a restart against the same durable state.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    collections: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, collection: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let collections = self
            .collections
            .lock()
            .map_err(|e| poisoned(collection, &e))?;
        Ok(collections.get(collection).cloned())
    }

    async fn write(&self, collection: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|e| poisoned(collection, &e))?;
        collections.insert(collection.to_owned(), bytes);
        Ok(())
    }

    async fn remove(&self, collection: &str) -> Result<(), StorageError> {
        let mut collections = self
            .collections
            .lock()
            .map_err(|e| poisoned(collection, &e))?;
        collections.remove(collection);
        Ok(())
    }
}

fn poisoned(collection: &str, err: &dyn std::fmt::Display) -> StorageError {
    StorageError::DataCorruption {
        collection: collection.to_owned(),
        message: format!("lock poisoned: {err}"),
    }
}
