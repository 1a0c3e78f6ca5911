//! Command handlers.
//!
//! Each submodule wraps one store's operations with argument parsing and
//! terminal output; all of them run against the same wired-up [`Stores`].

pub mod account;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod seed;

use std::error::Error;
use std::sync::Arc;

use juicebar_stores::storage::{FileBackend, StorageBackend};
use juicebar_stores::{CatalogStore, IdentityStore, OrderStore, PrincipalProvider, StoreConfig};

/// The three store instances wired behind one file backend.
pub struct Stores {
    pub catalog: CatalogStore,
    pub orders: OrderStore,
    pub identity: Arc<IdentityStore>,
}

/// Open all stores against the configured data directory.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a persisted collection
/// cannot be read.
pub async fn open_stores() -> Result<Stores, Box<dyn Error>> {
    let config = StoreConfig::from_env()?;
    let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(&config.data_dir));

    let identity = Arc::new(IdentityStore::open(Arc::clone(&backend), &config).await?);
    let catalog = CatalogStore::open(Arc::clone(&backend), &config).await?;
    let orders = OrderStore::open(
        backend,
        Arc::clone(&identity) as Arc<dyn PrincipalProvider>,
    )
    .await?;

    Ok(Stores {
        catalog,
        orders,
        identity,
    })
}
