//! Integration tests for Juicebar.
//!
//! These tests exercise the three stores together over real file-backed
//! storage in a temp directory, the way the CLI wires them up.
//!
//! # Test Categories
//!
//! - `purchase_lifecycle` - Seed, sign up, shop, place, transition
//! - `cart_isolation` - Per-principal cart partitions and restarts
//! - `order_filters` - Conjunctive order queries

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tempfile::TempDir;

use juicebar_core::Price;
use juicebar_stores::models::{ProductDraft, SignupRequest};
use juicebar_stores::storage::{FileBackend, StorageBackend};
use juicebar_stores::{CatalogStore, IdentityStore, OrderStore, PrincipalProvider, StoreConfig};

/// All three stores wired behind one file backend in a temp directory.
pub struct TestContext {
    pub config: StoreConfig,
    pub identity: Arc<IdentityStore>,
    pub catalog: CatalogStore,
    pub orders: OrderStore,
    dir: TempDir,
}

impl TestContext {
    /// Create a fresh context over an empty temp directory.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or a store cannot be created.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = StoreConfig::build(
            dir.path().display().to_string(),
            "admin@example.com".to_owned(),
            "https://placehold.co/600x400".to_owned(),
        )
        .expect("build config");

        Self::open(dir, config).await
    }

    /// Rebuild every store over the same data directory, simulating a
    /// process restart.
    ///
    /// # Panics
    ///
    /// Panics if a store cannot be reopened.
    pub async fn reopen(self) -> Self {
        let Self { config, dir, .. } = self;
        Self::open(dir, config).await
    }

    async fn open(dir: TempDir, config: StoreConfig) -> Self {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(&config.data_dir));

        let identity = Arc::new(
            IdentityStore::open(Arc::clone(&backend), &config)
                .await
                .expect("open identity store"),
        );
        let catalog = CatalogStore::open(Arc::clone(&backend), &config)
            .await
            .expect("open catalog store");
        let orders = OrderStore::open(backend, Arc::clone(&identity) as Arc<dyn PrincipalProvider>)
            .await
            .expect("open order store");

        Self {
            config,
            identity,
            catalog,
            orders,
            dir,
        }
    }
}

/// A product draft with the given name, category, and price.
///
/// # Panics
///
/// Panics if `price` is not a valid price.
#[must_use]
pub fn draft(name: &str, category: &str, price: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_owned(),
        category: category.to_owned(),
        price: Price::parse(price).expect("valid price"),
        ..ProductDraft::default()
    }
}

/// A well-formed signup request for `email`.
#[must_use]
pub fn signup_request(name: &str, email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: password.to_owned(),
        phone: "555-0100".to_owned(),
    }
}
