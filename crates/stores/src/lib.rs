//! Juicebar Stores - the storefront's state and persistence layer.
//!
//! Three cooperating state managers, each owning one slice of domain data
//! and exposing an imperative API to whatever drives them (the CLI here,
//! a UI shell in a full deployment):
//!
//! - [`catalog::CatalogStore`] - the product catalog: system of record for
//!   availability and pricing
//! - [`orders::OrderStore`] - per-user carts and the global order list
//! - [`identity::IdentityStore`] - the account registry and current session
//!
//! # Architecture
//!
//! Stores keep authoritative state in memory and mirror it to an injected
//! [`storage::StorageBackend`] after every mutation. The order store
//! resolves the current cart partition through the
//! [`identity::PrincipalProvider`] seam; the catalog is independent of the
//! other two. Mutations are serialized per store and committed to memory
//! only after the durable write succeeds, so a rejected or failed operation
//! never leaves partial state behind.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod identity;
pub mod last_error;
pub mod models;
pub mod orders;
pub mod storage;

pub use catalog::{CatalogError, CatalogStore};
pub use config::{ConfigError, StoreConfig};
pub use identity::{AuthError, IdentityStore, PrincipalProvider};
pub use orders::{OrderError, OrderStore};
