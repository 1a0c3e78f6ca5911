//! Catalog store: the system of record for products.
//!
//! Owns the insertion-ordered product list and supports create, update,
//! delete, search, and reset. Every mutation persists the full catalog
//! snapshot to the `products` collection and commits to memory only after
//! the write succeeds, so readers always observe a consistent view and a
//! failed mutation changes nothing.

mod error;

pub use error::CatalogError;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use juicebar_core::ProductId;

use crate::config::StoreConfig;
use crate::last_error::LastError;
use crate::models::{Product, ProductDraft, SearchFilters};
use crate::storage::{self, StorageBackend, collections};

/// The product catalog.
pub struct CatalogStore {
    backend: Arc<dyn StorageBackend>,
    placeholder_image: String,
    products: Mutex<Vec<Product>>,
    last_error: LastError,
}

impl CatalogStore {
    /// Open the catalog, loading any persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the persisted snapshot cannot be
    /// read or decoded.
    pub async fn open(
        backend: Arc<dyn StorageBackend>,
        config: &StoreConfig,
    ) -> Result<Self, CatalogError> {
        let products: Vec<Product> = storage::load(backend.as_ref(), collections::PRODUCTS)
            .await?
            .unwrap_or_default();

        debug!(count = products.len(), "catalog loaded");

        Ok(Self {
            backend,
            placeholder_image: config.placeholder_image.clone(),
            products: Mutex::new(products),
            last_error: LastError::new(),
        })
    }

    /// The full catalog, in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    /// Look up a product by id.
    pub async fn get_by_id(&self, id: ProductId) -> Option<Product> {
        self.products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Products whose name contains `query` (case-insensitive) and that
    /// satisfy every present filter, in insertion order.
    ///
    /// A blank query matches every name.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .lock()
            .await
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| filters.matches(p))
            .cloned()
            .collect()
    }

    /// Add a product to the catalog.
    ///
    /// Assigns a fresh id, defaults `is_available` to `true` unless the
    /// draft says otherwise, and defaults `image` to the configured
    /// placeholder. Returns the stored product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingField` if `name` or `category` is
    /// blank, or `CatalogError::Storage` if persisting fails.
    pub async fn add(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.last_error.clear();
        self.finish(self.insert(draft).await)
    }

    /// Replace a product's mutable fields.
    ///
    /// Same validation as [`add`](Self::add). When the draft omits the
    /// image, the existing image is kept (never reset to the placeholder).
    /// Returns the updated product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has the given id,
    /// `CatalogError::MissingField` on blank required fields, or
    /// `CatalogError::Storage` if persisting fails.
    pub async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        self.last_error.clear();
        self.finish(self.apply_update(id, draft).await)
    }

    /// Remove a product.
    ///
    /// Returns `true` if the product was removed, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if persisting fails.
    pub async fn remove(&self, id: ProductId) -> Result<bool, CatalogError> {
        self.last_error.clear();
        self.finish(self.delete(id).await)
    }

    /// Clear the catalog entirely.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if persisting fails.
    pub async fn reset_all(&self) -> Result<(), CatalogError> {
        self.last_error.clear();
        let result = async {
            let mut products = self.products.lock().await;
            let next: Vec<Product> = Vec::new();
            storage::persist(self.backend.as_ref(), collections::PRODUCTS, &next).await?;
            *products = next;
            info!("catalog reset");
            Ok(())
        }
        .await;
        self.finish(result)
    }

    /// Message of the most recent failed operation, for display layers.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.get()
    }

    async fn insert(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let draft = validated(draft)?;

        let mut products = self.products.lock().await;

        let product = Product {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            is_available: draft.is_available.unwrap_or(true),
            image: draft
                .image
                .unwrap_or_else(|| self.placeholder_image.clone()),
        };

        let mut next = products.clone();
        next.push(product.clone());
        storage::persist(self.backend.as_ref(), collections::PRODUCTS, &next).await?;
        *products = next;

        info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    async fn apply_update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, CatalogError> {
        let draft = validated(draft)?;

        let mut products = self.products.lock().await;

        let position = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        let mut next = products.clone();
        let slot = next.get_mut(position).ok_or(CatalogError::NotFound(id))?;

        let image = draft.image.unwrap_or_else(|| slot.image.clone());
        *slot = Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            is_available: draft.is_available.unwrap_or(true),
            image,
        };
        let updated = slot.clone();

        storage::persist(self.backend.as_ref(), collections::PRODUCTS, &next).await?;
        *products = next;

        info!(product_id = %id, "product updated");
        Ok(updated)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, CatalogError> {
        let mut products = self.products.lock().await;

        if !products.iter().any(|p| p.id == id) {
            return Ok(false);
        }

        let next: Vec<Product> = products.iter().filter(|p| p.id != id).cloned().collect();
        storage::persist(self.backend.as_ref(), collections::PRODUCTS, &next).await?;
        *products = next;

        info!(product_id = %id, "product removed");
        Ok(true)
    }

    fn finish<T>(&self, result: Result<T, CatalogError>) -> Result<T, CatalogError> {
        if let Err(err) = &result {
            self.last_error.record(err);
        }
        result
    }
}

/// Reject drafts with blank required fields.
fn validated(draft: ProductDraft) -> Result<ProductDraft, CatalogError> {
    if draft.name.trim().is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if draft.category.trim().is_empty() {
        return Err(CatalogError::MissingField("category"));
    }
    Ok(draft)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use juicebar_core::Price;

    async fn open_store() -> CatalogStore {
        let backend = Arc::new(MemoryBackend::new());
        CatalogStore::open(backend, &StoreConfig::default())
            .await
            .unwrap()
    }

    fn draft(name: &str, category: &str, price: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_owned(),
            category: category.to_owned(),
            price: Price::parse(price).unwrap(),
            ..ProductDraft::default()
        }
    }

    #[tokio::test]
    async fn test_add_assigns_defaults() {
        let store = open_store().await;

        let product = store.add(draft("Tea", "juices", "5")).await.unwrap();

        assert_eq!(product.name, "Tea");
        assert_eq!(product.price, Price::parse("5").unwrap());
        assert!(product.is_available);
        assert_eq!(product.image, "https://placehold.co/600x400");

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().unwrap(), &product);
    }

    #[tokio::test]
    async fn test_add_respects_explicit_unavailability() {
        let store = open_store().await;

        let product = store
            .add(ProductDraft {
                is_available: Some(false),
                image: Some("https://cdn.test/kale.png".to_owned()),
                ..draft("Kale Crush", "smoothies", "6.50")
            })
            .await
            .unwrap();

        assert!(!product.is_available);
        assert_eq!(product.image, "https://cdn.test/kale.png");
    }

    #[tokio::test]
    async fn test_add_rejects_blank_required_fields() {
        let store = open_store().await;

        let err = store.add(draft("", "juices", "5")).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingField("name")));

        let err = store.add(draft("Tea", "  ", "5")).await.unwrap_err();
        assert!(matches!(err, CatalogError::MissingField("category")));

        assert!(store.list().await.is_empty());
        assert_eq!(store.last_error(), Some("category is required".to_owned()));
    }

    #[tokio::test]
    async fn test_get_by_id_returns_added_product() {
        let store = open_store().await;

        let added = store.add(draft("Tea", "juices", "5")).await.unwrap();
        let fetched = store.get_by_id(added.id).await.unwrap();
        assert_eq!(fetched, added);

        assert!(store.get_by_id(ProductId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_image() {
        let store = open_store().await;

        let added = store
            .add(ProductDraft {
                image: Some("https://cdn.test/original.png".to_owned()),
                ..draft("Tea", "juices", "5")
            })
            .await
            .unwrap();

        let updated = store
            .update(added.id, draft("Green Tea", "tea", "5.50"))
            .await
            .unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.name, "Green Tea");
        assert_eq!(updated.category, "tea");
        // draft omitted the image: fall back to the existing one, not the placeholder
        assert_eq!(updated.image, "https://cdn.test/original.png");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_an_explicit_error() {
        let store = open_store().await;

        let err = store
            .update(ProductId::generate(), draft("Tea", "juices", "5"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_reports_presence() {
        let store = open_store().await;

        let added = store.add(draft("Tea", "juices", "5")).await.unwrap();

        assert!(store.remove(added.id).await.unwrap());
        assert!(!store.remove(added.id).await.unwrap());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_name_is_case_insensitive_substring() {
        let store = open_store().await;
        store.add(draft("Mango Blast", "juices", "4")).await.unwrap();
        store.add(draft("Beet It", "juices", "3")).await.unwrap();

        let hits = store.search("mango", &SearchFilters::default()).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().name, "Mango Blast");

        let all = store.search("", &SearchFilters::default()).await;
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_search_filters_are_conjunctive() {
        let store = open_store().await;
        store.add(draft("Mango Blast", "juices", "4")).await.unwrap();
        store
            .add(draft("Mango Lassi", "smoothies", "6"))
            .await
            .unwrap();

        let hits = store
            .search(
                "mango",
                &SearchFilters {
                    category: Some("smoothies".to_owned()),
                    price_min: Some(Price::parse("5").unwrap()),
                    ..SearchFilters::default()
                },
            )
            .await;

        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().unwrap().name, "Mango Lassi");
    }

    #[tokio::test]
    async fn test_reset_all_clears_catalog() {
        let store = open_store().await;
        store.add(draft("Tea", "juices", "5")).await.unwrap();

        store.reset_all().await.unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let backend = Arc::new(MemoryBackend::new());
        let config = StoreConfig::default();

        let store = CatalogStore::open(Arc::clone(&backend) as Arc<dyn StorageBackend>, &config)
            .await
            .unwrap();
        let added = store.add(draft("Tea", "juices", "5")).await.unwrap();
        drop(store);

        let reopened = CatalogStore::open(backend, &config).await.unwrap();
        assert_eq!(reopened.list().await, vec![added]);
    }
}
