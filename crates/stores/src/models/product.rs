//! Product domain types.

use serde::{Deserialize, Serialize};

use juicebar_core::{Price, ProductId};

/// A sellable product.
///
/// The `id` is assigned by the catalog store at creation time and is stable
/// for the product's lifetime. Carts and orders carry clones of this record
/// as snapshots, so later catalog edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Category tag (e.g. "juices").
    pub category: String,
    /// Whether the product can currently be added to a cart.
    pub is_available: bool,
    /// Image URL.
    pub image: String,
}

/// Input for creating or updating a product.
///
/// `is_available` defaults to `true` and `image` to the configured
/// placeholder (on create) or the existing image (on update) when absent.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: Price,
    pub is_available: Option<bool>,
    pub image: Option<String>,
}

/// Catalog search constraints.
///
/// Absent fields are unconstrained; present fields combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<Price>,
    /// Inclusive upper price bound.
    pub price_max: Option<Price>,
    /// Exact availability match.
    pub is_available: Option<bool>,
}

impl SearchFilters {
    /// Whether `product` satisfies every present constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category
            && product.category != *category
        {
            return false;
        }
        if let Some(min) = self.price_min
            && product.price < min
        {
            return false;
        }
        if let Some(max) = self.price_max
            && product.price > max
        {
            return false;
        }
        if let Some(available) = self.is_available
            && product.is_available != available
        {
            return false;
        }
        true
    }
}
