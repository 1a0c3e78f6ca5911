//! Cart and order domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use juicebar_core::{Email, OrderId, OrderStatus, Price};

use super::product::Product;

/// One cart line: a product snapshot and how many units of it.
///
/// A cart holds at most one item per product id; adding an already-present
/// product increments its quantity instead of appending a duplicate line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// The extended price of this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.line_total(self.quantity)
    }
}

/// An immutable record of a completed cart-to-purchase transition.
///
/// Items and total are copied from the cart at placement time; later
/// catalog changes never alter a placed order. `status` is the only field
/// that changes afterwards, and only through an admin-privileged caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, stable identifier.
    pub id: OrderId,
    /// Email of the account that placed the order.
    pub user_id: Email,
    /// Cart contents at placement time.
    pub items: Vec<CartItem>,
    /// Sum of `price * quantity` over `items`, fixed at placement.
    pub total: Price,
    /// Lifecycle status, initially `pending`.
    pub status: OrderStatus,
    /// Placement timestamp.
    pub created_at: DateTime<Utc>,
}

/// Order query constraints.
///
/// Absent fields are unconstrained; present fields combine conjunctively.
/// Results keep the order list's insertion order.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Exact status match.
    pub status: Option<OrderStatus>,
    /// Case-insensitive substring match against the placing user's email.
    pub user_id: Option<String>,
    /// Calendar-day match against the placement timestamp (UTC date only,
    /// time of day ignored).
    pub date: Option<NaiveDate>,
}

impl OrderFilter {
    /// Whether `order` satisfies every present constraint.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        if let Some(needle) = &self.user_id
            && !order
                .user_id
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if let Some(date) = self.date
            && order.created_at.date_naive() != date
        {
            return false;
        }
        true
    }
}
