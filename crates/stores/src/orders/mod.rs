//! Cart & order store: per-user carts and the global order list.
//!
//! Carts are a first-class per-owner partition: one partition per account
//! (keyed by lowercased email) plus a guest partition for anonymous
//! browsing. The current partition is resolved through the injected
//! [`PrincipalProvider`], so switching users switches the visible cart.
//!
//! Placing an order is a single logical transaction: the order is appended
//! and the cart cleared together, or neither happens. As everywhere in this
//! layer, durable writes precede the in-memory commit.

mod error;

pub use error::OrderError;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use juicebar_core::{OrderId, OrderStatus, ProductId};

use crate::identity::PrincipalProvider;
use crate::last_error::LastError;
use crate::models::{CartItem, Order, OrderFilter, Product, Profile};
use crate::storage::{self, StorageBackend, collections};

/// Key of the cart partition used when no user is authenticated.
const GUEST_CART: &str = "guest";

#[derive(Debug, Default, Clone)]
struct OrdersState {
    /// Cart partitions keyed by owner (lowercased email, or [`GUEST_CART`]).
    carts: BTreeMap<String, Vec<CartItem>>,
    /// Placed orders, insertion order.
    orders: Vec<Order>,
}

/// Per-user carts and the global order list.
pub struct OrderStore {
    backend: Arc<dyn StorageBackend>,
    identity: Arc<dyn PrincipalProvider>,
    state: Mutex<OrdersState>,
    last_error: LastError,
}

impl OrderStore {
    /// Open the store, loading persisted carts and orders.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` if a persisted document cannot be read
    /// or decoded.
    pub async fn open(
        backend: Arc<dyn StorageBackend>,
        identity: Arc<dyn PrincipalProvider>,
    ) -> Result<Self, OrderError> {
        let carts: BTreeMap<String, Vec<CartItem>> =
            storage::load(backend.as_ref(), collections::CART)
                .await?
                .unwrap_or_default();
        let orders: Vec<Order> = storage::load(backend.as_ref(), collections::ORDERS)
            .await?
            .unwrap_or_default();

        debug!(
            cart_partitions = carts.len(),
            orders = orders.len(),
            "order store loaded"
        );

        Ok(Self {
            backend,
            identity,
            state: Mutex::new(OrdersState { carts, orders }),
            last_error: LastError::new(),
        })
    }

    /// The current principal's cart, in insertion order.
    pub async fn cart(&self) -> Vec<CartItem> {
        let key = self.cart_key();
        self.state
            .lock()
            .await
            .carts
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// Add `quantity` units of `product` to the current cart.
    ///
    /// If the product is already in the cart the quantity is incremented,
    /// never duplicated into a second line.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::OutOfStock` if the product is unavailable,
    /// `OrderError::InvalidQuantity` if `quantity` is zero, or
    /// `OrderError::Storage` if persisting fails.
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) -> Result<(), OrderError> {
        self.last_error.clear();
        self.finish(self.merge_into_cart(product, quantity).await)
    }

    /// Remove a product's line from the current cart.
    ///
    /// Returns `true` if a line was removed, `false` if the product wasn't
    /// in the cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` if persisting fails.
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<bool, OrderError> {
        self.last_error.clear();
        self.finish(self.drop_from_cart(product_id).await)
    }

    /// Set a cart line's quantity exactly (not additively).
    ///
    /// # Errors
    ///
    /// Returns `OrderError::InvalidQuantity` if `quantity` is below 1,
    /// `OrderError::NotInCart` if the product has no line, or
    /// `OrderError::Storage` if persisting fails.
    pub async fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), OrderError> {
        self.last_error.clear();
        self.finish(self.replace_quantity(product_id, quantity).await)
    }

    /// Turn the current cart into a placed order.
    ///
    /// Computes the total as the exact sum of `price * quantity` over a
    /// snapshot of the cart, records the order with a fresh id and
    /// `pending` status, and clears the cart. All-or-nothing: on any
    /// failure both the cart and the order list are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::AuthenticationRequired` when anonymous,
    /// `OrderError::EmptyCart` when there is nothing to place, or
    /// `OrderError::Storage` if persisting fails.
    pub async fn place_order(&self) -> Result<Order, OrderError> {
        self.last_error.clear();
        self.finish(self.checkout().await)
    }

    /// Replace an order's status.
    ///
    /// Requires the current principal to hold the admin role; statuses are
    /// validated at the [`OrderStatus`] parse boundary before they can
    /// reach this call.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::AdminRequired` for non-admin callers,
    /// `OrderError::OrderNotFound` on an unknown id, or
    /// `OrderError::Storage` if persisting fails.
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        self.last_error.clear();
        self.finish(self.transition_order(order_id, status).await)
    }

    /// All placed orders, in insertion order.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }

    /// Orders satisfying every present filter constraint, in insertion
    /// order. An empty filter returns everything.
    pub async fn filter_orders(&self, filter: &OrderFilter) -> Vec<Order> {
        self.state
            .lock()
            .await
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect()
    }

    /// Clear the current principal's cart.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` if persisting fails.
    pub async fn reset_cart(&self) -> Result<(), OrderError> {
        self.last_error.clear();
        let key = self.cart_key();
        let result = async {
            let mut state = self.state.lock().await;
            let mut next = state.carts.clone();
            next.remove(&key);
            storage::persist(self.backend.as_ref(), collections::CART, &next).await?;
            state.carts = next;
            debug!(cart = %key, "cart cleared");
            Ok(())
        }
        .await;
        self.finish(result)
    }

    /// Clear the order list entirely.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Storage` if persisting fails.
    pub async fn reset_orders(&self) -> Result<(), OrderError> {
        self.last_error.clear();
        let result = async {
            let mut state = self.state.lock().await;
            let next: Vec<Order> = Vec::new();
            storage::persist(self.backend.as_ref(), collections::ORDERS, &next).await?;
            state.orders = next;
            info!("orders reset");
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

    /// The current principal's cart partition key.
    fn cart_key(&self) -> String {
        self.identity
            .current_principal()
            .map_or_else(|| GUEST_CART.to_owned(), |p| p.email.normalized())
    }

    async fn merge_into_cart(&self, product: &Product, quantity: u32) -> Result<(), OrderError> {
        if quantity < 1 {
            return Err(OrderError::InvalidQuantity);
        }
        if !product.is_available {
            return Err(OrderError::OutOfStock(product.name.clone()));
        }

        let key = self.cart_key();
        let mut state = self.state.lock().await;

        let mut next = state.carts.clone();
        let items = next.entry(key.clone()).or_default();
        if let Some(item) = items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            items.push(CartItem {
                product: product.clone(),
                quantity,
            });
        }

        storage::persist(self.backend.as_ref(), collections::CART, &next).await?;
        state.carts = next;

        debug!(cart = %key, product_id = %product.id, quantity, "added to cart");
        Ok(())
    }

    async fn drop_from_cart(&self, product_id: ProductId) -> Result<bool, OrderError> {
        let key = self.cart_key();
        let mut state = self.state.lock().await;

        let Some(items) = state.carts.get(&key) else {
            return Ok(false);
        };
        if !items.iter().any(|i| i.product.id == product_id) {
            return Ok(false);
        }

        let mut next = state.carts.clone();
        if let Some(items) = next.get_mut(&key) {
            items.retain(|i| i.product.id != product_id);
        }

        storage::persist(self.backend.as_ref(), collections::CART, &next).await?;
        state.carts = next;

        debug!(cart = %key, product_id = %product_id, "removed from cart");
        Ok(true)
    }

    async fn replace_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), OrderError> {
        if quantity < 1 {
            return Err(OrderError::InvalidQuantity);
        }

        let key = self.cart_key();
        let mut state = self.state.lock().await;

        let mut next = state.carts.clone();
        let item = next
            .get_mut(&key)
            .and_then(|items| items.iter_mut().find(|i| i.product.id == product_id))
            .ok_or(OrderError::NotInCart(product_id))?;
        item.quantity = quantity;

        storage::persist(self.backend.as_ref(), collections::CART, &next).await?;
        state.carts = next;

        debug!(cart = %key, product_id = %product_id, quantity, "cart quantity set");
        Ok(())
    }

    async fn checkout(&self) -> Result<Order, OrderError> {
        let principal: Profile = self
            .identity
            .current_principal()
            .ok_or(OrderError::AuthenticationRequired)?;
        let key = principal.email.normalized();

        let mut state = self.state.lock().await;

        let items = state.carts.get(&key).cloned().unwrap_or_default();
        if items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let total = items.iter().map(CartItem::line_total).sum();
        let order = Order {
            id: OrderId::generate(),
            user_id: principal.email.clone(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        // Both documents must be durable before either commit to memory.
        let mut next_orders = state.orders.clone();
        next_orders.push(order.clone());
        let mut next_carts = state.carts.clone();
        next_carts.remove(&key);

        storage::persist(self.backend.as_ref(), collections::ORDERS, &next_orders).await?;
        storage::persist(self.backend.as_ref(), collections::CART, &next_carts).await?;
        state.orders = next_orders;
        state.carts = next_carts;

        info!(order_id = %order.id, user = %order.user_id, total = %order.total, "order placed");
        Ok(order)
    }

    async fn transition_order(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let is_admin = self
            .identity
            .current_principal()
            .is_some_and(|p| p.role.is_admin());
        if !is_admin {
            return Err(OrderError::AdminRequired);
        }

        let mut state = self.state.lock().await;

        let position = state
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or(OrderError::OrderNotFound(order_id))?;

        let mut next = state.orders.clone();
        if let Some(order) = next.get_mut(position) {
            order.status = status;
        }

        storage::persist(self.backend.as_ref(), collections::ORDERS, &next).await?;
        state.orders = next;

        info!(order_id = %order_id, status = %status, "order status updated");
        Ok(())
    }

    fn finish<T>(&self, result: Result<T, OrderError>) -> Result<T, OrderError> {
        if let Err(err) = &result {
            self.last_error.record(err);
        }
        result
    }
}
