//! Cart and order error types.

use thiserror::Error;

use juicebar_core::{OrderId, ProductId};

use crate::storage::StorageError;

/// Errors that can occur during cart and order operations.
///
/// The domain-rule variants carry the message a display layer shows
/// verbatim; every rejection leaves the store's state untouched.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The product is not available for sale.
    #[error("product is out of stock: {0}")]
    OutOfStock(String),

    /// The cart has no items to place.
    #[error("cart is empty")]
    EmptyCart,

    /// Quantities must be at least 1.
    #[error("quantity cannot be less than 1")]
    InvalidQuantity,

    /// The product is not in the cart.
    #[error("product not in cart: {0}")]
    NotInCart(ProductId),

    /// Placing an order requires an authenticated user.
    #[error("sign in to place an order")]
    AuthenticationRequired,

    /// Order status transitions require the admin role.
    #[error("admin privileges required")]
    AdminRequired,

    /// No order with the given id.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
