//! Cart commands.

use std::error::Error;

use juicebar_core::{Price, ProductId};

use super::Stores;

/// Add a catalog product to the current cart.
///
/// # Errors
///
/// Returns an error on an invalid or unknown product id, an unavailable
/// product, or a store failure.
pub async fn add(stores: &Stores, product_id: &str, quantity: u32) -> Result<(), Box<dyn Error>> {
    let id: ProductId = product_id.parse()?;
    let product = stores
        .catalog
        .get_by_id(id)
        .await
        .ok_or_else(|| format!("no product with id {id}"))?;

    stores.orders.add_to_cart(&product, quantity).await?;
    println!("added {quantity} x {} to cart", product.name);
    Ok(())
}

/// Print the cart and its subtotal.
pub async fn list(stores: &Stores) {
    let items = stores.orders.cart().await;
    if items.is_empty() {
        println!("cart is empty");
        return;
    }

    let subtotal: Price = items.iter().map(|i| i.line_total()).sum();
    for item in &items {
        println!(
            "{}  {} x {:<24} {}",
            item.product.id,
            item.quantity,
            item.product.name,
            item.line_total()
        );
    }
    println!("subtotal: {subtotal}");
}

/// Remove a product's line from the cart.
///
/// # Errors
///
/// Returns an error on an invalid id or a store failure.
pub async fn remove(stores: &Stores, product_id: &str) -> Result<(), Box<dyn Error>> {
    let id: ProductId = product_id.parse()?;
    if stores.orders.remove_from_cart(id).await? {
        println!("removed {id} from cart");
    } else {
        println!("{id} is not in the cart");
    }
    Ok(())
}

/// Set a cart line's quantity exactly.
///
/// # Errors
///
/// Returns an error on an invalid id, a zero quantity, a product that is
/// not in the cart, or a store failure.
pub async fn set_quantity(
    stores: &Stores,
    product_id: &str,
    quantity: u32,
) -> Result<(), Box<dyn Error>> {
    let id: ProductId = product_id.parse()?;
    stores.orders.update_quantity(id, quantity).await?;
    println!("set {id} to {quantity}");
    Ok(())
}

/// Clear the current cart.
///
/// # Errors
///
/// Returns an error on a store failure.
pub async fn reset(stores: &Stores) -> Result<(), Box<dyn Error>> {
    stores.orders.reset_cart().await?;
    println!("cart cleared");
    Ok(())
}
