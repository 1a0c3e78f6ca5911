//! Order commands.

use std::error::Error;

use chrono::NaiveDate;

use juicebar_core::{OrderId, OrderStatus};
use juicebar_stores::models::OrderFilter;

use super::Stores;

/// Place an order from the current cart.
///
/// # Errors
///
/// Returns an error when anonymous, on an empty cart, or on a store
/// failure.
pub async fn place(stores: &Stores) -> Result<(), Box<dyn Error>> {
    let order = stores.orders.place_order().await?;
    println!(
        "order {} placed: {} item(s), total {}",
        order.id,
        order.items.len(),
        order.total
    );
    Ok(())
}

/// List orders, optionally filtered by status, user substring, and day.
///
/// # Errors
///
/// Returns an error if a filter value does not parse.
pub async fn list(
    stores: &Stores,
    status: Option<String>,
    user: Option<String>,
    date: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let filter = OrderFilter {
        status: status.as_deref().map(str::parse).transpose()?,
        user_id: user,
        date: date
            .as_deref()
            .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
            .transpose()?,
    };

    let orders = stores.orders.filter_orders(&filter).await;
    if orders.is_empty() {
        println!("no orders");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {}  {:<10} {:>8}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status,
            order.total.to_string(),
            order.user_id
        );
    }
    Ok(())
}

/// Replace an order's status (admin only).
///
/// # Errors
///
/// Returns an error on an invalid id or status, a non-admin session, an
/// unknown order, or a store failure.
pub async fn set_status(stores: &Stores, id: &str, status: &str) -> Result<(), Box<dyn Error>> {
    let id: OrderId = id.parse()?;
    let status: OrderStatus = status.parse()?;

    stores.orders.update_order_status(id, status).await?;
    println!("order {id} is now {status}");
    Ok(())
}

/// Clear the order list.
///
/// # Errors
///
/// Returns an error on a store failure.
pub async fn reset(stores: &Stores) -> Result<(), Box<dyn Error>> {
    stores.orders.reset_orders().await?;
    println!("orders cleared");
    Ok(())
}
