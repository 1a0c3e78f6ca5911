//! Full purchase lifecycle over file-backed storage: stock the catalog,
//! sign up, shop, place an order, and transition it as admin.

#![allow(clippy::unwrap_used)]

use juicebar_core::{OrderStatus, Price, Role};
use juicebar_integration_tests::{TestContext, draft, signup_request};
use juicebar_stores::models::OrderFilter;

#[tokio::test]
async fn full_purchase_lifecycle() {
    let ctx = TestContext::new().await;

    // Stock the catalog
    let mango = ctx
        .catalog
        .add(draft("Mango Blast", "smoothies", "6.00"))
        .await
        .unwrap();
    let beet = ctx.catalog.add(draft("Beet It", "juices", "4.75")).await.unwrap();

    // A shopper signs up and fills their cart
    let shopper = ctx
        .identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    assert_eq!(shopper.role, Role::User);

    ctx.orders.add_to_cart(&mango, 2).await.unwrap();
    ctx.orders.add_to_cart(&beet, 1).await.unwrap();
    ctx.orders.add_to_cart(&mango, 1).await.unwrap();

    let cart = ctx.orders.cart().await;
    assert_eq!(cart.len(), 2, "repeat adds merge into one line");
    assert_eq!(cart.first().unwrap().quantity, 3);

    // Place the order: 3 x 6.00 + 1 x 4.75
    let order = ctx.orders.place_order().await.unwrap();
    assert_eq!(order.total, Price::parse("22.75").unwrap());
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(ctx.orders.cart().await.is_empty());

    // Catalog edits after placement don't rewrite the order
    ctx.catalog
        .update(mango.id, draft("Mango Blast XL", "smoothies", "9.99"))
        .await
        .unwrap();
    let recorded = ctx.orders.orders().await;
    let recorded_mango = recorded
        .first()
        .unwrap()
        .items
        .iter()
        .find(|i| i.product.id == mango.id)
        .unwrap();
    assert_eq!(recorded_mango.product.name, "Mango Blast");
    assert_eq!(recorded_mango.product.price, Price::parse("6.00").unwrap());

    // The admin account transitions the order
    let admin = ctx
        .identity
        .signup(signup_request("Admin", "admin@example.com", "press-play-7"))
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin);

    ctx.orders
        .update_order_status(order.id, OrderStatus::Shipped)
        .await
        .unwrap();

    let shipped = ctx
        .orders
        .filter_orders(&OrderFilter {
            status: Some(OrderStatus::Shipped),
            ..OrderFilter::default()
        })
        .await;
    assert_eq!(shipped.len(), 1);
    assert_eq!(shipped.first().unwrap().id, order.id);
}

#[tokio::test]
async fn placement_requires_a_signed_in_user() {
    let ctx = TestContext::new().await;

    let juice = ctx.catalog.add(draft("Tea", "tea", "3.00")).await.unwrap();
    ctx.orders.add_to_cart(&juice, 1).await.unwrap();

    // Anonymous placement is rejected and the guest cart survives
    assert!(ctx.orders.place_order().await.is_err());
    assert_eq!(ctx.orders.cart().await.len(), 1);
    assert!(ctx.orders.orders().await.is_empty());
}

#[tokio::test]
async fn status_transitions_are_admin_only() {
    let ctx = TestContext::new().await;

    let juice = ctx.catalog.add(draft("Tea", "tea", "3.00")).await.unwrap();
    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&juice, 1).await.unwrap();
    let order = ctx.orders.place_order().await.unwrap();

    // A regular shopper cannot transition their own order
    let err = ctx
        .orders
        .update_order_status(order.id, OrderStatus::Delivered)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "admin privileges required");

    let status = ctx.orders.orders().await.first().unwrap().status;
    assert_eq!(status, OrderStatus::Pending);
}
