//! Conjunctive order filtering across status, user substring, and
//! placement day.

#![allow(clippy::unwrap_used)]

use chrono::Duration;

use juicebar_core::OrderStatus;
use juicebar_integration_tests::{TestContext, draft, signup_request};
use juicebar_stores::models::OrderFilter;

#[tokio::test]
async fn filters_compose_conjunctively_and_preserve_order() {
    let ctx = TestContext::new().await;

    let juice = ctx.catalog.add(draft("Tea", "tea", "3.00")).await.unwrap();

    // Alice places two orders, Bob one
    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&juice, 1).await.unwrap();
    let first = ctx.orders.place_order().await.unwrap();
    ctx.orders.add_to_cart(&juice, 2).await.unwrap();
    let second = ctx.orders.place_order().await.unwrap();

    ctx.identity
        .signup(signup_request("Bob", "bob@shop.test", "press-play-7"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&juice, 1).await.unwrap();
    let bobs = ctx.orders.place_order().await.unwrap();

    // The admin ships Alice's second order
    ctx.identity
        .signup(signup_request("Admin", "admin@example.com", "cold-press-9"))
        .await
        .unwrap();
    ctx.orders
        .update_order_status(second.id, OrderStatus::Shipped)
        .await
        .unwrap();

    // Empty filter returns everything, in insertion order
    let all = ctx.orders.filter_orders(&OrderFilter::default()).await;
    assert_eq!(
        all.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![first.id, second.id, bobs.id]
    );

    // Status alone
    let pending = ctx
        .orders
        .filter_orders(&OrderFilter {
            status: Some(OrderStatus::Pending),
            ..OrderFilter::default()
        })
        .await;
    assert_eq!(
        pending.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![first.id, bobs.id]
    );

    // User substring is case-insensitive
    let alices = ctx
        .orders
        .filter_orders(&OrderFilter {
            user_id: Some("ALICE".to_owned()),
            ..OrderFilter::default()
        })
        .await;
    assert_eq!(alices.len(), 2);

    // Status and user together
    let alice_pending = ctx
        .orders
        .filter_orders(&OrderFilter {
            status: Some(OrderStatus::Pending),
            user_id: Some("alice".to_owned()),
            ..OrderFilter::default()
        })
        .await;
    assert_eq!(
        alice_pending.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![first.id]
    );
}

#[tokio::test]
async fn date_filter_matches_the_placement_day_only() {
    let ctx = TestContext::new().await;

    let juice = ctx.catalog.add(draft("Tea", "tea", "3.00")).await.unwrap();
    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&juice, 1).await.unwrap();
    let order = ctx.orders.place_order().await.unwrap();

    let placement_day = order.created_at.date_naive();

    let same_day = ctx
        .orders
        .filter_orders(&OrderFilter {
            date: Some(placement_day),
            ..OrderFilter::default()
        })
        .await;
    assert_eq!(same_day.len(), 1);

    let day_before = ctx
        .orders
        .filter_orders(&OrderFilter {
            date: Some(placement_day - Duration::days(1)),
            ..OrderFilter::default()
        })
        .await;
    assert!(day_before.is_empty());
}
