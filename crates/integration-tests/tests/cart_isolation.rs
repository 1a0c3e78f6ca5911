//! Per-principal cart partitions: each account sees only its own cart,
//! the guest partition belongs to no account, and everything survives a
//! restart.

#![allow(clippy::unwrap_used)]

use juicebar_integration_tests::{TestContext, draft, signup_request};

#[tokio::test]
async fn switching_users_switches_the_visible_cart() {
    let ctx = TestContext::new().await;

    let mango = ctx
        .catalog
        .add(draft("Mango Blast", "smoothies", "6.00"))
        .await
        .unwrap();
    let beet = ctx.catalog.add(draft("Beet It", "juices", "4.75")).await.unwrap();

    // Anonymous browsing fills the guest partition
    ctx.orders.add_to_cart(&mango, 1).await.unwrap();

    // Alice signs up; her cart starts empty
    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    assert!(ctx.orders.cart().await.is_empty());
    ctx.orders.add_to_cart(&beet, 2).await.unwrap();

    // Bob sees neither the guest cart nor Alice's
    ctx.identity
        .signup(signup_request("Bob", "bob@shop.test", "press-play-7"))
        .await
        .unwrap();
    assert!(ctx.orders.cart().await.is_empty());

    // Back to Alice: her cart is intact
    ctx.identity
        .login("alice@shop.test", "squeeze-12")
        .await
        .unwrap();
    let cart = ctx.orders.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.first().unwrap().product.name, "Beet It");

    // And logging out reveals the guest partition again
    ctx.identity.logout().await.unwrap();
    let guest_cart = ctx.orders.cart().await;
    assert_eq!(guest_cart.first().unwrap().product.name, "Mango Blast");
}

#[tokio::test]
async fn session_and_cart_survive_a_restart() {
    let ctx = TestContext::new().await;

    let mango = ctx
        .catalog
        .add(draft("Mango Blast", "smoothies", "6.00"))
        .await
        .unwrap();

    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&mango, 3).await.unwrap();

    // Simulate a process restart over the same data directory
    let ctx = ctx.reopen().await;

    let user = ctx.identity.current_user().expect("session restored");
    assert_eq!(user.email.as_str(), "alice@shop.test");

    let cart = ctx.orders.cart().await;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.first().unwrap().quantity, 3);

    // The catalog came back too
    assert_eq!(ctx.catalog.list().await.len(), 1);
}

#[tokio::test]
async fn logout_does_not_leak_another_users_cart() {
    let ctx = TestContext::new().await;

    let mango = ctx
        .catalog
        .add(draft("Mango Blast", "smoothies", "6.00"))
        .await
        .unwrap();

    ctx.identity
        .signup(signup_request("Alice", "alice@shop.test", "squeeze-12"))
        .await
        .unwrap();
    ctx.orders.add_to_cart(&mango, 1).await.unwrap();
    ctx.identity.logout().await.unwrap();

    assert!(ctx.orders.cart().await.is_empty());
}
