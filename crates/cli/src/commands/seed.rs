//! Seed the catalog with sample products.

use std::error::Error;

use tracing::info;

use juicebar_core::Price;
use juicebar_stores::models::ProductDraft;

use super::Stores;

/// Sample products: (name, category, price, description).
const SAMPLE_PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Orange Sunrise",
        "juices",
        "4.50",
        "Cold-pressed Valencia oranges",
    ),
    (
        "Green Machine",
        "juices",
        "5.25",
        "Kale, cucumber, celery, and a squeeze of lime",
    ),
    ("Beet It", "juices", "4.75", "Beetroot, carrot, and ginger"),
    (
        "Mango Lassi",
        "smoothies",
        "6.00",
        "Alphonso mango blended with yogurt",
    ),
    (
        "Berry Bliss",
        "smoothies",
        "5.75",
        "Strawberry, blueberry, and banana",
    ),
    ("Chamomile Tea", "tea", "3.00", "Loose-leaf, brewed to order"),
    ("Iced Matcha", "tea", "4.25", "Ceremonial grade, over ice"),
];

/// Populate the catalog with sample products.
///
/// Skips seeding if the catalog already has products, so re-running is
/// harmless.
///
/// # Errors
///
/// Returns an error on a store failure.
pub async fn run(stores: &Stores) -> Result<(), Box<dyn Error>> {
    let existing = stores.catalog.list().await;
    if !existing.is_empty() {
        println!(
            "catalog already has {} product(s), skipping seed",
            existing.len()
        );
        return Ok(());
    }

    for (name, category, price, description) in SAMPLE_PRODUCTS {
        let product = stores
            .catalog
            .add(ProductDraft {
                name: (*name).to_owned(),
                category: (*category).to_owned(),
                price: Price::parse(price)?,
                description: (*description).to_owned(),
                is_available: None,
                image: None,
            })
            .await?;
        info!(product_id = %product.id, name = %product.name, "seeded");
    }

    println!("seeded {} products", SAMPLE_PRODUCTS.len());
    Ok(())
}
