//! Catalog commands.

use std::error::Error;

use juicebar_core::{Price, ProductId};
use juicebar_stores::models::{ProductDraft, SearchFilters};

use super::Stores;

/// Raw draft fields as collected from the command line.
pub struct DraftArgs {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image: Option<String>,
    pub unavailable: bool,
}

impl DraftArgs {
    fn into_draft(self) -> Result<ProductDraft, Box<dyn Error>> {
        Ok(ProductDraft {
            name: self.name,
            category: self.category,
            price: Price::parse(&self.price)?,
            description: self.description,
            is_available: self.unavailable.then_some(false),
            image: self.image,
        })
    }
}

/// Print every product in insertion order.
pub async fn list(stores: &Stores) {
    print_products(&stores.catalog.list().await);
}

/// Add a product and print its assigned id.
///
/// # Errors
///
/// Returns an error on invalid input or a store failure.
pub async fn add(stores: &Stores, args: DraftArgs) -> Result<(), Box<dyn Error>> {
    let product = stores.catalog.add(args.into_draft()?).await?;
    println!("added {} ({})", product.name, product.id);
    Ok(())
}

/// Replace a product's fields.
///
/// # Errors
///
/// Returns an error on invalid input, an unknown id, or a store failure.
pub async fn update(stores: &Stores, id: &str, args: DraftArgs) -> Result<(), Box<dyn Error>> {
    let id: ProductId = id.parse()?;
    let product = stores.catalog.update(id, args.into_draft()?).await?;
    println!("updated {} ({})", product.name, product.id);
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error on an invalid id or a store failure.
pub async fn remove(stores: &Stores, id: &str) -> Result<(), Box<dyn Error>> {
    let id: ProductId = id.parse()?;
    if stores.catalog.remove(id).await? {
        println!("removed {id}");
    } else {
        println!("no product with id {id}");
    }
    Ok(())
}

/// Search the catalog and print the hits.
///
/// # Errors
///
/// Returns an error if a price bound does not parse.
pub async fn search(
    stores: &Stores,
    query: &str,
    category: Option<String>,
    price_min: Option<String>,
    price_max: Option<String>,
    available: Option<bool>,
) -> Result<(), Box<dyn Error>> {
    let filters = SearchFilters {
        category,
        price_min: price_min.as_deref().map(Price::parse).transpose()?,
        price_max: price_max.as_deref().map(Price::parse).transpose()?,
        is_available: available,
    };

    print_products(&stores.catalog.search(query, &filters).await);
    Ok(())
}

/// Clear the catalog entirely.
///
/// # Errors
///
/// Returns an error on a store failure.
pub async fn reset(stores: &Stores) -> Result<(), Box<dyn Error>> {
    stores.catalog.reset_all().await?;
    println!("catalog cleared");
    Ok(())
}

fn print_products(products: &[juicebar_stores::models::Product]) {
    if products.is_empty() {
        println!("no products");
        return;
    }
    for p in products {
        let availability = if p.is_available { "" } else { "  (unavailable)" };
        println!(
            "{}  {:<24} {:>8}  {}{}",
            p.id, p.name, p.price, p.category, availability
        );
    }
}
