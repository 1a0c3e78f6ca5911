//! Juicebar CLI - drive the storefront's state layer from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Put some products in the catalog
//! juicebar seed
//!
//! # Browse and search
//! juicebar catalog list
//! juicebar catalog search mango --category smoothies
//!
//! # Shop
//! juicebar account signup -n "Alice" -e alice@shop.test -p pw -c pw --phone 555-0100
//! juicebar cart add <product-id> --quantity 2
//! juicebar order place
//!
//! # Admin (sign up with the configured admin email first)
//! juicebar order set-status <order-id> shipped
//! juicebar order list --status shipped
//! ```
//!
//! # Commands
//!
//! - `seed` - Populate the catalog with sample products
//! - `catalog` - List, add, update, remove, search, reset
//! - `cart` - Add, list, remove, set-quantity, reset
//! - `order` - Place, list (with filters), set-status, reset
//! - `account` - Signup, login, logout, whoami

#![cfg_attr(not(test), forbid(unsafe_code))]
// CLI results are printed to stdout by design
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "juicebar")]
#[command(author, version, about = "Juicebar storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the catalog with sample products
    Seed,
    /// Manage the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the current user's cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place orders and manage their status
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Sign up, log in, and out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product in insertion order
    List,
    /// Add a product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Category tag (e.g. juices, smoothies, tea)
        #[arg(short, long)]
        category: String,

        /// Unit price, e.g. 4.50
        #[arg(short, long)]
        price: String,

        /// Free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Image URL (defaults to the configured placeholder)
        #[arg(long)]
        image: Option<String>,

        /// Mark the product as not available for sale
        #[arg(long)]
        unavailable: bool,
    },
    /// Replace a product's fields
    Update {
        /// Product id
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        price: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// New image URL (keeps the existing image when omitted)
        #[arg(long)]
        image: Option<String>,

        #[arg(long)]
        unavailable: bool,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },
    /// Search by name substring and optional filters
    Search {
        /// Case-insensitive name substring (empty matches everything)
        #[arg(default_value = "")]
        query: String,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        price_min: Option<String>,

        #[arg(long)]
        price_max: Option<String>,

        /// Filter by availability (true/false)
        #[arg(long)]
        available: Option<bool>,
    },
    /// Clear the catalog entirely
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a catalog product to the cart
    Add {
        /// Product id
        product_id: String,

        /// Units to add (added to any existing line)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show the cart and its subtotal
    List,
    /// Remove a product's line from the cart
    Remove {
        /// Product id
        product_id: String,
    },
    /// Set a line's quantity exactly
    SetQuantity {
        /// Product id
        product_id: String,

        /// New quantity (at least 1)
        quantity: u32,
    },
    /// Clear the cart
    Reset,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Place an order from the current cart
    Place,
    /// List orders, optionally filtered
    List {
        /// Exact status (pending, processing, shipped, delivered, cancelled)
        #[arg(long)]
        status: Option<String>,

        /// Case-insensitive substring of the placing user's email
        #[arg(long)]
        user: Option<String>,

        /// Placement day, YYYY-MM-DD (time of day ignored)
        #[arg(long)]
        date: Option<String>,
    },
    /// Replace an order's status (admin only)
    SetStatus {
        /// Order id
        id: String,

        /// New status (pending, processing, shipped, delivered, cancelled)
        status: String,
    },
    /// Clear the order list
    Reset,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Register a new account and sign in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Password confirmation
        #[arg(short, long)]
        confirm_password: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Clear the current session
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stores = commands::open_stores().await?;

    match cli.command {
        Commands::Seed => commands::seed::run(&stores).await?,
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&stores).await,
            CatalogAction::Add {
                name,
                category,
                price,
                description,
                image,
                unavailable,
            } => {
                commands::catalog::add(
                    &stores,
                    commands::catalog::DraftArgs {
                        name,
                        category,
                        price,
                        description,
                        image,
                        unavailable,
                    },
                )
                .await?;
            }
            CatalogAction::Update {
                id,
                name,
                category,
                price,
                description,
                image,
                unavailable,
            } => {
                commands::catalog::update(
                    &stores,
                    &id,
                    commands::catalog::DraftArgs {
                        name,
                        category,
                        price,
                        description,
                        image,
                        unavailable,
                    },
                )
                .await?;
            }
            CatalogAction::Remove { id } => commands::catalog::remove(&stores, &id).await?,
            CatalogAction::Search {
                query,
                category,
                price_min,
                price_max,
                available,
            } => {
                commands::catalog::search(&stores, &query, category, price_min, price_max, available)
                    .await?;
            }
            CatalogAction::Reset => commands::catalog::reset(&stores).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&stores, &product_id, quantity).await?,
            CartAction::List => commands::cart::list(&stores).await,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&stores, &product_id).await?;
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&stores, &product_id, quantity).await?,
            CartAction::Reset => commands::cart::reset(&stores).await?,
        },
        Commands::Order { action } => match action {
            OrderAction::Place => commands::order::place(&stores).await?,
            OrderAction::List { status, user, date } => {
                commands::order::list(&stores, status, user, date).await?;
            }
            OrderAction::SetStatus { id, status } => {
                commands::order::set_status(&stores, &id, &status).await?;
            }
            OrderAction::Reset => commands::order::reset(&stores).await?,
        },
        Commands::Account { action } => match action {
            AccountAction::Signup {
                name,
                email,
                password,
                confirm_password,
                phone,
            } => {
                commands::account::signup(&stores, name, email, password, confirm_password, phone)
                    .await?;
            }
            AccountAction::Login { email, password } => {
                commands::account::login(&stores, &email, &password).await?;
            }
            AccountAction::Logout => commands::account::logout(&stores).await?,
            AccountAction::Whoami => commands::account::whoami(&stores),
        },
    }
    Ok(())
}
