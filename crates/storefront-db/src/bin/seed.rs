//! # Seed Data Generator
//!
//! Populates the database with demo collections and products.
//!
//! ## Usage
//! ```bash
//! # Generate 100 products (default)
//! cargo run -p storefront-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p storefront-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db
//! ```
//!
//! ## Generated Data
//! One collection per category below. Products are every name in the
//! category combined with a size suffix, and the first product of each
//! collection becomes its featured product. Prices fall between 1.99
//! and 9.99 plus a size addon; inventory between 0 and 100.

use std::env;
use storefront_core::validation::validate_slug;
use storefront_core::{Money, NewCollection, NewProduct};
use storefront_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Collections and the product names seeded into each.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &[
            "Sparkling Water",
            "Orange Juice",
            "Apple Juice",
            "Lemonade",
            "Iced Tea",
            "Cold Brew",
        ],
    ),
    (
        "Snacks",
        &[
            "Sea Salt Chips",
            "Pretzels",
            "Trail Mix",
            "Dark Chocolate",
            "Oat Cookies",
            "Popcorn",
        ],
    ),
    (
        "Grocery",
        &[
            "Whole Wheat Bread",
            "Spaghetti",
            "Brown Rice",
            "Canned Tomatoes",
            "Peanut Butter",
            "Honey",
        ],
    ),
    (
        "Beauty",
        &[
            "Hand Cream",
            "Lip Balm",
            "Shampoo",
            "Conditioner",
            "Face Wash",
            "Sunscreen",
        ],
    ),
];

/// Size variants and their price addon in cents.
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 200),
    ("Family", 350),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 100;
    let mut db_path = String::from("./storefront.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 100)");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Storefront Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.collections().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} collections", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut collections = Vec::with_capacity(CATEGORIES.len());
    for (title, _) in CATEGORIES {
        let collection = db
            .collections()
            .insert(&NewCollection {
                title: title.to_string(),
                featured_product_id: None,
            })
            .await?;
        collections.push(collection);
    }
    println!("✓ Created {} collections", collections.len());

    println!();
    println!("Generating products...");
    let start = std::time::Instant::now();

    let mut generated = 0;
    let mut seed = 0;

    'outer: for (size_name, price_addon) in SIZES {
        for ((title, names), collection) in CATEGORIES.iter().zip(collections.iter_mut()) {
            for name in names.iter() {
                if generated >= count {
                    break 'outer;
                }

                let product =
                    generate_product(name, size_name, *price_addon, collection.id, seed);
                seed += 1;

                let stored = match db.products().insert(&product).await {
                    Ok(stored) => stored,
                    Err(e) => {
                        eprintln!("Failed to insert {} into {}: {}", product.slug, title, e);
                        continue;
                    }
                };

                // Feature the first product of each collection
                if collection.featured_product_id.is_none() {
                    *collection = db
                        .collections()
                        .update(
                            collection.id,
                            &NewCollection {
                                title: collection.title.clone(),
                                featured_product_id: Some(stored.id),
                            },
                        )
                        .await?;
                }

                generated += 1;
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);
    if generated < count {
        println!("  (ran out of unique name/size combinations)");
    }

    for summary in db.collections().list_with_counts().await? {
        println!("  {:<12} {} products", summary.title, summary.products_count);
    }
    println!("  {:<12} {} products", "Total", db.products().count().await?);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one product from a name, size, and seed index.
fn generate_product(
    name: &str,
    size_name: &str,
    price_addon: i64,
    collection_id: i64,
    seed: usize,
) -> NewProduct {
    let title = format!("{} {}", name, size_name);

    let slug = title.to_lowercase().replace(' ', "-");
    let slug = validate_slug(&slug).unwrap_or_else(|_| format!("product-{}", seed));

    // 1.99 - 9.99 + size addon
    let base_price = 199 + ((seed * 17) % 800) as i64;

    NewProduct {
        title,
        description: Some(format!("{} ({})", name, size_name.to_lowercase())),
        slug,
        inventory: (seed % 101) as i64,
        unit_price: Money::from_cents(base_price + price_addon),
        collection_id,
    }
}
