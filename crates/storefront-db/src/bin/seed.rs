//! # Seed Data Generator
//!
//! Populates the catalog with demo apparel for local development.
//!
//! ## Usage
//! ```bash
//! cargo run -p storefront-db --bin seed
//! cargo run -p storefront-db --bin seed -- --db ./data/storefront.db --stock 25
//! ```
//!
//! Every product gets the full Black/White/Purple × S/M/L/XL grid with the
//! same stock on each variant. Ids are stable (`demo-001`, ...) so the
//! HTTP examples in the API docs work against a fresh database.

use std::env;
use storefront_core::{Money, Product, Variant, DEFAULT_VARIANT_STOCK};
use storefront_db::{Database, DbConfig};

/// (name, description, price in rupees)
const PRODUCTS: &[(&str, &str, i64)] = &[
    ("Oversized Tee", "Heavyweight cotton, drop shoulder", 499),
    ("Classic Hoodie", "Brushed fleece with kangaroo pocket", 1499),
    ("Crew Sweatshirt", "Loopback terry, ribbed cuffs", 1199),
    ("Polo Shirt", "Pique knit, two-button placket", 899),
    ("Joggers", "Tapered fit with elastic cuffs", 1299),
    ("Denim Jacket", "Rigid denim, button front", 2499),
    ("Cargo Shorts", "Six pockets, relaxed fit", 999),
    ("Linen Shirt", "Breathable linen blend", 1599),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./storefront.db");
    let mut stock = DEFAULT_VARIANT_STOCK;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--stock" | "-s" => {
                if i + 1 < args.len() {
                    stock = args[i + 1].parse().unwrap_or(DEFAULT_VARIANT_STOCK);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Storefront Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storefront.db)");
                println!(
                    "  -s, --stock <N>    Stock per variant (default: {})",
                    DEFAULT_VARIANT_STOCK
                );
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Storefront Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!("Stock per variant: {}", stock);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Inserting products...");

    let mut inserted = 0;
    for (index, (name, description, rupees)) in PRODUCTS.iter().enumerate() {
        let product = Product::new(*name, Money::from_major_minor(*rupees, 0), Variant::grid(stock))
            .with_id(format!("demo-{:03}", index + 1))
            .with_description(*description);

        if let Err(e) = db.catalog().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }

        println!("  {}  {:<16} INR {}", product.id, product.name, product.price);
        inserted += 1;
    }

    println!();
    println!("✓ Inserted {} products ({} variants each)", inserted, Variant::grid(stock).len());

    db.close().await;
    Ok(())
}
