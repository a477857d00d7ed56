//! # Repository Module
//!
//! SQLite implementations of the storefront-cart ports.
//!
//! ```text
//! CartService
//!   ├── Arc<dyn CatalogReader> ◄── CatalogRepository
//!   │                                ├── find_product / get_by_id
//!   │                                ├── insert
//!   │                                └── set_active / set_price / set_variant_stock
//!   │
//!   └── Arc<dyn CartStore>     ◄── CartRepository
//!                                    ├── get_by_owner
//!                                    ├── create (cart + first lines)
//!                                    └── save (version-checked)
//! ```
//!
//! Queries are built at runtime (`sqlx::query_as` + `FromRow`) so the crate
//! builds without a prepared offline query cache.

pub mod cart;
pub mod catalog;
