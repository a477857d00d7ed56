//! # storefront-db: SQLite Persistence
//!
//! Durable catalog and cart storage behind the ports defined in
//! `storefront-cart`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront-api (HTTP handlers)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartService ── CatalogReader / CartStore (traits)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐   ┌────────────┐  │   │
//! │  │   │   Database    │    │   Repositories    │   │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ CatalogRepository │   │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ CartRepository    │   │ 001_init   │  │   │
//! │  │   └───────────────┘    └───────────────────┘   └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (STOREFRONT_DB_PATH, default ./storefront.db)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_cart::{CartConfig, CartService};
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./storefront.db")).await?;
//! let service = CartService::new(
//!     Arc::new(db.catalog()),
//!     Arc::new(db.carts()),
//!     CartConfig::default(),
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::catalog::CatalogRepository;
