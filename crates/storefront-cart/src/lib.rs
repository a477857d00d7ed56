//! # storefront-cart: Cart Service for the Storefront
//!
//! Turns `(product, color, size, quantity)` selections into consistent cart
//! state, enforcing stock limits read from a live catalog, and re-validates
//! the whole cart at checkout.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  storefront-api route                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-cart (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   CartService ──► CartLocks (one async mutex per user)          │   │
//! │  │       │                                                         │   │
//! │  │       ├──► dyn CatalogReader   (find_product)                   │   │
//! │  │       ├──► dyn CartStore       (get_by_owner / create / save)   │   │
//! │  │       └──► storefront-core     (merge rules, totals, checks)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  storefront-db (SQLite)          memory (in-process, tests)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`] - `CartService` operations
//! - [`ports`] - `CatalogReader` and `CartStore` collaborator traits
//! - [`locks`] - per-user async lock registry
//! - [`memory`] - in-memory catalog and cart store
//! - [`config`] - `CartConfig` and `ReadPolicy`
//! - [`views`] - request bodies and response shapes
//! - [`error`] - collaborator error type

pub mod config;
pub mod error;
pub mod locks;
pub mod memory;
pub mod ports;
pub mod service;
pub mod views;

pub use config::{CartConfig, ReadPolicy};
pub use error::{StoreError, StoreResult};
pub use locks::CartLocks;
pub use memory::{InMemoryCartStore, InMemoryCatalog};
pub use ports::{CartStore, CatalogReader};
pub use service::CartService;
pub use views::{
    AddItemRequest, CartLine, CartView, CheckoutView, RemoveItemRequest, UpdateQuantityRequest,
};
