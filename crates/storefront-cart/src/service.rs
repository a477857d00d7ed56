//! # Cart Service
//!
//! Orchestrates every cart operation over the injected catalog and cart
//! store.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(user, {productId, color, size, quantity})                     │
//! │       │                                                                 │
//! │       ├─► require user id                        ─► Unauthenticated     │
//! │       ├─► validate selection + quantity          ─► Validation          │
//! │       ├─► acquire user's lock (CartLocks)                               │
//! │       │                                                                 │
//! │       │   ┌──────────────── attempt (≤ max_write_attempts) ───────────┐ │
//! │       │   │ store.get_by_owner                                        │ │
//! │       │   │ catalog.find_product   (fresh on every attempt)           │ │
//! │       │   │ Cart::add_selection    (merge / stock rules, in memory)   │ │
//! │       │   │ store.create (first add) or store.save (version CAS)      │ │
//! │       │   │      └── Conflict ─► next attempt                         │ │
//! │       │   └───────────────────────────────────────────────────────────┘ │
//! │       ▼                                                                 │
//! │  CartView                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed operation never writes: every mutation runs on an in-memory
//! copy and is saved only after it fully succeeded. Checkout reads the cart
//! straight from the store, never through the self-healing read, and never
//! writes anything.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use storefront_core::validation::{validate_add_quantity, validate_update_quantity};
use storefront_core::{
    check_line, Cart, CartError, CartResult, Product, QuantityChange, Selection, Variant,
    VariantKey,
};
use tracing::{debug, error, info, warn};

use crate::config::{CartConfig, ReadPolicy};
use crate::error::StoreError;
use crate::locks::CartLocks;
use crate::ports::{CartStore, CatalogReader};
use crate::views::{
    AddItemRequest, CartView, CheckoutView, RemoveItemRequest, UpdateQuantityRequest,
};

/// Result of one optimistic write attempt.
enum Attempt<T> {
    Done(T),
    Conflict,
}

/// The cart engine.
///
/// ## Usage
/// ```rust,ignore
/// let service = CartService::new(catalog, store, CartConfig::default());
///
/// let view = service
///     .add_item("user-1", AddItemRequest::new("p-1", "Black", "M", 2))
///     .await?;
/// ```
pub struct CartService {
    catalog: Arc<dyn CatalogReader>,
    store: Arc<dyn CartStore>,
    locks: CartLocks,
    config: CartConfig,
}

impl CartService {
    pub fn new(
        catalog: Arc<dyn CatalogReader>,
        store: Arc<dyn CartStore>,
        config: CartConfig,
    ) -> Self {
        CartService {
            catalog,
            store,
            locks: CartLocks::new(),
            config,
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Returns the user's cart.
    ///
    /// Under [`ReadPolicy::SelfHeal`] this is [`reconcile_cart`](Self::reconcile_cart).
    /// Under [`ReadPolicy::FlagStale`] nothing is written and unavailable
    /// lines come back flagged.
    pub async fn get_cart(&self, user_id: &str) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        debug!(user_id = %owner, policy = %self.config.read_policy, "Getting cart");

        match self.config.read_policy {
            ReadPolicy::SelfHeal => self.reconcile_cart(owner).await,
            ReadPolicy::FlagStale => {
                let Some(cart) = self.store.get_by_owner(owner).await? else {
                    return Ok(CartView::empty());
                };
                let usable = self.usability(&cart).await?;
                Ok(CartView::with_stale(&cart, |item| {
                    !usable.get(&item.product_id).copied().unwrap_or(false)
                }))
            }
        }
    }

    /// Drops lines whose product is missing or inactive and saves the cart
    /// if anything was dropped.
    pub async fn reconcile_cart(&self, user_id: &str) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        let _guard = self.locks.acquire(owner).await;

        let cart = self
            .with_retry(owner, "reconcile", move || self.try_reconcile(owner))
            .await?;

        Ok(cart.as_ref().map_or_else(CartView::empty, CartView::from_cart))
    }

    /// Adds a selection, merging into an existing line when the same
    /// `(productId, color, size)` is already in the cart.
    pub async fn add_item(&self, user_id: &str, request: AddItemRequest) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        let selection = Selection::parse(
            request.product_id.as_deref(),
            request.color.as_deref(),
            request.size.as_deref(),
        )?;
        let quantity = validate_add_quantity(request.quantity)?;

        debug!(
            user_id = %owner,
            product_id = %selection.product_id,
            color = %selection.color,
            size = %selection.size,
            quantity,
            "Adding item to cart"
        );

        let _guard = self.locks.acquire(owner).await;
        let selection = &selection;
        let cart = self
            .with_retry(owner, "add_item", move || self.try_add(owner, selection, quantity))
            .await?;

        Ok(CartView::from_cart(&cart))
    }

    /// Sets a line's quantity. `0` removes the line.
    pub async fn update_quantity(
        &self,
        user_id: &str,
        request: UpdateQuantityRequest,
    ) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        let selection = Selection::parse(
            request.product_id.as_deref(),
            request.color.as_deref(),
            request.size.as_deref(),
        )?;
        let quantity = validate_update_quantity(request.quantity)?;

        debug!(
            user_id = %owner,
            product_id = %selection.product_id,
            color = %selection.color,
            size = %selection.size,
            quantity,
            "Updating cart item quantity"
        );

        let _guard = self.locks.acquire(owner).await;
        let selection = &selection;
        let cart = self
            .with_retry(owner, "update_quantity", move || {
                self.try_update(owner, selection, quantity)
            })
            .await?;

        Ok(CartView::from_cart(&cart))
    }

    pub async fn remove_item(
        &self,
        user_id: &str,
        request: RemoveItemRequest,
    ) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        let selection = Selection::parse(
            request.product_id.as_deref(),
            request.color.as_deref(),
            request.size.as_deref(),
        )?;

        debug!(
            user_id = %owner,
            product_id = %selection.product_id,
            color = %selection.color,
            size = %selection.size,
            "Removing item from cart"
        );

        let _guard = self.locks.acquire(owner).await;
        let selection = &selection;
        let cart = self
            .with_retry(owner, "remove_item", move || self.try_remove(owner, selection))
            .await?;

        Ok(CartView::from_cart(&cart))
    }

    /// Empties the cart. Succeeds for users without a cart.
    pub async fn clear_cart(&self, user_id: &str) -> CartResult<CartView> {
        let owner = authenticated(user_id)?;
        debug!(user_id = %owner, "Clearing cart");

        let _guard = self.locks.acquire(owner).await;
        let cart = self
            .with_retry(owner, "clear_cart", move || self.try_clear(owner))
            .await?;

        Ok(cart.as_ref().map_or_else(CartView::empty, CartView::from_cart))
    }

    /// Re-validates every line against the live catalog and prices the cart.
    ///
    /// ## Fail Fast
    /// Lines are checked in cart order and the first failing line decides
    /// the error; later lines are not looked at.
    pub async fn checkout(&self, user_id: &str) -> CartResult<CheckoutView> {
        let owner = authenticated(user_id)?;
        debug!(user_id = %owner, "Validating cart for checkout");

        let cart = match self.store.get_by_owner(owner).await? {
            Some(cart) if !cart.is_empty() => cart,
            _ => return Err(CartError::EmptyCart),
        };

        for item in &cart.items {
            let product = self.catalog.find_product(&item.product_id).await?;
            if let Err(err) = check_line(item, product.as_ref()) {
                debug!(user_id = %owner, product_id = %item.product_id, error = %err, "Checkout rejected");
                return Err(err);
            }
        }

        let view = CheckoutView::new(&cart, &self.config.currency);
        info!(
            user_id = %owner,
            total_quantity = view.summary.total_quantity,
            subtotal = %view.summary.subtotal,
            "Checkout validated"
        );
        Ok(view)
    }

    // =========================================================================
    // Attempts
    // =========================================================================

    async fn try_add(
        &self,
        owner: &str,
        selection: &Selection,
        quantity: u32,
    ) -> CartResult<Attempt<Cart>> {
        let stored = self.store.get_by_owner(owner).await?;
        let product = self.usable_product(&selection.product_id).await?;
        let variant = resolve_variant(&product, selection)?;

        let is_new = stored.is_none();
        let mut draft = stored.unwrap_or_else(|| Cart::new(owner));
        draft.add_selection(&product, variant, quantity)?;

        self.commit(draft, is_new).await
    }

    async fn try_update(
        &self,
        owner: &str,
        selection: &Selection,
        quantity: u32,
    ) -> CartResult<Attempt<Cart>> {
        let mut cart = self
            .store
            .get_by_owner(owner)
            .await?
            .ok_or(CartError::CartNotFound)?;

        // An unknown color or size cannot be in the cart either.
        selection
            .variant_key()
            .filter(|key| cart.find_item(&selection.product_id, *key).is_some())
            .ok_or(CartError::ItemNotFound)?;

        let product = self.usable_product(&selection.product_id).await?;
        let variant = resolve_variant(&product, selection)?;

        if cart.set_quantity(&product, variant, quantity)? == QuantityChange::Removed {
            debug!(user_id = %owner, product_id = %selection.product_id, "Quantity 0 removed line");
        }

        self.commit(cart, false).await
    }

    async fn try_remove(&self, owner: &str, selection: &Selection) -> CartResult<Attempt<Cart>> {
        let mut cart = self
            .store
            .get_by_owner(owner)
            .await?
            .ok_or(CartError::CartNotFound)?;

        let key = selection.variant_key().ok_or(CartError::ItemNotFound)?;
        cart.remove_item(&selection.product_id, key)?;

        self.commit(cart, false).await
    }

    async fn try_clear(&self, owner: &str) -> CartResult<Attempt<Option<Cart>>> {
        let Some(mut cart) = self.store.get_by_owner(owner).await? else {
            return Ok(Attempt::Done(None));
        };
        if cart.is_empty() {
            return Ok(Attempt::Done(Some(cart)));
        }

        cart.clear();
        Ok(match self.commit(cart, false).await? {
            Attempt::Done(saved) => Attempt::Done(Some(saved)),
            Attempt::Conflict => Attempt::Conflict,
        })
    }

    async fn try_reconcile(&self, owner: &str) -> CartResult<Attempt<Option<Cart>>> {
        let Some(mut cart) = self.store.get_by_owner(owner).await? else {
            return Ok(Attempt::Done(None));
        };

        let usable = self.usability(&cart).await?;
        let dropped =
            cart.retain_items(|item| usable.get(&item.product_id).copied().unwrap_or(false));
        if dropped == 0 {
            return Ok(Attempt::Done(Some(cart)));
        }

        warn!(user_id = %owner, dropped, "Dropping unavailable products from cart");
        Ok(match self.commit(cart, false).await? {
            Attempt::Done(saved) => Attempt::Done(Some(saved)),
            Attempt::Conflict => Attempt::Conflict,
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Runs `attempt` until it is not rejected by a version conflict.
    async fn with_retry<T, F, Fut>(&self, owner: &str, operation: &str, mut attempt: F) -> CartResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CartResult<Attempt<T>>>,
    {
        let max = self.config.max_write_attempts.max(1);
        for n in 1..=max {
            match attempt().await? {
                Attempt::Done(value) => return Ok(value),
                Attempt::Conflict => {
                    warn!(user_id = %owner, operation, attempt = n, "Cart version conflict");
                }
            }
        }

        error!(user_id = %owner, operation, attempts = max, "Giving up after repeated cart conflicts");
        Err(CartError::Internal(format!(
            "cart for {} kept changing during {}",
            owner, operation
        )))
    }

    /// Persists a draft. A cart that was never stored is created with its
    /// lines in one write.
    async fn commit(&self, draft: Cart, is_new: bool) -> CartResult<Attempt<Cart>> {
        let written = if is_new {
            self.store.create(&draft).await
        } else {
            self.store.save(&draft).await
        };

        match written {
            Ok(saved) => {
                if is_new {
                    info!(user_id = %saved.owner_id, cart_id = %saved.id, "Cart created");
                }
                Ok(Attempt::Done(saved))
            }
            Err(StoreError::Conflict { .. }) => Ok(Attempt::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    /// Product that exists and is active, or `ProductNotFound`.
    async fn usable_product(&self, product_id: &str) -> CartResult<Product> {
        self.catalog
            .find_product(product_id)
            .await?
            .filter(Product::is_usable)
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))
    }

    /// Whether each distinct product in the cart is currently usable.
    async fn usability(&self, cart: &Cart) -> CartResult<HashMap<String, bool>> {
        let mut usable = HashMap::new();
        for item in &cart.items {
            if usable.contains_key(&item.product_id) {
                continue;
            }
            let ok = self
                .catalog
                .find_product(&item.product_id)
                .await?
                .is_some_and(|p| p.is_usable());
            usable.insert(item.product_id.clone(), ok);
        }
        Ok(usable)
    }
}

/// The owner id exactly as the identity layer issued it. Blank ids are
/// rejected, other ids are never normalized.
fn authenticated(user_id: &str) -> CartResult<&str> {
    if user_id.trim().is_empty() {
        return Err(CartError::Unauthenticated);
    }
    Ok(user_id)
}

/// Exact `(color, size)` lookup; unknown enumeration values match nothing.
fn resolve_variant<'p>(product: &'p Product, selection: &Selection) -> CartResult<&'p Variant> {
    selection
        .variant_key()
        .and_then(|key: VariantKey| product.variant(key))
        .ok_or_else(|| CartError::VariantNotAvailable {
            product_id: product.id.clone(),
            color: selection.color.clone(),
            size: selection.size.clone(),
        })
}
