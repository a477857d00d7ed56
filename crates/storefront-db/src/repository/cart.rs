//! # Cart Repository
//!
//! One cart per owner, with its lines stored in cart order.
//!
//! ## Versioned Save
//! ```text
//! BEGIN
//!   UPDATE carts SET version = version + 1
//!   WHERE id = :id AND version = :read_version      ── 0 rows? ──► Conflict
//!   DELETE FROM cart_items WHERE cart_id = :id
//!   INSERT INTO cart_items ... (position 0..n)
//! COMMIT
//! ```
//! Lines are rewritten wholesale on every save, so `position` always
//! follows the in-memory order. A new cart is inserted together with its
//! first lines in the same transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use storefront_cart::{CartStore, StoreResult};
use storefront_core::{Cart, CartItem, Color, Money, Size, VariantKey};
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct CartRow {
    id: String,
    owner_id: String,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct CartItemRow {
    product_id: String,
    color: Color,
    size: Size,
    quantity: i64,
    unit_price_cents: i64,
}

impl CartItemRow {
    fn into_item(self) -> DbResult<CartItem> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| DbError::corrupt("cart_items", format!("quantity {}", self.quantity)))?;
        Ok(CartItem {
            product_id: self.product_id,
            variant: VariantKey::new(self.color, self.size),
            quantity,
            unit_price: Money::from_cents(self.unit_price_cents),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> DbResult<Option<Cart>> {
        let row: Option<CartRow> = sqlx::query_as(
            r#"
            SELECT id, owner_id, version, created_at, updated_at
            FROM carts
            WHERE owner_id = ?1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows: Vec<CartItemRow> = sqlx::query_as(
            r#"
            SELECT product_id, color, size, quantity, unit_price_cents
            FROM cart_items
            WHERE cart_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(CartItemRow::into_item)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(Cart {
            id: row.id,
            owner_id: row.owner_id,
            items,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    /// Inserts a new cart and its lines in one transaction. A cart already
    /// existing for the owner is a [`DbError::Conflict`].
    pub async fn insert(&self, cart: &Cart) -> DbResult<Cart> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO carts (id, owner_id, version, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&cart.id)
        .bind(&cart.owner_id)
        .bind(cart.version)
        .bind(cart.created_at)
        .bind(cart.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from);

        match inserted {
            Ok(_) => {}
            Err(DbError::UniqueViolation { .. }) => {
                return Err(DbError::Conflict {
                    owner_id: cart.owner_id.clone(),
                })
            }
            Err(err) => return Err(err),
        }

        insert_items(&mut *tx, cart).await?;
        tx.commit().await?;

        debug!(
            user_id = %cart.owner_id,
            cart_id = %cart.id,
            items = cart.items.len(),
            "Created cart"
        );
        Ok(cart.clone())
    }

    /// Writes `cart` if the stored version still equals `cart.version`.
    pub async fn save_versioned(&self, cart: &Cart) -> DbResult<Cart> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE carts SET version = version + 1, updated_at = ?1
            WHERE id = ?2 AND owner_id = ?3 AND version = ?4
            "#,
        )
        .bind(now)
        .bind(&cart.id)
        .bind(&cart.owner_id)
        .bind(cart.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            // dropping tx rolls back
            return Err(DbError::Conflict {
                owner_id: cart.owner_id.clone(),
            });
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = ?1")
            .bind(&cart.id)
            .execute(&mut *tx)
            .await?;

        insert_items(&mut *tx, cart).await?;
        tx.commit().await?;

        debug!(
            cart_id = %cart.id,
            version = cart.version + 1,
            items = cart.items.len(),
            "Saved cart"
        );

        let mut saved = cart.clone();
        saved.version += 1;
        saved.updated_at = now;
        Ok(saved)
    }
}

async fn insert_items(conn: &mut SqliteConnection, cart: &Cart) -> DbResult<()> {
    for (position, item) in cart.items.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO cart_items
                (cart_id, product_id, color, size, quantity, unit_price_cents, position)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&cart.id)
        .bind(&item.product_id)
        .bind(item.variant.color)
        .bind(item.variant.size)
        .bind(i64::from(item.quantity))
        .bind(item.unit_price.cents())
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl CartStore for CartRepository {
    async fn get_by_owner(&self, owner_id: &str) -> StoreResult<Option<Cart>> {
        Ok(self.find_by_owner(owner_id).await?)
    }

    async fn create(&self, cart: &Cart) -> StoreResult<Cart> {
        Ok(self.insert(cart).await?)
    }

    async fn save(&self, cart: &Cart) -> StoreResult<Cart> {
        Ok(self.save_versioned(cart).await?)
    }
}
