//! # Catalog Repository
//!
//! Products and their variant grids.
//!
//! ## Tables
//! ```text
//! products                      product_variants
//! ┌──────────────┐              ┌──────────────────────────────┐
//! │ id (PK)      │◄─────────────│ product_id                   │
//! │ name         │   1 ─── n    │ color, size   (PK with id)   │
//! │ price_cents  │              │ stock                        │
//! │ is_active    │              │ position   (listing order)   │
//! └──────────────┘              └──────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use storefront_cart::{CatalogReader, StoreResult};
use storefront_core::{Color, Money, Product, Size, Variant, VariantKey, VariantSet};
use tracing::debug;

use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: Option<String>,
    price_cents: i64,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct VariantRow {
    color: Color,
    size: Size,
    stock: i64,
}

impl VariantRow {
    fn into_variant(self) -> DbResult<Variant> {
        let stock = u32::try_from(self.stock)
            .map_err(|_| DbError::corrupt("product_variants", format!("stock {}", self.stock)))?;
        Ok(Variant::new(self.color, self.size, stock))
    }
}

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a product and its variants in one transaction.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, variant) in product.variants.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO product_variants (product_id, color, size, stock, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&product.id)
            .bind(variant.color)
            .bind(variant.size)
            .bind(i64::from(variant.stock))
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(product_id = %product.id, variants = product.variants.len(), "Inserted product");
        Ok(())
    }

    /// Returns the product whether or not it is active.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price_cents, is_active, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let variant_rows: Vec<VariantRow> = sqlx::query_as(
            r#"
            SELECT color, size, stock
            FROM product_variants
            WHERE product_id = ?1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let variants = variant_rows
            .into_iter()
            .map(VariantRow::into_variant)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            is_active: row.is_active,
            variants: VariantSet::new(variants),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }

    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE products SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(active)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }
        Ok(())
    }

    /// Changes the list price. Lines already in carts keep their snapshot.
    pub async fn set_price(&self, id: &str, price: Money) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE products SET price_cents = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(price.cents())
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }
        Ok(())
    }

    pub async fn set_variant_stock(&self, id: &str, key: VariantKey, stock: u32) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE product_variants SET stock = ?1
            WHERE product_id = ?2 AND color = ?3 AND size = ?4
            "#,
        )
        .bind(i64::from(stock))
        .bind(id)
        .bind(key.color)
        .bind(key.size)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Variant", format!("{id} {key}")));
        }
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CatalogReader for CatalogRepository {
    async fn find_product(&self, product_id: &str) -> StoreResult<Option<Product>> {
        Ok(self.get_by_id(product_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CatalogRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().catalog()
    }

    fn tee() -> Product {
        Product::new(
            "Oversized Tee",
            Money::from_cents(2000),
            vec![
                Variant::new(Color::Purple, Size::XL, 2),
                Variant::new(Color::Black, Size::M, 5),
            ],
        )
        .with_id("tee")
        .with_description("Heavyweight cotton")
    }

    #[tokio::test]
    async fn test_insert_and_get_preserves_variant_order() {
        let repo = repo().await;
        repo.insert(&tee()).await.unwrap();

        let product = repo.get_by_id("tee").await.unwrap().unwrap();

        assert_eq!(product.name, "Oversized Tee");
        assert_eq!(product.description.as_deref(), Some("Heavyweight cotton"));
        assert_eq!(product.price, Money::from_cents(2000));
        let keys: Vec<String> = product.variants.iter().map(|v| v.key().to_string()).collect();
        assert_eq!(keys, ["Purple/XL", "Black/M"]);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_product_is_none() {
        let repo = repo().await;
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
        assert!(repo.find_product("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_product_is_still_returned() {
        let repo = repo().await;
        repo.insert(&tee()).await.unwrap();
        repo.set_active("tee", false).await.unwrap();

        let product = repo.find_product("tee").await.unwrap().unwrap();
        assert!(!product.is_usable());
    }

    #[tokio::test]
    async fn test_mutators() {
        let repo = repo().await;
        repo.insert(&tee()).await.unwrap();
        let key = VariantKey::new(Color::Black, Size::M);

        repo.set_price("tee", Money::from_cents(2500)).await.unwrap();
        repo.set_variant_stock("tee", key, 1).await.unwrap();

        let product = repo.get_by_id("tee").await.unwrap().unwrap();
        assert_eq!(product.price, Money::from_cents(2500));
        assert_eq!(product.variant(key).unwrap().stock, 1);

        let missing = VariantKey::new(Color::White, Size::S);
        assert!(matches!(
            repo.set_variant_stock("tee", missing, 1).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.set_active("nope", true).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
