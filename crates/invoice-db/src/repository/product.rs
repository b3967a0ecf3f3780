//! # Product Repository
//!
//! Database operations for products. Every statement is scoped by the owning
//! client, so a product id from another client behaves as missing.
//!
//! ## Column Mapping
//! ```text
//! products.name                   ──► Product.product_name
//! products.default_minutes_worked ──► Product.minutes_worked
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use invoice_core::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = r#"
    id,
    product_type,
    pricing_mode,
    name                   AS product_name,
    flat_price_minor,
    hourly_rate_minor,
    default_minutes_worked AS minutes_worked,
    client_id,
    created_at,
    updated_at
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let product = repo.insert(&new_product).await?;
/// let products = repo.list_for_client(product.client_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a validated product for `product.client_id`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored row
    /// * `Err(DbError::ForeignKeyViolation)` - Client no longer exists
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(
            client_id = product.client_id,
            product_type = %product.product_type,
            pricing_mode = %product.pricing_mode,
            "Inserting product"
        );

        let sql = format!(
            r#"
            INSERT INTO products (
                product_type, pricing_mode, name,
                flat_price_minor, hourly_rate_minor, default_minutes_worked,
                client_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(product.product_type)
            .bind(product.pricing_mode)
            .bind(&product.product_name)
            .bind(product.flat_price_minor)
            .bind(product.hourly_rate_minor)
            .bind(product.minutes_worked)
            .bind(product.client_id)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        debug!(id = created.id, "Product inserted");
        Ok(created)
    }

    /// Lists a client's products in insertion order.
    pub async fn list_for_client(&self, client_id: i64) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE client_id = ?1 ORDER BY id");

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(client_id = client_id, count = products.len(), "Listed products");
        Ok(products)
    }

    /// Replaces a product with a validated body.
    ///
    /// All pricing columns are overwritten, so switching mode clears the
    /// columns the new mode doesn't use.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated row
    /// * `Err(DbError::NotFound)` - No such product for `product.client_id`
    pub async fn update(&self, product_id: i64, product: &NewProduct) -> DbResult<Product> {
        debug!(id = product_id, client_id = product.client_id, "Updating product");

        let sql = format!(
            r#"
            UPDATE products SET
                product_type = ?1,
                pricing_mode = ?2,
                name = ?3,
                flat_price_minor = ?4,
                hourly_rate_minor = ?5,
                default_minutes_worked = ?6,
                updated_at = ?7
            WHERE id = ?8 AND client_id = ?9
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(product.product_type)
            .bind(product.pricing_mode)
            .bind(&product.product_name)
            .bind(product.flat_price_minor)
            .bind(product.hourly_rate_minor)
            .bind(product.minutes_worked)
            .bind(Utc::now())
            .bind(product_id)
            .bind(product.client_id)
            .fetch_optional(&self.pool)
            .await?;

        updated.ok_or_else(|| DbError::not_found("Product", product_id))
    }

    /// Deletes one of a client's products.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No such product for this client
    pub async fn delete(&self, product_id: i64, client_id: i64) -> DbResult<()> {
        debug!(id = product_id, client_id = client_id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1 AND client_id = ?2")
            .bind(product_id)
            .bind(client_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use invoice_core::{NewClient, NewProduct, PricingMode, ProductType};

    async fn db_with_client() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let client = db
            .clients()
            .insert(&NewClient {
                name: "Atelier One".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        (db, client.id)
    }

    fn flat_style(client_id: i64) -> NewProduct {
        NewProduct {
            client_id,
            product_type: ProductType::Style,
            pricing_mode: PricingMode::Flat,
            product_name: "Blue Jeans".into(),
            flat_price_minor: Some(1250),
            hourly_rate_minor: None,
            minutes_worked: None,
        }
    }

    fn hourly_sample(client_id: i64) -> NewProduct {
        NewProduct {
            client_id,
            product_type: ProductType::Sample,
            pricing_mode: PricingMode::Hourly,
            product_name: "Pattern Adjustment".into(),
            flat_price_minor: None,
            hourly_rate_minor: Some(3000),
            minutes_worked: Some(90),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (db, client_id) = db_with_client().await;

        let jeans = db.products().insert(&flat_style(client_id)).await.unwrap();
        let pattern = db.products().insert(&hourly_sample(client_id)).await.unwrap();

        assert_eq!(jeans.product_name, "Blue Jeans");
        assert_eq!(jeans.flat_price_minor, Some(1250));
        assert_eq!(pattern.minutes_worked, Some(90));
        assert_eq!(pattern.client_id, client_id);

        let listed = db.products().list_for_client(client_id).await.unwrap();
        assert_eq!(listed, vec![jeans, pattern]);
    }

    #[tokio::test]
    async fn test_list_is_scoped_by_client() {
        let (db, client_id) = db_with_client().await;
        db.products().insert(&flat_style(client_id)).await.unwrap();

        assert!(db.products().list_for_client(client_id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_for_missing_client() {
        let (db, client_id) = db_with_client().await;
        let err = db
            .products()
            .insert(&flat_style(client_id + 100))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_schema_rejects_hourly_style() {
        let (db, client_id) = db_with_client().await;
        let bad = NewProduct {
            product_type: ProductType::Style,
            ..hourly_sample(client_id)
        };
        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_switches_pricing_mode() {
        let (db, client_id) = db_with_client().await;
        let created = db.products().insert(&hourly_sample(client_id)).await.unwrap();

        let updated = db
            .products()
            .update(
                created.id,
                &NewProduct {
                    product_type: ProductType::Sample,
                    product_name: "Toile".into(),
                    ..flat_style(client_id)
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.pricing_mode, PricingMode::Flat);
        assert_eq!(updated.flat_price_minor, Some(1250));
        assert_eq!(updated.hourly_rate_minor, None);
        assert_eq!(updated.minutes_worked, None);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_wrong_client_is_not_found() {
        let (db, client_id) = db_with_client().await;
        let other = db
            .clients()
            .insert(&NewClient {
                name: "Atelier Two".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let created = db.products().insert(&flat_style(client_id)).await.unwrap();

        let err = db
            .products()
            .update(created.id, &flat_style(other.id))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, client_id) = db_with_client().await;
        let created = db.products().insert(&flat_style(client_id)).await.unwrap();

        let err = db.products().delete(created.id, client_id + 1).await.unwrap_err();
        assert!(err.is_not_found());

        db.products().delete(created.id, client_id).await.unwrap();
        assert!(db.products().list_for_client(client_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_client_cascades() {
        let (db, client_id) = db_with_client().await;
        db.products().insert(&flat_style(client_id)).await.unwrap();

        db.clients().delete(client_id).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
