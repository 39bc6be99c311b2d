use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::product::normalize_price;
use crate::database::{ListScope, NewProduct, Product, ProductChanges, ProductStore, StoreError};

const PRODUCT_COLUMNS: &str = "id, name, description, price, created_at, updated_at";

/// `ProductStore` over the `products` table
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `products` table when it does not exist yet
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id          BIGSERIAL PRIMARY KEY,
                name        VARCHAR(255) NOT NULL,
                description TEXT NULL,
                price       NUMERIC(10, 2) NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self, scope: ListScope) -> Result<Vec<Product>, StoreError> {
        match scope {
            ListScope::All => {
                let sql = format!("SELECT {} FROM products ORDER BY id", PRODUCT_COLUMNS);
                let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await?;
                Ok(rows)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, fields: NewProduct) -> Result<Option<Product>, StoreError> {
        let sql = format!(
            "INSERT INTO products (name, description, price) VALUES ($1, $2, $3) RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(normalize_price(fields.price))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, product: Product, changes: ProductChanges) -> Result<Product, StoreError> {
        if changes.is_empty() {
            return Ok(product);
        }

        let (description_supplied, description) = match changes.description {
            Some(value) => (true, value),
            None => (false, None),
        };

        let sql = format!(
            r#"
            UPDATE products SET
                name        = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                price       = COALESCE($5, price),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(changes.name)
            .bind(description_supplied)
            .bind(description)
            .bind(changes.price.map(normalize_price))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
