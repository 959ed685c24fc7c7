//! Product repository for database operations

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseResult;
use crate::models::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, name, description, price, image, is_active, created_at";

/// Product repository
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a product into the catalog
    pub async fn create(&self, new_product: &NewProduct) -> DatabaseResult<Product> {
        info!("Creating product: {}", new_product.name);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, description, price, image)
            VALUES ($1, $2, $3, $4)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(&new_product.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Products currently offered in the catalog
    pub async fn list_active(&self) -> DatabaseResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Resolve a list of ids to products, each matching product once
    ///
    /// Inactive products are included.
    pub async fn find_by_ids(&self, ids: &[i64]) -> DatabaseResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ANY($1) ORDER BY id"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}
