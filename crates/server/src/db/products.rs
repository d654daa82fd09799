//! Product catalog repository.

use sqlx::PgPool;

use eco_friendly_core::ProductId;

use super::{RepositoryError, expect_affected};
use crate::models::{NewProduct, Product};

/// Repository for catalog operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT product_id, product_name, price, description, product_image
            FROM products
            ORDER BY product_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a product and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let (id,): (ProductId,) = sqlx::query_as(
            r"
            INSERT INTO products (product_name, price, description, product_image)
            VALUES ($1, $2, $3, $4)
            RETURNING product_id
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.description.as_deref())
        .bind(product.image.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(id)
    }

    /// Replace a product's fields. The image is only replaced when a new
    /// reference is supplied.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(&self, id: ProductId, product: &NewProduct) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET product_name = $1,
                price = $2,
                description = $3,
                product_image = COALESCE($4, product_image)
            WHERE product_id = $5
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.description.as_deref())
        .bind(product.image.as_deref())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        expect_affected(result.rows_affected())
    }

    /// Delete a product. Cart lines holding it are removed by cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result.rows_affected())
    }
}
