//! Cart repository.

use sqlx::PgPool;

use eco_friendly_core::{CartLineId, Quantity, UserId};

use super::{RepositoryError, expect_affected};
use crate::models::{CartItem, NewCartLine};

/// Repository for a buyer's pending cart lines.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a buyer's cart lines joined with product details.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT c.cart_id, c.product_id, c.quantity, c.user_id,
                   p.product_name, p.price, p.description, p.product_image
            FROM cart c
            JOIN products p ON c.product_id = p.product_id
            WHERE c.user_id = $1
            ORDER BY c.cart_id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Add a line to a buyer's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the user or product doesn't exist.
    pub async fn add(&self, line: &NewCartLine) -> Result<CartLineId, RepositoryError> {
        let (id,): (CartLineId,) = sqlx::query_as(
            r"
            INSERT INTO cart (product_id, quantity, user_id)
            VALUES ($1, $2, $3)
            RETURNING cart_id
            ",
        )
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.user_id)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(id)
    }

    /// Change the quantity on a cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    pub async fn update_quantity(
        &self,
        id: CartLineId,
        quantity: Quantity,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE cart SET quantity = $1 WHERE cart_id = $2")
            .bind(quantity)
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result.rows_affected())
    }

    /// Remove a single cart line.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line doesn't exist.
    pub async fn remove(&self, id: CartLineId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart WHERE cart_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result.rows_affected())
    }
}
