//! Order read models for the admin views.
//!
//! Orders are only ever written by checkout (see [`super::checkout`]).

use sqlx::PgPool;

use eco_friendly_core::OrderId;

use super::RepositoryError;
use crate::models::{OrderLineDetail, OrderSummary};

pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders with the buyer's user name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<OrderSummary>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r"
            SELECT o.order_id, o.user_id, u.user_name, o.order_date, o.total_cost,
                   o.ship_full_name, o.ship_town, o.ship_country, o.created_at
            FROM orders o
            JOIN users u ON o.user_id = u.user_id
            ORDER BY o.order_date DESC, o.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Whether an order exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM orders WHERE order_id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Order lines for one order, joined with products that still exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, id: OrderId) -> Result<Vec<OrderLineDetail>, RepositoryError> {
        let lines = sqlx::query_as::<_, OrderLineDetail>(
            r"
            SELECT od.order_details_id, od.product_id, p.product_name, p.price,
                   p.description, p.product_image, od.created_at
            FROM order_details od
            LEFT JOIN products p ON od.product_id = p.product_id
            WHERE od.order_id = $1
            ORDER BY od.order_details_id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
