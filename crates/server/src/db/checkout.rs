//! Transactional storage for checkout.
//!
//! Checkout needs several statements to succeed or fail together, so the
//! orchestrator talks to storage through a [`CheckoutSession`]: an
//! exclusively owned unit of work obtained from a [`CheckoutStore`] and
//! finished with exactly one of [`CheckoutSession::commit`] or
//! [`CheckoutSession::rollback`]. Both consume the session, so it cannot be
//! used after it has been released.
//!
//! [`PgCheckoutStore`] is the `PostgreSQL` implementation. Each session owns
//! one pooled connection inside a `BEGIN` ... `COMMIT`/`ROLLBACK` block; if a
//! session is dropped without being finished, sqlx rolls it back and the
//! connection returns to the pool.

use std::future::Future;

use sqlx::{PgPool, Postgres, Transaction};

use eco_friendly_core::{OrderId, UserId};

use super::RepositoryError;
use crate::models::{NewOrder, PricedCartLine};

/// Source of checkout units of work.
pub trait CheckoutStore: Send + Sync {
    type Session: CheckoutSession;

    /// Acquire a connection and start a transaction.
    fn begin(&self) -> impl Future<Output = Result<Self::Session, RepositoryError>> + Send;
}

/// One in-flight checkout transaction.
pub trait CheckoutSession: Send + Sized {
    /// Read the buyer's cart lines with current unit prices, locking them
    /// against concurrent modification until the session ends.
    fn lock_cart(
        &mut self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<PricedCartLine>, RepositoryError>> + Send;

    /// Insert the order row, dated today.
    fn insert_order(
        &mut self,
        order: NewOrder<'_>,
    ) -> impl Future<Output = Result<OrderId, RepositoryError>> + Send;

    /// Insert one order line per cart line, in cart order.
    fn insert_order_lines(
        &mut self,
        order_id: OrderId,
        lines: &[PricedCartLine],
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the given cart lines belonging to the buyer.
    fn clear_cart(
        &mut self,
        user_id: UserId,
        lines: &[PricedCartLine],
    ) -> impl Future<Output = Result<u64, RepositoryError>> + Send;

    fn commit(self) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn rollback(self) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// `PostgreSQL`-backed checkout store.
#[derive(Debug, Clone)]
pub struct PgCheckoutStore {
    pool: PgPool,
}

impl PgCheckoutStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CheckoutStore for PgCheckoutStore {
    type Session = PgCheckoutSession;

    async fn begin(&self) -> Result<PgCheckoutSession, RepositoryError> {
        let tx = self.pool.begin().await?;
        Ok(PgCheckoutSession { tx })
    }
}

/// A checkout transaction holding one pooled connection.
pub struct PgCheckoutSession {
    tx: Transaction<'static, Postgres>,
}

impl CheckoutSession for PgCheckoutSession {
    async fn lock_cart(&mut self, user_id: UserId) -> Result<Vec<PricedCartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, PricedCartLine>(
            r"
            SELECT c.cart_id, c.product_id, c.quantity, p.price
            FROM cart c
            JOIN products p ON c.product_id = p.product_id
            WHERE c.user_id = $1
            ORDER BY c.cart_id
            FOR UPDATE OF c
            ",
        )
        .bind(user_id)
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(lines)
    }

    async fn insert_order(&mut self, order: NewOrder<'_>) -> Result<OrderId, RepositoryError> {
        let address = order.shipping_address;
        let (order_id,): (OrderId,) = sqlx::query_as(
            r"
            INSERT INTO orders (
                user_id, order_date, total_cost,
                ship_full_name, ship_address1, ship_address2,
                ship_town, ship_postcode, ship_country
            )
            VALUES ($1, CURRENT_DATE, $2, $3, $4, $5, $6, $7, $8)
            RETURNING order_id
            ",
        )
        .bind(order.user_id)
        .bind(order.total_cost)
        .bind(address.full_name())
        .bind(address.address_line_1())
        .bind(address.address_line_2())
        .bind(address.town())
        .bind(address.postal_code())
        .bind(address.country())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(order_id)
    }

    async fn insert_order_lines(
        &mut self,
        order_id: OrderId,
        lines: &[PricedCartLine],
    ) -> Result<(), RepositoryError> {
        let product_ids: Vec<i32> = lines.iter().map(|l| l.product_id.as_i32()).collect();

        let result = sqlx::query(
            r"
            INSERT INTO order_details (order_id, product_id)
            SELECT $1, t.product_id
            FROM UNNEST($2::int4[]) WITH ORDINALITY AS t(product_id, ord)
            ORDER BY t.ord
            ",
        )
        .bind(order_id)
        .bind(&product_ids)
        .execute(&mut *self.tx)
        .await
        .map_err(RepositoryError::from_write)?;

        let written = usize::try_from(result.rows_affected()).unwrap_or(usize::MAX);
        if written != lines.len() {
            return Err(RepositoryError::DataCorruption(format!(
                "expected {} order lines, wrote {written}",
                lines.len()
            )));
        }
        Ok(())
    }

    async fn clear_cart(
        &mut self,
        user_id: UserId,
        lines: &[PricedCartLine],
    ) -> Result<u64, RepositoryError> {
        let cart_ids: Vec<i32> = lines.iter().map(|l| l.cart_id.as_i32()).collect();

        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1 AND cart_id = ANY($2)")
            .bind(user_id)
            .bind(&cart_ids)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
