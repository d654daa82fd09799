//! Database operations for the shop `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Shop users (admin and profile management)
//! - `products` - Product catalog
//! - `cart` - Pending purchases per buyer
//! - `contact_us` - Contact form submissions
//! - `orders` - Orders written by checkout
//! - `order_details` - One row per checked-out cart line
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p eco-friendly-cli -- migrate
//! ```

pub mod cart;
pub mod checkout;
pub mod contacts;
pub mod orders;
pub mod products;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use cart::CartRepository;
pub use checkout::{CheckoutSession, CheckoutStore, PgCheckoutSession, PgCheckoutStore};
pub use contacts::ContactRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Unique constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Foreign key violation (e.g., cart line for an unknown product).
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

impl RepositoryError {
    /// Classify a write error, turning constraint violations into typed variants.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(constraint_name(db_err.constraint()));
            }
            if db_err.is_foreign_key_violation() {
                return Self::InvalidReference(constraint_name(db_err.constraint()));
            }
        }
        Self::Database(err)
    }
}

fn constraint_name(constraint: Option<&str>) -> String {
    constraint.unwrap_or("unknown constraint").to_owned()
}

/// Fail with `NotFound` when an UPDATE or DELETE touched no rows.
pub(crate) const fn expect_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    pool_options(max_connections)
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool that connects on first use and keeps no idle connections.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    pool_options(max_connections)
        .min_connections(0)
        .connect_lazy(database_url.expose_secret())
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(2_u32.min(max_connections))
        .acquire_timeout(Duration::from_secs(10))
}
