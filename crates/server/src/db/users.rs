//! User repository for profile and admin operations.
//!
//! Credentials are out of scope here; queries never select them.

use sqlx::PgPool;

use eco_friendly_core::UserId;

use super::{RepositoryError, expect_affected};
use crate::models::{UserProfile, UserUpdate};

/// Conflict reported when deleting a user who has order history.
pub const USER_HAS_ORDERS: &str = "User has orders and cannot be deleted";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all users for the admin view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let users = sqlx::query_as::<_, UserProfile>(
            r"
            SELECT user_id, user_name, first_name, last_name, email, mobile_no, address, updated_on
            FROM users
            ORDER BY user_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let user = sqlx::query_as::<_, UserProfile>(
            r"
            SELECT user_id, user_name, first_name, last_name, email, mobile_no, address, updated_on
            FROM users
            WHERE user_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Apply a partial update. Absent fields keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET user_name = COALESCE($1, user_name),
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                mobile_no = COALESCE($5, mobile_no),
                address = COALESCE($6, address),
                updated_on = NOW()
            WHERE user_id = $7
            ",
        )
        .bind(update.user_name.as_deref())
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.email.as_ref().map(eco_friendly_core::Email::as_str))
        .bind(update.mobile_no.as_deref())
        .bind(update.address.as_deref())
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| match RepositoryError::from_write(e) {
            RepositoryError::Conflict(_) => {
                RepositoryError::Conflict("email already exists".to_owned())
            }
            other => other,
        })?;

        expect_affected(result.rows_affected())
    }

    /// Delete a user and their cart. Users with orders are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist, or
    /// `RepositoryError::Conflict` if they have placed orders.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| match RepositoryError::from_write(e) {
                RepositoryError::InvalidReference(_) => {
                    RepositoryError::Conflict(USER_HAS_ORDERS.to_owned())
                }
                other => other,
            })?;

        expect_affected(result.rows_affected())
    }
}
