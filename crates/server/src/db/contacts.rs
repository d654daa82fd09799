//! Contact form repository.

use sqlx::PgPool;

use eco_friendly_core::ContactId;

use super::RepositoryError;
use crate::models::{ContactMessage, NewContact};

pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, contact: &NewContact) -> Result<ContactId, RepositoryError> {
        let (id,): (ContactId,) = sqlx::query_as(
            r"
            INSERT INTO contact_us (first_name, last_name, phone_number, email, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING contact_id
            ",
        )
        .bind(&contact.first_name)
        .bind(contact.last_name.as_deref())
        .bind(contact.phone_number.as_deref())
        .bind(&contact.email)
        .bind(&contact.message)
        .fetch_one(self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(id)
    }

    /// List all contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            r"
            SELECT contact_id, first_name, last_name, phone_number, email, message, created_at
            FROM contact_us
            ORDER BY created_at DESC, contact_id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }
}
