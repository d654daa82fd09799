//! Cart line quantity.

use serde::{Deserialize, Serialize};

/// Errors produced when validating a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity must be at least 1")]
    NotPositive,
    #[error("quantity must be at most {max}")]
    TooLarge { max: i32 },
}

/// Number of units of a product on a cart line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
#[cfg_attr(feature = "postgres", derive(sqlx::Type), sqlx(transparent))]
pub struct Quantity(i32);

impl Quantity {
    /// Upper bound accepted from clients.
    pub const MAX: i32 = 10_000;

    /// Validate a raw quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when the value is below one or above [`Self::MAX`].
    pub fn new(raw: i64) -> Result<Self, QuantityError> {
        if raw < 1 {
            return Err(QuantityError::NotPositive);
        }
        i32::try_from(raw)
            .ok()
            .filter(|q| *q <= Self::MAX)
            .map(Self)
            .ok_or(QuantityError::TooLarge { max: Self::MAX })
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Quantity> for i32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}
