//! Domain models for the shop.
//!
//! Row types derive `sqlx::FromRow` and `Serialize` so repositories can
//! return them straight to route handlers. Input types derive `Deserialize`
//! with every field optional; their `validate` methods produce the typed
//! values repositories accept.

pub mod cart;
pub mod contact;
pub mod order;
pub mod product;
pub mod user;

use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

pub use cart::{AddToCartInput, CartItem, NewCartLine, PricedCartLine, QuantityInput};
pub use contact::{ContactInput, ContactMessage, NewContact};
pub use order::{CheckoutReceipt, NewOrder, OrderLineDetail, OrderSummary};
pub use product::{NewProduct, Product, ProductInput};
pub use user::{UserProfile, UserUpdate, UserUpdateInput};

/// Request input rejected before reaching the database.
///
/// The message is shown to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidInput(pub &'static str);

/// An integer that clients may send either as a JSON number or a string.
///
/// Any other JSON value deserializes as [`NumericInput::Other`] so the
/// caller can report its own validation message.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Largest magnitude below which every integral `f64` is exact.
const EXACT_FLOAT_LIMIT: f64 = 9_007_199_254_740_992.0;

impl NumericInput {
    /// The integer value, if the input holds one.
    ///
    /// Floats count only when integral, so `42.0` is 42 and `42.5` is not a
    /// value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) => {
                (f.fract() == 0.0 && f.abs() < EXACT_FLOAT_LIMIT).then_some(*f as i64)
            }
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

/// Trim a string field, treating blank as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
