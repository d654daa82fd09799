//! Checkout orchestration.
//!
//! Turns a buyer's cart into an order in one unit of work:
//!
//! 1. validate the request (no database work on failure)
//! 2. begin a session and lock the buyer's cart lines
//! 3. total `price × quantity` using the prices just read
//! 4. insert the order and one order line per cart line
//! 5. delete the checked-out cart lines
//! 6. commit, or roll back on any failure
//!
//! The session is always finished (committed or rolled back) before
//! `checkout` returns.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{Span, instrument};

use eco_friendly_core::{ShippingAddress, ShippingAddressInput, UserId, order_total};

use crate::db::{CheckoutSession, CheckoutStore, RepositoryError};
use crate::models::{CheckoutReceipt, NewOrder, NumericInput};

/// `POST /checkout` body.
///
/// Field values of the wrong JSON type deserialize as absent, so every
/// malformed field surfaces as an [`InvalidCheckout`] message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    pub user_id: Option<NumericInput>,
    #[serde(deserialize_with = "address_fields")]
    pub shipping_address: Option<ShippingAddressInput>,
}

/// Read the address object, treating any non-object value as absent.
fn address_fields<'de, D>(deserializer: D) -> Result<Option<ShippingAddressInput>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Address {
        Fields(ShippingAddressInput),
        Other(IgnoredAny),
    }

    Ok(match Address::deserialize(deserializer)? {
        Address::Fields(fields) => Some(fields),
        Address::Other(_) => None,
    })
}

/// Why a checkout request was rejected before touching the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCheckout {
    #[error("User ID is required")]
    MissingBuyer,
    #[error("Incomplete shipping address")]
    IncompleteAddress {
        /// First missing field, for logs.
        field: &'static str,
    },
}

/// Checkout failure taxonomy.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Missing or malformed input; no transaction was started.
    #[error("invalid checkout request: {0}")]
    InvalidRequest(#[from] InvalidCheckout),

    /// The buyer has nothing in their cart; the transaction was rolled back.
    #[error("cart is empty")]
    EmptyCart,

    /// Storage failed at some step; the transaction was rolled back.
    #[error("checkout could not be saved")]
    Persistence(#[from] RepositoryError),
}

impl CheckoutRequest {
    /// Resolve the buyer ID and shipping address.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCheckout::MissingBuyer`] unless `user_id` is a
    /// positive integer (number or numeric string), then
    /// [`InvalidCheckout::IncompleteAddress`] if the address is absent or
    /// lacks a required field.
    pub fn validate(self) -> Result<(UserId, ShippingAddress), InvalidCheckout> {
        let user_id = self
            .user_id
            .as_ref()
            .and_then(NumericInput::as_i64)
            .and_then(UserId::from_positive)
            .ok_or(InvalidCheckout::MissingBuyer)?;

        let address = self
            .shipping_address
            .ok_or(InvalidCheckout::IncompleteAddress {
                field: "shipping_address",
            })?
            .validate()
            .map_err(|missing| InvalidCheckout::IncompleteAddress { field: missing.0 })?;

        Ok((user_id, address))
    }
}

/// Checkout orchestrator over any [`CheckoutStore`].
#[derive(Debug, Clone)]
pub struct CheckoutService<S> {
    store: S,
}

impl<S: CheckoutStore> CheckoutService<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order for everything in the buyer's cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutError`]. After `InvalidRequest` no session was opened;
    /// after any other error the session has been rolled back.
    #[instrument(skip_all, fields(user_id = tracing::field::Empty, order_id = tracing::field::Empty))]
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        let (user_id, address) = request.validate()?;
        Span::current().record("user_id", user_id.as_i32());

        let mut session = self.store.begin().await?;

        match place_order(&mut session, user_id, &address).await {
            Ok(receipt) => {
                session.commit().await?;
                Span::current().record("order_id", receipt.order_id.as_i32());
                tracing::info!(
                    total_cost = %receipt.total_cost,
                    lines = receipt.line_count,
                    "Checkout committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = session.rollback().await {
                    tracing::warn!(error = %rollback_err, "Checkout rollback failed");
                }
                Err(err)
            }
        }
    }
}

async fn place_order<T: CheckoutSession>(
    session: &mut T,
    user_id: UserId,
    address: &ShippingAddress,
) -> Result<CheckoutReceipt, CheckoutError> {
    let lines = session.lock_cart(user_id).await?;
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let total_cost = order_total(lines.iter().map(|line| (line.price, line.quantity))).ok_or_else(
        || RepositoryError::DataCorruption("order total overflows".to_owned()),
    )?;

    let order_id = session
        .insert_order(NewOrder {
            user_id,
            total_cost,
            shipping_address: address,
        })
        .await?;
    session.insert_order_lines(order_id, &lines).await?;

    let cleared = session.clear_cart(user_id, &lines).await?;
    if usize::try_from(cleared).ok() != Some(lines.len()) {
        return Err(RepositoryError::DataCorruption(format!(
            "cart changed during checkout: locked {} lines, cleared {cleared}",
            lines.len()
        ))
        .into());
    }

    Ok(CheckoutReceipt {
        order_id,
        total_cost,
        line_count: lines.len(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(json: &str) -> CheckoutRequest {
        serde_json::from_str(json).unwrap()
    }

    const ADDRESS: &str =
        r#"{"fullName":"Ada","address1":"1 Loop Rd","town":"Leeds","postcode":"LS1 1AA"}"#;

    #[test]
    fn test_validate_numeric_and_string_user_id() {
        let (user_id, address) = request(&format!(r#"{{"user_id":42,"shipping_address":{ADDRESS}}}"#))
            .validate()
            .unwrap();
        assert_eq!(user_id, UserId::new(42));
        assert_eq!(address.town(), "Leeds");

        let (user_id, _) = request(&format!(r#"{{"user_id":"42","shipping_address":{ADDRESS}}}"#))
            .validate()
            .unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_validate_missing_user_id() {
        for body in [
            format!(r#"{{"shipping_address":{ADDRESS}}}"#),
            format!(r#"{{"user_id":null,"shipping_address":{ADDRESS}}}"#),
            format!(r#"{{"user_id":"","shipping_address":{ADDRESS}}}"#),
            format!(r#"{{"user_id":0,"shipping_address":{ADDRESS}}}"#),
            format!(r#"{{"user_id":"abc","shipping_address":{ADDRESS}}}"#),
        ] {
            assert_eq!(
                request(&body).validate().unwrap_err(),
                InvalidCheckout::MissingBuyer,
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_validate_user_id_checked_before_address() {
        assert_eq!(
            request("{}").validate().unwrap_err(),
            InvalidCheckout::MissingBuyer
        );
    }

    #[test]
    fn test_validate_incomplete_address() {
        let err = request(r#"{"user_id":1}"#).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidCheckout::IncompleteAddress {
                field: "shipping_address"
            }
        );

        let err = request(
            r#"{"user_id":1,"shipping_address":{"fullName":"Ada","address1":"1 Loop Rd","postcode":"LS1"}}"#,
        )
        .validate()
        .unwrap_err();
        assert_eq!(err, InvalidCheckout::IncompleteAddress { field: "town" });
        assert_eq!(err.to_string(), "Incomplete shipping address");
    }

    #[test]
    fn test_validate_integral_float_user_id() {
        let (user_id, _) = request(&format!(r#"{{"user_id":42.0,"shipping_address":{ADDRESS}}}"#))
            .validate()
            .unwrap();
        assert_eq!(user_id, UserId::new(42));
    }

    #[test]
    fn test_validate_non_integer_user_id_is_missing_buyer() {
        for user_id in ["true", "42.5", "[42]", r#"{"id":42}"#] {
            let body = format!(r#"{{"user_id":{user_id},"shipping_address":{ADDRESS}}}"#);
            assert_eq!(
                request(&body).validate().unwrap_err(),
                InvalidCheckout::MissingBuyer,
                "user_id: {user_id}"
            );
        }
    }

    #[test]
    fn test_validate_numeric_postcode() {
        let (_, address) = request(
            r#"{"user_id":1,"shipping_address":{"fullName":"Ada","address1":"1 Loop Rd","town":"Leeds","postcode":12345}}"#,
        )
        .validate()
        .unwrap();
        assert_eq!(address.postal_code(), "12345");
    }

    #[test]
    fn test_validate_non_object_address_is_incomplete() {
        for address in [r#""1 Lane, Leeds""#, "42", "true"] {
            let body = format!(r#"{{"user_id":1,"shipping_address":{address}}}"#);
            assert_eq!(
                request(&body).validate().unwrap_err(),
                InvalidCheckout::IncompleteAddress {
                    field: "shipping_address"
                },
                "shipping_address: {address}"
            );
        }
    }
}
