//! Cart types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use eco_friendly_core::{CartLineId, ProductId, Quantity, UserId};

use super::{InvalidInput, NumericInput};

/// A cart line joined with its product, as shown to the buyer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub cart_id: CartLineId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub user_id: UserId,
    pub product_name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub product_image: Option<String>,
}

/// A cart line with the unit price read inside the checkout transaction.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PricedCartLine {
    pub cart_id: CartLineId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub price: Decimal,
}

/// `POST /cart` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddToCartInput {
    pub product_id: Option<NumericInput>,
    pub quantity: Option<NumericInput>,
    pub user_id: Option<NumericInput>,
}

/// Validated add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartLine {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
}

const ADD_REQUIRED: InvalidInput = InvalidInput("product_id, quantity, and user_id are required");
const QUANTITY_RANGE: InvalidInput = InvalidInput("quantity must be between 1 and 10000");

impl AddToCartInput {
    /// # Errors
    ///
    /// Returns [`InvalidInput`] unless all three fields are present and positive.
    pub fn validate(&self) -> Result<NewCartLine, InvalidInput> {
        let product_id = self
            .product_id
            .as_ref()
            .and_then(NumericInput::as_i64)
            .and_then(ProductId::from_positive)
            .ok_or(ADD_REQUIRED)?;
        let user_id = self
            .user_id
            .as_ref()
            .and_then(NumericInput::as_i64)
            .and_then(UserId::from_positive)
            .ok_or(ADD_REQUIRED)?;
        let quantity = self
            .quantity
            .as_ref()
            .and_then(NumericInput::as_i64)
            .ok_or(ADD_REQUIRED)
            .and_then(|q| Quantity::new(q).map_err(|_| QUANTITY_RANGE))?;

        Ok(NewCartLine {
            user_id,
            product_id,
            quantity,
        })
    }
}

/// `PUT /cart/{id}` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuantityInput {
    pub quantity: Option<NumericInput>,
}

impl QuantityInput {
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the quantity is missing or out of range.
    pub fn validate(&self) -> Result<Quantity, InvalidInput> {
        let raw = self
            .quantity
            .as_ref()
            .and_then(NumericInput::as_i64)
            .ok_or(InvalidInput("Quantity is required"))?;
        Quantity::new(raw).map_err(|_| QUANTITY_RANGE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_validate_mixed_types() {
        let input: AddToCartInput =
            serde_json::from_str(r#"{"product_id":"3","quantity":2,"user_id":42}"#).unwrap();
        let line = input.validate().unwrap();
        assert_eq!(line.product_id, ProductId::new(3));
        assert_eq!(line.user_id, UserId::new(42));
        assert_eq!(line.quantity.get(), 2);
    }

    #[test]
    fn test_add_validate_requires_all_fields() {
        let input: AddToCartInput = serde_json::from_str(r#"{"product_id":3,"quantity":2}"#).unwrap();
        assert_eq!(input.validate(), Err(ADD_REQUIRED));

        let input: AddToCartInput =
            serde_json::from_str(r#"{"product_id":0,"quantity":2,"user_id":1}"#).unwrap();
        assert_eq!(input.validate(), Err(ADD_REQUIRED));
    }

    #[test]
    fn test_add_validate_rejects_zero_quantity() {
        let input: AddToCartInput =
            serde_json::from_str(r#"{"product_id":3,"quantity":0,"user_id":1}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_quantity_input() {
        let input: QuantityInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input.validate(), Err(InvalidInput("Quantity is required")));

        let input: QuantityInput = serde_json::from_str(r#"{"quantity":"5"}"#).unwrap();
        assert_eq!(input.validate().unwrap().get(), 5);
    }
}
