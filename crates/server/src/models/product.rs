//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use eco_friendly_core::ProductId;

use super::{InvalidInput, non_blank};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Decimal,
    pub description: Option<String>,
    /// Opaque image reference (file name or URL); storage lives elsewhere.
    pub product_image: Option<String>,
}

/// Create/update request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductInput {
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub product_image: Option<String>,
}

/// Validated product fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    /// `None` on update keeps the stored image.
    pub image: Option<String>,
}

impl ProductInput {
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the name is blank or the price is missing or negative.
    pub fn validate(self) -> Result<NewProduct, InvalidInput> {
        let name = non_blank(self.product_name)
            .ok_or(InvalidInput("product_name and price are required"))?;
        let price = self
            .price
            .ok_or(InvalidInput("product_name and price are required"))?;
        if price < Decimal::ZERO {
            return Err(InvalidInput("price cannot be negative"));
        }

        Ok(NewProduct {
            name,
            price: price.round_dp(2),
            description: non_blank(self.description),
            image: non_blank(self.product_image),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_string_price() {
        let input: ProductInput =
            serde_json::from_str(r#"{"product_name":" Bamboo Brush ","price":"3.50"}"#).unwrap();
        let product = input.validate().unwrap();
        assert_eq!(product.name, "Bamboo Brush");
        assert_eq!(product.price, Decimal::new(350, 2));
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_validate_accepts_numeric_price() {
        let input: ProductInput =
            serde_json::from_str(r#"{"product_name":"Soap","price":4.25}"#).unwrap();
        assert_eq!(input.validate().unwrap().price, Decimal::new(425, 2));
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let input = ProductInput {
            price: Some(Decimal::ONE),
            ..ProductInput::default()
        };
        assert!(input.validate().is_err());

        let input = ProductInput {
            product_name: Some("Soap".to_owned()),
            ..ProductInput::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let input = ProductInput {
            product_name: Some("Soap".to_owned()),
            price: Some(Decimal::new(-1, 2)),
            ..ProductInput::default()
        };
        assert_eq!(input.validate(), Err(InvalidInput("price cannot be negative")));
    }
}
