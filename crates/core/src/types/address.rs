//! Shipping address captured at checkout.
//!
//! The address is a value object: it is validated once, then copied field by
//! field into the order row. It has no table of its own.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Country recorded when the buyer does not supply one.
pub const DEFAULT_COUNTRY: &str = "United Kingdom";

/// A required address field that was missing or blank.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("shipping address is missing {0}")]
pub struct IncompleteAddress(pub &'static str);

/// Shipping address exactly as the client sent it.
///
/// Every field is optional here so that an incomplete address deserializes
/// and can be reported as [`IncompleteAddress`] instead of a JSON error.
/// Integers are accepted as text (a numeric postcode); any other non-string
/// value reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddressInput {
    #[serde(deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub address1: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub address2: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub town: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub postcode: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub country: Option<String>,
}

/// A validated shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    full_name: String,
    address_line_1: String,
    address_line_2: Option<String>,
    town: String,
    postal_code: String,
    country: String,
}

impl ShippingAddressInput {
    /// Check required fields and normalise whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IncompleteAddress`] naming the first required field that is
    /// absent or blank (`fullName`, `address1`, `town`, `postcode`).
    pub fn validate(self) -> Result<ShippingAddress, IncompleteAddress> {
        let full_name = required(self.full_name, "fullName")?;
        let address_line_1 = required(self.address1, "address1")?;
        let town = required(self.town, "town")?;
        let postal_code = required(self.postcode, "postcode")?;

        Ok(ShippingAddress {
            full_name,
            address_line_1,
            address_line_2: optional(self.address2),
            town,
            postal_code,
            country: optional(self.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_owned()),
        })
    }
}

impl ShippingAddress {
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn address_line_1(&self) -> &str {
        &self.address_line_1
    }

    #[must_use]
    pub fn address_line_2(&self) -> Option<&str> {
        self.address_line_2.as_deref()
    }

    #[must_use]
    pub fn town(&self) -> &str {
        &self.town
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Other(IgnoredAny),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Str(s) => Some(s),
        Text::Int(n) => Some(n.to_string()),
        Text::Other(_) => None,
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, IncompleteAddress> {
    optional(value).ok_or(IncompleteAddress(field))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete() -> ShippingAddressInput {
        ShippingAddressInput {
            full_name: Some("Ada Lovelace".to_owned()),
            address1: Some("12 Analytical Row".to_owned()),
            address2: None,
            town: Some("London".to_owned()),
            postcode: Some("N1 9GU".to_owned()),
            country: None,
        }
    }

    #[test]
    fn test_complete_address_defaults_country() {
        let address = complete().validate().unwrap();
        assert_eq!(address.full_name(), "Ada Lovelace");
        assert_eq!(address.country(), DEFAULT_COUNTRY);
        assert_eq!(address.address_line_2(), None);
    }

    #[test]
    fn test_missing_town_is_incomplete() {
        let input = ShippingAddressInput {
            town: None,
            ..complete()
        };
        assert_eq!(input.validate(), Err(IncompleteAddress("town")));
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let input = ShippingAddressInput {
            postcode: Some("   ".to_owned()),
            ..complete()
        };
        assert_eq!(input.validate(), Err(IncompleteAddress("postcode")));
    }

    #[test]
    fn test_optional_fields_are_trimmed() {
        let input = ShippingAddressInput {
            address2: Some("  Flat 3 ".to_owned()),
            country: Some(" Ireland ".to_owned()),
            full_name: Some("  Ada  ".to_owned()),
            ..complete()
        };
        let address = input.validate().unwrap();
        assert_eq!(address.address_line_2(), Some("Flat 3"));
        assert_eq!(address.country(), "Ireland");
        assert_eq!(address.full_name(), "Ada");
    }

    #[test]
    fn test_blank_optional_fields_fall_back() {
        let input = ShippingAddressInput {
            address2: Some(String::new()),
            country: Some("  ".to_owned()),
            ..complete()
        };
        let address = input.validate().unwrap();
        assert_eq!(address.address_line_2(), None);
        assert_eq!(address.country(), DEFAULT_COUNTRY);
    }

    #[test]
    fn test_deserializes_camel_case() {
        let json = r#"{"fullName":"A","address1":"B","town":"C","postcode":"D"}"#;
        let input: ShippingAddressInput = serde_json::from_str(json).unwrap();
        assert!(input.validate().is_ok());

        let partial: ShippingAddressInput = serde_json::from_str(r#"{"fullName":"A"}"#).unwrap();
        assert_eq!(partial.validate(), Err(IncompleteAddress("address1")));
    }

    #[test]
    fn test_numeric_postcode_is_read_as_text() {
        let json = r#"{"fullName":"A","address1":"B","town":"C","postcode":12345}"#;
        let input: ShippingAddressInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.validate().unwrap().postal_code(), "12345");
    }

    #[test]
    fn test_non_text_fields_read_as_absent() {
        let json = r#"{"fullName":"A","address1":"B","town":{"name":"C"},"postcode":"D","country":null}"#;
        let input: ShippingAddressInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.validate(), Err(IncompleteAddress("town")));

        let json = r#"{"fullName":true,"address1":"B","town":"C","postcode":"D"}"#;
        let input: ShippingAddressInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.validate(), Err(IncompleteAddress("fullName")));
    }
}
