//! Contact form types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eco_friendly_core::{ContactId, Email};

use super::{InvalidInput, non_blank};

/// `POST /contactus` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Email,
    pub message: String,
}

impl ContactInput {
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the first name or message is blank, or the
    /// email does not parse.
    pub fn validate(self) -> Result<NewContact, InvalidInput> {
        let first_name =
            non_blank(self.first_name).ok_or(InvalidInput("First name and message are required"))?;
        let message =
            non_blank(self.message).ok_or(InvalidInput("First name and message are required"))?;
        let email = self
            .email
            .as_deref()
            .map(Email::parse)
            .and_then(Result::ok)
            .ok_or(InvalidInput("Please enter a valid email address"))?;

        Ok(NewContact {
            first_name,
            last_name: non_blank(self.last_name),
            phone_number: non_blank(self.phone_number),
            email,
            message,
        })
    }
}

/// A stored contact message.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub contact_id: ContactId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact() {
        let input: ContactInput = serde_json::from_str(
            r#"{"firstName":"Sam","lastName":"","phoneNumber":"0123","email":"sam@example.org","message":"Hi"}"#,
        )
        .unwrap();
        let contact = input.validate().unwrap();
        assert_eq!(contact.first_name, "Sam");
        assert_eq!(contact.last_name, None);
        assert_eq!(contact.email.as_str(), "sam@example.org");
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let input = ContactInput {
            first_name: Some("Sam".to_owned()),
            email: Some("not-an-email".to_owned()),
            message: Some("Hi".to_owned()),
            ..ContactInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(InvalidInput("Please enter a valid email address"))
        );
    }

    #[test]
    fn test_validate_requires_message() {
        let input = ContactInput {
            first_name: Some("Sam".to_owned()),
            email: Some("sam@example.org".to_owned()),
            message: Some("  ".to_owned()),
            ..ContactInput::default()
        };
        assert!(input.validate().is_err());
    }
}
