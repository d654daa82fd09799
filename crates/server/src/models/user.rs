//! User domain types.
//!
//! Login and registration are handled elsewhere; this crate only manages
//! profile data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eco_friendly_core::{Email, UserId};

use super::{InvalidInput, non_blank};

/// A user as shown to admins and to the user themself. No credentials.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub user_id: UserId,
    pub user_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_no: Option<String>,
    pub address: Option<String>,
    pub updated_on: DateTime<Utc>,
}

/// `PUT /admin/users/{id}` and `PUT /user/profile/{id}` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdateInput {
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub mobile_no: Option<String>,
    pub address: Option<String>,
}

/// A validated partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub mobile_no: Option<String>,
    pub address: Option<String>,
}

impl UserUpdateInput {
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if no field is supplied or the email does not parse.
    pub fn validate(self) -> Result<UserUpdate, InvalidInput> {
        let email = match non_blank(self.email) {
            Some(raw) => {
                Some(Email::parse(&raw).map_err(|_| InvalidInput("Please enter a valid email address"))?)
            }
            None => None,
        };

        let update = UserUpdate {
            user_name: non_blank(self.user_name),
            first_name: non_blank(self.first_name),
            last_name: non_blank(self.last_name),
            email,
            mobile_no: non_blank(self.mobile_no),
            address: non_blank(self.address),
        };

        if update == UserUpdate::default() {
            return Err(InvalidInput("No fields to update"));
        }
        Ok(update)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update() {
        let input: UserUpdateInput =
            serde_json::from_str(r#"{"mobile_no":"07700 900123","email":"A@B.COM"}"#).unwrap();
        let update = input.validate().unwrap();
        assert_eq!(update.mobile_no.as_deref(), Some("07700 900123"));
        assert_eq!(update.email.unwrap().as_str(), "A@b.com");
        assert_eq!(update.user_name, None);
    }

    #[test]
    fn test_empty_update_rejected() {
        let input: UserUpdateInput = serde_json::from_str(r#"{"address":"  "}"#).unwrap();
        assert_eq!(input.validate(), Err(InvalidInput("No fields to update")));
    }

    #[test]
    fn test_bad_email_rejected() {
        let input = UserUpdateInput {
            email: Some("nope".to_owned()),
            ..UserUpdateInput::default()
        };
        assert!(input.validate().is_err());
    }
}
