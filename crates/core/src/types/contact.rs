//! Contact form submission.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;
use crate::types::validation::{ValidationError, check_length};

/// A message sent through the storefront contact form.
///
/// `email` stays a plain string on the wire so a malformed address surfaces
/// as a [`ValidationError`] rather than a body-decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub const NAME_LENGTH: (usize, usize) = (2, 120);
    pub const MESSAGE_LENGTH: (usize, usize) = (5, 3000);

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_length("name", &self.name, Self::NAME_LENGTH.0, Self::NAME_LENGTH.1)?;
        Email::parse(&self.email)?;
        check_length(
            "message",
            &self.message,
            Self::MESSAGE_LENGTH.0,
            Self::MESSAGE_LENGTH.1,
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::email::EmailError;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Do you ship to Lisbon?".to_string(),
        }
    }

    #[test]
    fn test_valid_message() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let msg = ContactMessage {
            email: "ada-at-example.com".to_string(),
            ..message()
        };
        assert_eq!(
            msg.validate(),
            Err(ValidationError::Email(EmailError::MissingAtSymbol))
        );
    }

    #[test]
    fn test_name_bounds() {
        let msg = ContactMessage {
            name: "A".to_string(),
            ..message()
        };
        assert_eq!(msg.validate().unwrap_err().field(), "name");

        let msg = ContactMessage {
            name: "A".repeat(121),
            ..message()
        };
        assert_eq!(msg.validate().unwrap_err().field(), "name");

        let msg = ContactMessage {
            name: "A".repeat(120),
            ..message()
        };
        assert!(msg.validate().is_ok());
    }

    #[test]
    fn test_message_bounds() {
        let msg = ContactMessage {
            message: "Hi!!".to_string(),
            ..message()
        };
        assert_eq!(msg.validate().unwrap_err().field(), "message");

        let msg = ContactMessage {
            message: "x".repeat(3001),
            ..message()
        };
        assert_eq!(msg.validate().unwrap_err().field(), "message");
    }
}
