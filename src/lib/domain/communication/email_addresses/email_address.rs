//! Email Address

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use EmailAddressError::*;

lazy_static! {
    // One `@`, a non-empty local part, and a domain whose first `.` has text on both sides.
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^@]+@[^@.]+\.[^@]+$").expect("email address pattern is valid");
}

/// An error that can occur when creating an email address
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailAddressError {
    /// The email address is empty
    #[error("email address is empty")]
    EmptyEmailAddress,

    /// The email address is invalid
    #[error("email address is invalid")]
    InvalidEmailAddress,
}

/// An email address, trimmed of surrounding whitespace.
///
/// The format check is deliberately coarse: it is a structural sanity check, not RFC 5322
/// validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address
    pub fn new(raw: &str) -> Result<Self, EmailAddressError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmptyEmailAddress);
        }

        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(InvalidEmailAddress);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_email_address_display() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(format!("{}", email), "email@example.com".to_string());

        Ok(())
    }

    #[test]
    fn test_email_address_is_trimmed() -> TestResult {
        let email = EmailAddress::new("  test@example.com  ")?;

        assert_eq!(email.as_str(), "test@example.com");

        Ok(())
    }

    #[test]
    fn test_empty_email_address_is_invalid() {
        assert_eq!(EmailAddress::new(""), Err(EmptyEmailAddress));
        assert_eq!(EmailAddress::new("   "), Err(EmptyEmailAddress));
    }

    #[test]
    fn test_malformed_email_addresses_are_invalid() {
        for raw in [
            "missingatsign.com",
            "@example.com",
            "test@",
            "test@example",
            "test@.com",
            "test@example.",
            "test@@example.com",
            "test@one@example.com",
        ] {
            assert_eq!(
                EmailAddress::new(raw),
                Err(InvalidEmailAddress),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_coarse_check_accepts_unusual_domains() -> TestResult {
        EmailAddress::new("a@b.c")?;
        EmailAddress::new("first.last@mail.example.co.uk")?;

        Ok(())
    }

    #[test]
    fn test_valid_email_to_string() -> TestResult {
        let email = EmailAddress::new("email@example.com")?;

        assert_eq!(String::from(email), "email@example.com".to_string());

        Ok(())
    }
}
