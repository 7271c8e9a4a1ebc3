//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string contains no digits.
    #[error("phone cannot be empty")]
    Empty,
    /// The input does not contain exactly 10 digits.
    #[error("phone must be exactly 10 digits (got {got})")]
    WrongLength {
        /// Number of digits found in the input.
        got: usize,
    },
}

/// A 10-digit phone number.
///
/// Parsing strips every non-digit character first, so formatted input like
/// `"98765 43210"` or `"+91-9876543210"` is rejected or accepted based on the
/// remaining digit count alone. The stored value is always the bare digits.
///
/// ## Examples
///
/// ```
/// use general_store_core::Phone;
///
/// let phone = Phone::parse("98765 43210").unwrap();
/// assert_eq!(phone.as_str(), "9876543210");
///
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Number of digits in a valid phone number.
    pub const DIGITS: usize = 10;

    /// Parse a `Phone` from a string, stripping non-digit characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains no digits or does not
    /// normalize to exactly 10 digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        if digits.len() != Self::DIGITS {
            return Err(PhoneError::WrongLength { got: digits.len() });
        }

        Ok(Self(digits))
    }

    /// Returns the phone number as a string slice of bare digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
