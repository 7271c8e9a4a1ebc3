//! Postal pincode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Pincode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PincodeError {
    /// The input string is empty.
    #[error("pincode cannot be empty")]
    Empty,
    /// The input is not exactly 6 digits.
    #[error("pincode must be exactly 6 digits")]
    Invalid,
}

/// A 6-digit postal pincode.
///
/// ## Examples
///
/// ```
/// use general_store_core::Pincode;
///
/// assert!(Pincode::parse("560001").is_ok());
/// assert!(Pincode::parse("5600").is_err());
/// assert!(Pincode::parse("56000a").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Number of digits in a valid pincode.
    pub const DIGITS: usize = 6;

    /// Parse a `Pincode` from a string.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or is not exactly
    /// 6 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, PincodeError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(PincodeError::Empty);
        }

        if trimmed.len() != Self::DIGITS || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PincodeError::Invalid);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the pincode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Pincode {
    type Err = PincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Pincode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
