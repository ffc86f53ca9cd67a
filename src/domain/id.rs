//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Roblox user identifier - newtype for type safety.
///
/// Always positive. Construct through [`UserId::parse`] or [`UserId::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Create a `UserId` from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotPositive`] for zero.
    pub fn new(id: u64) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::NotPositive);
        }
        Ok(Self(id))
    }

    /// Parse a user id from text.
    ///
    /// Only ASCII digits are accepted; signs, whitespace and other characters
    /// are rejected rather than normalised.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] describing why the input was rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotNumeric {
                value: input.to_string(),
            });
        }
        // All digits, so the only possible failure is overflow.
        let id = input.parse::<u64>().map_err(|_| ValidationError::NotNumeric {
            value: input.to_string(),
        })?;
        Self::new(id)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog asset identifier shared by every copy of the same collectible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(u64);

impl AssetId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AssetId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}
