//! Quantities

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quantity outside `[Quantity::MIN, Quantity::MAX]`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("quantity {0} is outside 1..=10")]
pub struct QuantityOutOfRange(pub u8);

/// Units of one product in the cart, always within `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quantity(u8);

impl Quantity {
    /// Smallest allowed quantity.
    pub const MIN: Self = Self(1);

    /// Largest allowed quantity.
    pub const MAX: Self = Self(10);

    /// Clamps any requested quantity into range.
    pub fn clamped(requested: i64) -> Self {
        let value = requested.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));

        // In range after the clamp, so the conversion cannot fail.
        Self(u8::try_from(value).unwrap_or(Self::MAX.0))
    }

    /// Returns the next quantity, or `None` at [`Quantity::MAX`].
    pub fn checked_increment(self) -> Option<Self> {
        Self::try_from(self.0 + 1).ok()
    }

    /// Returns the raw value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Quantity {
    type Error = QuantityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QuantityOutOfRange(value))
        }
    }
}

impl From<Quantity> for u8 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
