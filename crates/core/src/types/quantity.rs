//! Positive line-item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A quantity of at least one unit.
///
/// A cart row with zero units never exists: callers that want zero remove
/// the row instead. The type makes that unrepresentable.
///
/// ```
/// use loft_core::Quantity;
///
/// assert!(Quantity::new(0).is_none());
/// assert_eq!(Quantity::from_delta(-4), Quantity::ONE);
/// assert_eq!(Quantity::from_delta(3).get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Interpret a signed value as a quantity, returning `None` when it is
    /// not positive. Values above `u32::MAX` saturate.
    #[must_use]
    pub fn from_signed(value: i64) -> Option<Self> {
        if value < 1 {
            return None;
        }
        Self::new(u32::try_from(value).unwrap_or(u32::MAX))
    }

    /// Quantity contributed by an add-to-cart delta.
    ///
    /// Deltas below one count as a single unit.
    #[must_use]
    pub fn from_delta(delta: i64) -> Self {
        Self::from_signed(delta).unwrap_or(Self::ONE)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
