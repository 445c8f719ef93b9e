//! Validated spending cap.

use std::fmt;

use crate::error::{KnapforgeError, Result};

/// A non-negative, finite budget.
///
/// The budget is not part of the catalog; it is supplied per solve call.
///
/// # Example
///
/// ```
/// use knapforge_core::Budget;
///
/// let budget = Budget::new(300.0).unwrap();
/// assert_eq!(budget.value(), 300.0);
/// assert!(Budget::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Budget(f64);

impl Budget {
    pub const ZERO: Budget = Budget(0.0);

    /// Creates a budget, rejecting negative, NaN and infinite values.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(KnapforgeError::InvalidBudget(value));
        }
        // Normalise -0.0 so formatting and comparisons stay stable.
        Ok(Self(value + 0.0))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if `cost` fits within this budget.
    #[inline]
    pub fn admits(self, cost: f64) -> bool {
        cost <= self.0
    }
}

impl TryFrom<f64> for Budget {
    type Error = KnapforgeError;

    fn try_from(value: f64) -> Result<Self> {
        Budget::new(value)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
