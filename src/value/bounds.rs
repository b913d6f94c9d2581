use crate::error::{Error, Result};

/// Closed interval every recorded value must lie in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Creates bounds `[lower, upper]`.
    ///
    /// Infinite limits are allowed; use them for one-sided bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if either limit is `NaN` or `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(Error::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Bounds that admit every value.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Bounds that only forbid negative values.
    #[must_use]
    pub const fn non_negative() -> Self {
        Self {
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }

    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns `true` if `value` lies within the bounds.
    ///
    /// `NaN` is never contained.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Clamps `value` into the bounds. `NaN` passes through unchanged.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// What a write does with a value outside the bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Record the nearest value inside the bounds.
    #[default]
    Clamp,
    /// Fail with [`Error::BoundsViolation`].
    Reject,
}
