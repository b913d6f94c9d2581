use crate::{
    error::{Error, Result},
    support::constraint::{Finite, StrictlyPositive},
};

/// The interval covered by one integration step.
///
/// Carrying both ends, rather than a start and a size, lets the final step of
/// an integration land exactly on the requested time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    start: f64,
    end: f64,
}

impl Span {
    /// Creates the step `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if either end is not finite, or
    /// [`Error::InvalidTimeStep`] if `end` is not after `start`.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        for time in [start, end] {
            Finite::new(time).map_err(|source| Error::InvalidTime { time, source })?;
        }
        StrictlyPositive::new(end - start).map_err(Error::InvalidTimeStep)?;
        Ok(Self { start, end })
    }

    /// Creates the step starting at `start` of size `time_step`.
    ///
    /// # Errors
    ///
    /// Fails like [`Span::new`].
    pub fn from_step(start: f64, time_step: f64) -> Result<Self> {
        StrictlyPositive::new(time_step).map_err(Error::InvalidTimeStep)?;
        Self::new(start, start + time_step)
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Step size, `end - start`.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the step.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.start + 0.5 * self.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintError;

    #[test]
    fn valid_span() {
        let span = Span::from_step(10.0, 4.0).unwrap();
        assert_eq!(span.start(), 10.0);
        assert_eq!(span.end(), 14.0);
        assert_eq!(span.size(), 4.0);
        assert_eq!(span.midpoint(), 12.0);
    }

    #[test]
    fn rejects_empty_or_backwards_spans() {
        assert_eq!(
            Span::new(1.0, 1.0),
            Err(Error::InvalidTimeStep(ConstraintError::Zero))
        );
        assert_eq!(
            Span::from_step(1.0, -0.5),
            Err(Error::InvalidTimeStep(ConstraintError::Negative))
        );
    }

    #[test]
    fn rejects_non_finite_ends() {
        assert!(matches!(
            Span::new(0.0, f64::INFINITY),
            Err(Error::InvalidTime { .. })
        ));
    }
}
