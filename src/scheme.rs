//! Numerical schemes.
//!
//! A scheme binds one [`PrognosticEquation`](crate::equation::PrognosticEquation)
//! to a stepping algorithm. Stepping is split in two:
//!
//! - [`step`](NumericalScheme::step) computes the intended new value from
//!   reads only, so a [`SchemeSet`] can evaluate every scheme against the same
//!   pre-step state before anything is written.
//! - [`integrate`](NumericalScheme::integrate) steps a single scheme and
//!   commits the result to its variable.
//!
//! Provided schemes:
//!
//! - [`EulerExplicit`]: `v(t+dt) = v(t) + dt f(t)`
//! - [`EulerImplicit`]: semi-implicit backward Euler using the linear factor
//! - [`LeapFrog`]: `v(t+dt) = v(t-dt) + 2 dt f(t)`
//! - [`RungeKutta4`]: classic fourth-order Runge-Kutta

mod euler_explicit;
mod euler_implicit;
mod leap_frog;
mod runge_kutta4;
mod set;
mod span;

pub use euler_explicit::EulerExplicit;
pub use euler_implicit::EulerImplicit;
pub use leap_frog::LeapFrog;
pub use runge_kutta4::RungeKutta4;
pub use set::SchemeSet;
pub use span::Span;

use tracing::error;

use crate::{
    error::{Error, Result},
    value::Point,
    value_set::ModelValues,
};

/// A stepping algorithm bound to one equation.
pub trait NumericalScheme {
    /// Id of the state variable this scheme advances.
    fn variable(&self) -> &str;

    /// Short description, for display.
    fn description(&self) -> &str;

    /// Largest step this scheme accepts, if limited.
    fn max_time_step(&self) -> Option<f64>;

    /// Times, relative to the start of a step of size `time_step`, at which
    /// this scheme reads its inputs.
    fn needed_time_offsets(&self, time_step: f64) -> Vec<f64>;

    /// Computes the variable's value at `span.end()` without writing anything.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated or the algorithm breaks down.
    fn step(&self, values: &ModelValues, span: Span) -> Result<f64>;

    /// Steps from the start of `span` and records the result at its end.
    ///
    /// Returns the recorded point, after bounds handling.
    ///
    /// # Errors
    ///
    /// Fails like [`step`](Self::step), with [`Error::NonFiniteResult`] if the
    /// new value is not finite, or like
    /// [`TimeSeriesValue::set_at`](crate::value::TimeSeriesValue::set_at).
    fn integrate_over(&self, values: &mut ModelValues, span: Span) -> Result<Point> {
        let value = checked(self.variable(), self.step(values, span)?)?;
        let value = values.variable_mut(self.variable())?.set_at(value, span.end())?;
        Ok(Point {
            time: span.end(),
            value,
        })
    }

    /// Advances the variable by one step of `time_step` from its latest
    /// recorded time.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidTimeStep`] for a non-positive step,
    /// [`Error::NoDataAvailable`] if the variable has no history, or like
    /// [`integrate_over`](Self::integrate_over).
    fn integrate(&self, values: &mut ModelValues, time_step: f64) -> Result<Point> {
        let start = values.get(self.variable())?.current()?.time;
        let span = Span::from_step(start, time_step)?;
        self.integrate_over(values, span)
    }
}

/// Rejects `NaN` and infinite scheme results before they are committed.
pub(crate) fn checked(variable: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        error!(variable, value, "non-finite scheme result");
        Err(Error::NonFiniteResult {
            variable: variable.to_owned(),
            value,
        })
    }
}
