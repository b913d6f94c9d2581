use tracing::trace;

use crate::{
    equation::PrognosticEquation,
    error::Result,
    support::constraint::{Constrained, StrictlyPositive},
    value::TimeSeriesValue,
    value_set::ModelValues,
};

use super::{NumericalScheme, Span};

/// Relative tolerance, in step sizes, for matching `t - dt` to a recorded time.
const TIME_MATCH_TOLERANCE: f64 = 1e-9;

/// Leap-frog, `v(t+dt) = v(t-dt) + 2 dt f(t)`.
///
/// The previous value is read from the variable's own history and must be a
/// point recorded at `t - dt`, up to rounding. When there is no such point,
/// as on the first step or on a step shortened to land on a requested time,
/// the scheme takes a plain forward Euler step instead.
#[derive(Debug, Clone)]
pub struct LeapFrog<E> {
    equation: E,
    max_time_step: Option<f64>,
}

impl<E: PrognosticEquation> LeapFrog<E> {
    pub fn new(equation: E) -> Self {
        Self {
            equation,
            max_time_step: None,
        }
    }

    /// Limits the step size this scheme accepts.
    #[must_use]
    pub fn with_max_time_step(mut self, max_time_step: Constrained<f64, StrictlyPositive>) -> Self {
        self.max_time_step = Some(max_time_step.into_inner());
        self
    }

    pub fn equation(&self) -> &E {
        &self.equation
    }
}

impl<E: PrognosticEquation> NumericalScheme for LeapFrog<E> {
    fn variable(&self) -> &str {
        self.equation.variable()
    }

    fn description(&self) -> &str {
        "leap-frog"
    }

    fn max_time_step(&self) -> Option<f64> {
        self.max_time_step
    }

    fn needed_time_offsets(&self, time_step: f64) -> Vec<f64> {
        vec![-time_step, 0.0]
    }

    fn step(&self, values: &ModelValues, span: Span) -> Result<f64> {
        let (time, dt) = (span.start(), span.size());
        let previous_time = time - dt;

        let history = values.get(self.variable())?;
        let value = history.at(time)?;
        let derivative = self.equation.derivative_with(values, time, value)?;

        let tolerance = TIME_MATCH_TOLERANCE * dt;
        match recorded_value(history, previous_time, tolerance) {
            Some(previous) => Ok(previous + 2.0 * dt * derivative),
            None => {
                trace!(variable = self.variable(), time, "leap-frog euler step");
                Ok(value + dt * derivative)
            }
        }
    }
}

/// The value recorded within `tolerance` of `time`, if any.
fn recorded_value(history: &TimeSeriesValue, time: f64, tolerance: f64) -> Option<f64> {
    let times = history.times();
    let index = times.partition_point(|&t| t < time - tolerance);
    match times.get(index) {
        Some(&recorded) if (recorded - time).abs() <= tolerance => Some(history.values()[index]),
        _ => None,
    }
}
