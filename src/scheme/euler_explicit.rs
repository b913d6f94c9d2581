use crate::{
    equation::PrognosticEquation,
    error::Result,
    support::constraint::{Constrained, StrictlyPositive},
    value_set::ModelValues,
};

use super::{NumericalScheme, Span};

/// Forward Euler, `v(t+dt) = v(t) + dt f(t)`.
///
/// Every input is read at the start of the step. Conditionally stable: the
/// step must stay below the fastest time constant of the equation, which is
/// not checked.
#[derive(Debug, Clone)]
pub struct EulerExplicit<E> {
    equation: E,
    max_time_step: Option<f64>,
}

impl<E: PrognosticEquation> EulerExplicit<E> {
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

impl<E: PrognosticEquation> NumericalScheme for EulerExplicit<E> {
    fn variable(&self) -> &str {
        self.equation.variable()
    }

    fn description(&self) -> &str {
        "Euler explicit"
    }

    fn max_time_step(&self) -> Option<f64> {
        self.max_time_step
    }

    fn needed_time_offsets(&self, _time_step: f64) -> Vec<f64> {
        vec![0.0]
    }

    fn step(&self, values: &ModelValues, span: Span) -> Result<f64> {
        let time = span.start();
        let value = values.value_at(self.variable(), time)?;
        let derivative = self.equation.derivative_with(values, time, value)?;
        Ok(value + span.size() * derivative)
    }
}
