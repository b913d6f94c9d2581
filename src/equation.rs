//! Equation capability traits.
//!
//! An equation governs exactly one state variable and reads any number of
//! inputs, all by id through [`ModelValues`]. It holds no history of its own:
//! everything time-dependent lives in the values.
//!
//! A [`PrognosticEquation`] splits its derivative into three parts,
//!
//! ```text
//! dv/dt = linear_factor(t) * v + nonlinear_addend(t, v) + independent_addend(t)
//! ```
//!
//! so that implicit schemes can isolate the linear factor without evaluating
//! the unknown future value. A [`DiagnosticEquation`] has no derivative; its
//! variable is computed algebraically from the current inputs.

use crate::{error::Result, value_set::ModelValues};

/// Identity shared by every equation.
pub trait Equation {
    /// Id of the state variable this equation governs.
    fn variable(&self) -> &str;

    /// Ids of the other values this equation reads.
    fn inputs(&self) -> Vec<&str>;

    /// Short description, for display.
    fn description(&self) -> &str {
        "an equation"
    }

    /// Latest recorded time across the variable and every input.
    ///
    /// This is the default evaluation time of an equation.
    ///
    /// # Errors
    ///
    /// Fails if an id is unknown or none of the values has data.
    fn latest_time(&self, values: &ModelValues) -> Result<f64> {
        values.latest_time(std::iter::once(self.variable()).chain(self.inputs()))
    }
}

/// An equation with a time derivative, advanced by a numerical scheme.
pub trait PrognosticEquation: Equation {
    /// Coefficient multiplying the variable's own value.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated at `time`.
    fn linear_factor(&self, values: &ModelValues, time: f64) -> Result<f64>;

    /// Contribution that is a nonlinear function of the variable itself,
    /// evaluated at `variable_value` rather than solved for.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated at `time`.
    fn nonlinear_addend(&self, values: &ModelValues, time: f64, variable_value: f64)
    -> Result<f64>;

    /// Contribution independent of the variable.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated at `time`.
    fn independent_addend(&self, values: &ModelValues, time: f64) -> Result<f64>;

    /// The derivative at `time`, using the variable's interpolated value there.
    ///
    /// # Errors
    ///
    /// Fails if the variable or an input cannot be evaluated at `time`.
    fn derivative(&self, values: &ModelValues, time: f64) -> Result<f64> {
        let variable_value = values.value_at(self.variable(), time)?;
        self.derivative_with(values, time, variable_value)
    }

    /// The derivative at `time` for a trial variable value.
    ///
    /// Multi-stage schemes use this to evaluate intermediate states that are
    /// never recorded.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated at `time`.
    fn derivative_with(&self, values: &ModelValues, time: f64, variable_value: f64) -> Result<f64> {
        let linear = self.linear_factor(values, time)?;
        let nonlinear = self.nonlinear_addend(values, time, variable_value)?;
        let independent = self.independent_addend(values, time)?;
        Ok(linear * variable_value + nonlinear + independent)
    }

    /// The derivative at the equation's [`latest_time`](Equation::latest_time).
    ///
    /// # Errors
    ///
    /// Fails like [`latest_time`](Equation::latest_time) or
    /// [`derivative`](Self::derivative).
    fn current_derivative(&self, values: &ModelValues) -> Result<f64> {
        let time = self.latest_time(values)?;
        self.derivative(values, time)
    }
}

/// An equation whose variable is computed from the current inputs.
///
/// Diagnostic variables are evaluated, not integrated; once recorded they are
/// read like any other input.
pub trait DiagnosticEquation: Equation {
    /// Computes the variable's value at `time`.
    ///
    /// # Errors
    ///
    /// Fails if an input cannot be evaluated at `time`.
    fn evaluate(&self, values: &ModelValues, time: f64) -> Result<f64>;
}
