use crate::{
    equation::PrognosticEquation,
    error::Result,
    support::constraint::{Constrained, StrictlyPositive},
    value_set::ModelValues,
};

use super::{NumericalScheme, Span};

/// Classic fourth-order Runge-Kutta.
///
/// Inputs are interpolated at the stage times `t`, `t + dt/2` and `t + dt`.
/// The stage values of the variable itself are trial values passed to
/// [`PrognosticEquation::derivative_with`] and are never recorded. Other
/// prognostic variables are held at their recorded history during the stages,
/// so coupling between schemes is first order.
#[derive(Debug, Clone)]
pub struct RungeKutta4<E> {
    equation: E,
    max_time_step: Option<f64>,
}

impl<E: PrognosticEquation> RungeKutta4<E> {
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

impl<E: PrognosticEquation> NumericalScheme for RungeKutta4<E> {
    fn variable(&self) -> &str {
        self.equation.variable()
    }

    fn description(&self) -> &str {
        "Runge-Kutta 4"
    }

    fn max_time_step(&self) -> Option<f64> {
        self.max_time_step
    }

    fn needed_time_offsets(&self, time_step: f64) -> Vec<f64> {
        vec![0.0, 0.5 * time_step, time_step]
    }

    fn step(&self, values: &ModelValues, span: Span) -> Result<f64> {
        let (t0, mid, end, dt) = (span.start(), span.midpoint(), span.end(), span.size());
        let f = |time, value| self.equation.derivative_with(values, time, value);

        let v0 = values.value_at(self.variable(), t0)?;

        // k1 = f(t, v)
        let k1 = f(t0, v0)?;
        // k2 = f(t + dt/2, v + dt k1 / 2)
        let k2 = f(mid, v0 + 0.5 * dt * k1)?;
        // k3 = f(t + dt/2, v + dt k2 / 2)
        let k3 = f(mid, v0 + 0.5 * dt * k2)?;
        // k4 = f(t + dt, v + dt k3)
        let k4 = f(end, v0 + dt * k3)?;

        Ok(v0 + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::{LinearDecay, Logistic},
        scheme::{EulerExplicit, test_support::decay_values},
        value::{TimeSeriesValue, ValueConfig},
    };

    fn logistic_values() -> ModelValues {
        let mut values = ModelValues::new();
        values
            .add_variable(
                TimeSeriesValue::with_initial(ValueConfig::new("N"), 0.0, 10.0).unwrap(),
            )
            .unwrap();
        values
            .add_parameter(
                TimeSeriesValue::with_initial(ValueConfig::new("r"), 0.0, 0.5).unwrap(),
            )
            .unwrap();
        values
            .add_parameter(
                TimeSeriesValue::with_initial(ValueConfig::new("K"), 0.0, 100.0).unwrap(),
            )
            .unwrap();
        values
    }

    #[test]
    fn logistic_growth_matches_closed_form() {
        let mut values = logistic_values();
        let scheme = RungeKutta4::new(Logistic::new("N", "r", "K"));

        for _ in 0..20 {
            scheme.integrate(&mut values, 0.25).unwrap();
        }

        let point = values.get("N").unwrap().current().unwrap();
        let exact = 100.0 / (1.0 + 9.0 * (-0.5 * point.time).exp());
        assert_eq!(point.time, 5.0);
        // global error at this step size is about 3e-5
        assert_relative_eq!(point.value, exact, epsilon = 1e-4);
    }

    #[test]
    fn far_more_accurate_than_forward_euler() {
        let equation = LinearDecay::new("T", "a", "F");
        let exact = 280.0 + (293.15 - 280.0) * (-1.0_f64).exp();

        let mut rk = decay_values();
        let mut euler = decay_values();
        for _ in 0..10 {
            RungeKutta4::new(equation.clone()).integrate(&mut rk, 1.0).unwrap();
            EulerExplicit::new(equation.clone()).integrate(&mut euler, 1.0).unwrap();
        }

        let rk_error = (rk.get("T").unwrap().current().unwrap().value - exact).abs();
        let euler_error = (euler.get("T").unwrap().current().unwrap().value - exact).abs();
        assert!(rk_error < 1e-5);
        assert!(rk_error * 1000.0 < euler_error);
    }

    #[test]
    fn reads_the_stage_times() {
        let scheme = RungeKutta4::new(LinearDecay::new("T", "a", "F"));
        assert_eq!(scheme.needed_time_offsets(2.0), [0.0, 1.0, 2.0]);
        assert_eq!(scheme.description(), "Runge-Kutta 4");
    }
}
