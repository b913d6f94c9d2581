use crate::{
    equation::PrognosticEquation,
    error::{Error, Result},
    support::constraint::{Constrained, StrictlyPositive},
    value_set::ModelValues,
};

use super::{NumericalScheme, Span};

/// Semi-implicit backward Euler.
///
/// Only the linear part of the derivative is treated implicitly:
///
/// ```text
/// v(t+dt) = (v(t) + dt (nonlinear(t, v(t)) + independent(t))) / (1 - dt linear(t+dt))
/// ```
///
/// The linear factor is read at the end of the step, everything else at the
/// start. No root-finding is involved, so a nonlinear self-term is only as
/// stable as its explicit treatment.
#[derive(Debug, Clone)]
pub struct EulerImplicit<E> {
    equation: E,
    max_time_step: Option<f64>,
}

impl<E: PrognosticEquation> EulerImplicit<E> {
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

impl<E: PrognosticEquation> NumericalScheme for EulerImplicit<E> {
    fn variable(&self) -> &str {
        self.equation.variable()
    }

    fn description(&self) -> &str {
        "Euler implicit"
    }

    fn max_time_step(&self) -> Option<f64> {
        self.max_time_step
    }

    fn needed_time_offsets(&self, time_step: f64) -> Vec<f64> {
        vec![0.0, time_step]
    }

    fn step(&self, values: &ModelValues, span: Span) -> Result<f64> {
        let (start, end, dt) = (span.start(), span.end(), span.size());

        let value = values.value_at(self.variable(), start)?;
        let nonlinear = self.equation.nonlinear_addend(values, start, value)?;
        let independent = self.equation.independent_addend(values, start)?;
        let linear_factor = self.equation.linear_factor(values, end)?;

        let denominator = 1.0 - dt * linear_factor;
        if denominator == 0.0 {
            return Err(Error::SingularStep {
                variable: self.variable().to_owned(),
                time_step: dt,
                linear_factor,
            });
        }

        Ok((value + dt * (nonlinear + independent)) / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::{LinearDecay, Logistic},
        scheme::test_support::decay_values,
        value::{Interpolation, TimeSeriesValue, ValueConfig},
    };

    #[test]
    fn single_step_of_linear_decay() {
        let mut values = decay_values();
        let scheme = EulerImplicit::new(LinearDecay::new("T", "a", "F"));

        let point = scheme.integrate(&mut values, 60.0).unwrap();

        assert_eq!(point.time, 60.0);
        assert_relative_eq!(
            point.value,
            (293.15 + 60.0 * 28.0) / (1.0 + 60.0 * 0.1),
            epsilon = 1e-9,
        );
        assert_relative_eq!(point.value, 1973.15 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_factor_is_read_at_the_end_of_the_step() {
        let mut values = decay_values();
        let rate = values.input_mut("a").unwrap();
        rate.set_at(0.2, 10.0).unwrap();

        let scheme = EulerImplicit::new(LinearDecay::new("T", "a", "F"));
        let value = scheme.step(&values, Span::new(0.0, 10.0).unwrap()).unwrap();

        assert_relative_eq!(value, (293.15 + 10.0 * 28.0) / (1.0 + 10.0 * 0.2), epsilon = 1e-9);
    }

    #[test]
    fn interpolates_forcing_at_the_start() {
        let mut values = decay_values();
        let linear = ValueConfig::new("G").with_interpolation(Interpolation::Linear);
        values
            .add_forcing(
                TimeSeriesValue::with_history(linear, &[-10.0, 10.0], &[0.0, 20.0]).unwrap(),
            )
            .unwrap();

        let scheme = EulerImplicit::new(LinearDecay::new("T", "a", "G"));
        let value = scheme.step(&values, Span::new(0.0, 5.0).unwrap()).unwrap();

        assert_relative_eq!(value, (293.15 + 5.0 * 10.0) / (1.0 + 5.0 * 0.1), epsilon = 1e-9);
    }

    #[test]
    fn singular_denominator() {
        let mut values = decay_values();
        let rate = values.input_mut("a").unwrap();
        rate.set_at(-0.5, 0.0).unwrap();

        let scheme = EulerImplicit::new(LinearDecay::new("T", "a", "F"));
        let err = scheme.integrate(&mut values, 2.0).unwrap_err();

        assert_eq!(
            err,
            Error::SingularStep {
                variable: "T".to_owned(),
                time_step: 2.0,
                linear_factor: 0.5,
            }
        );
        assert_eq!(values.get("T").unwrap().len(), 1);
    }

    #[test]
    fn nonlinear_term_uses_the_start_value() {
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

        let scheme = EulerImplicit::new(Logistic::new("N", "r", "K"));
        let value = scheme.step(&values, Span::new(0.0, 1.0).unwrap()).unwrap();

        // 1 - dt * r = 0.5, nonlinear = -r N^2 / K = -0.5
        assert_relative_eq!(value, (10.0 - 0.5) / 0.5, epsilon = 1e-9);
    }

    #[test]
    fn reads_start_and_end() {
        let scheme = EulerImplicit::new(LinearDecay::new("T", "a", "F"));
        assert_eq!(scheme.needed_time_offsets(4.0), [0.0, 4.0]);
        assert_eq!(scheme.description(), "Euler implicit");
    }
}
