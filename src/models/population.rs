use crate::{
    equation::{Equation, PrognosticEquation},
    error::Result,
    value_set::ModelValues,
};

/// Logistic growth, `dN/dt = r N (1 - N / K)`.
///
/// Split as a linear factor `r` and a nonlinear addend `-r N² / K`, so
/// semi-implicit schemes treat the growth implicitly and the crowding term
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logistic {
    variable: String,
    rate: String,
    capacity: String,
}

impl Logistic {
    pub fn new(
        variable: impl Into<String>,
        rate: impl Into<String>,
        capacity: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            rate: rate.into(),
            capacity: capacity.into(),
        }
    }
}

impl Equation for Logistic {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn inputs(&self) -> Vec<&str> {
        vec![self.rate.as_str(), self.capacity.as_str()]
    }

    fn description(&self) -> &str {
        "logistic growth"
    }
}

impl PrognosticEquation for Logistic {
    fn linear_factor(&self, values: &ModelValues, time: f64) -> Result<f64> {
        values.value_at(&self.rate, time)
    }

    fn nonlinear_addend(
        &self,
        values: &ModelValues,
        time: f64,
        variable_value: f64,
    ) -> Result<f64> {
        let r = values.value_at(&self.rate, time)?;
        let k = values.value_at(&self.capacity, time)?;
        Ok(-r * variable_value * variable_value / k)
    }

    fn independent_addend(&self, _values: &ModelValues, _time: f64) -> Result<f64> {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::value::{TimeSeriesValue, ValueConfig};

    fn values() -> ModelValues {
        let mut values = ModelValues::new();
        for (id, value) in [("r", 0.5), ("K", 100.0)] {
            values
                .add_parameter(
                    TimeSeriesValue::with_initial(ValueConfig::new(id), 0.0, value).unwrap(),
                )
                .unwrap();
        }
        values
            .add_variable(
                TimeSeriesValue::with_initial(ValueConfig::new("N"), 0.0, 10.0).unwrap(),
            )
            .unwrap();
        values
    }

    #[test]
    fn decomposition_recomposes_to_logistic_rate() {
        let equation = Logistic::new("N", "r", "K");
        let values = values();

        // 0.5 * 10 * (1 - 10 / 100)
        assert_relative_eq!(equation.derivative(&values, 0.0).unwrap(), 4.5, epsilon = 1e-9);
    }

    #[test]
    fn trial_values_feed_the_nonlinear_addend() {
        let equation = Logistic::new("N", "r", "K");
        let values = values();

        assert_relative_eq!(
            equation.derivative_with(&values, 0.0, 100.0).unwrap(),
            0.0,
            epsilon = 1e-9,
        );
        assert_relative_eq!(
            equation.derivative_with(&values, 0.0, 50.0).unwrap(),
            12.5,
            epsilon = 1e-9,
        );
    }
}
