use crate::{
    equation::{Equation, PrognosticEquation},
    error::Result,
    value_set::ModelValues,
};

/// Lumped heat exchange with another body, `dT/dt = -k (T - T_other)`.
///
/// `k` is the exchange coefficient (conductance over heat capacity, in 1/s).
/// The other body's temperature is read as an input, so two instances
/// pointing at each other form a coupled pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatExchange {
    variable: String,
    other: String,
    coefficient: String,
}

impl HeatExchange {
    pub fn new(
        variable: impl Into<String>,
        other: impl Into<String>,
        coefficient: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            other: other.into(),
            coefficient: coefficient.into(),
        }
    }
}

impl Equation for HeatExchange {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn inputs(&self) -> Vec<&str> {
        vec![self.other.as_str(), self.coefficient.as_str()]
    }

    fn description(&self) -> &str {
        "lumped heat exchange"
    }
}

impl PrognosticEquation for HeatExchange {
    fn linear_factor(&self, values: &ModelValues, time: f64) -> Result<f64> {
        Ok(-values.value_at(&self.coefficient, time)?)
    }

    fn nonlinear_addend(
        &self,
        _values: &ModelValues,
        _time: f64,
        _variable_value: f64,
    ) -> Result<f64> {
        Ok(0.0)
    }

    fn independent_addend(&self, values: &ModelValues, time: f64) -> Result<f64> {
        let k = values.value_at(&self.coefficient, time)?;
        let other = values.value_at(&self.other, time)?;
        Ok(k * other)
    }
}
