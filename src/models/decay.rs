use crate::{
    equation::{Equation, PrognosticEquation},
    error::Result,
    value_set::ModelValues,
};

/// Linear decay towards a forced equilibrium, `dT/dt = -a T + F`.
///
/// `a` is read from the rate value and `F` from the forcing value, both
/// interpolated at the evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearDecay {
    variable: String,
    rate: String,
    forcing: String,
}

impl LinearDecay {
    pub fn new(
        variable: impl Into<String>,
        rate: impl Into<String>,
        forcing: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            rate: rate.into(),
            forcing: forcing.into(),
        }
    }
}

impl Equation for LinearDecay {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn inputs(&self) -> Vec<&str> {
        vec![self.rate.as_str(), self.forcing.as_str()]
    }

    fn description(&self) -> &str {
        "linear decay"
    }
}

impl PrognosticEquation for LinearDecay {
    fn linear_factor(&self, values: &ModelValues, time: f64) -> Result<f64> {
        Ok(-values.value_at(&self.rate, time)?)
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
        values.value_at(&self.forcing, time)
    }
}
