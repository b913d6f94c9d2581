use crate::{
    equation::{DiagnosticEquation, Equation},
    error::Result,
    value_set::ModelValues,
};

/// Diagnostic difference of two values, `D = A - B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    variable: String,
    minuend: String,
    subtrahend: String,
}

impl Difference {
    pub fn new(
        variable: impl Into<String>,
        minuend: impl Into<String>,
        subtrahend: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            minuend: minuend.into(),
            subtrahend: subtrahend.into(),
        }
    }
}

impl Equation for Difference {
    fn variable(&self) -> &str {
        &self.variable
    }

    fn inputs(&self) -> Vec<&str> {
        vec![self.minuend.as_str(), self.subtrahend.as_str()]
    }

    fn description(&self) -> &str {
        "difference"
    }
}

impl DiagnosticEquation for Difference {
    fn evaluate(&self, values: &ModelValues, time: f64) -> Result<f64> {
        Ok(values.value_at(&self.minuend, time)? - values.value_at(&self.subtrahend, time)?)
    }
}
