use std::fmt;

use tracing::{instrument, trace};

use crate::{
    error::{Error, Result},
    value_set::ModelValues,
};

use super::{NumericalScheme, Span, checked};

/// The schemes of one model, stepped together.
///
/// A step runs in two phases. Every scheme first computes its new value from
/// the same pre-step state, then all results are recorded. The outcome does
/// not depend on the order the schemes were added in.
#[derive(Default)]
pub struct SchemeSet {
    schemes: Vec<Box<dyn NumericalScheme>>,
}

impl fmt::Debug for SchemeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.schemes
                    .iter()
                    .map(|scheme| (scheme.variable(), scheme.description())),
            )
            .finish()
    }
}

impl SchemeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VariableAlreadyIntegrated`] if another scheme already
    /// advances the same variable.
    pub fn push(&mut self, scheme: impl NumericalScheme + 'static) -> Result<()> {
        if self.contains(scheme.variable()) {
            return Err(Error::VariableAlreadyIntegrated {
                variable: scheme.variable().to_owned(),
            });
        }
        self.schemes.push(Box::new(scheme));
        Ok(())
    }

    /// Whether some scheme advances this variable.
    #[must_use]
    pub fn contains(&self, variable: &str) -> bool {
        self.schemes.iter().any(|s| s.variable() == variable)
    }

    /// The smallest step limit over all schemes, if any is limited.
    #[must_use]
    pub fn max_time_step(&self) -> Option<f64> {
        self.schemes
            .iter()
            .filter_map(|s| s.max_time_step())
            .reduce(f64::min)
    }

    /// Ids of the advanced variables, in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.schemes.iter().map(|s| s.variable())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Advances every variable over `span`.
    ///
    /// Nothing is written unless every scheme evaluates successfully. A
    /// failure while recording, such as a rejected bounds violation, leaves the
    /// variables recorded before it in place.
    ///
    /// # Errors
    ///
    /// Fails with the first error raised by a scheme, or like
    /// [`TimeSeriesValue::set_at`](crate::value::TimeSeriesValue::set_at).
    #[instrument(skip(self, values))]
    pub fn step(&self, values: &mut ModelValues, span: Span) -> Result<()> {
        let results = self
            .schemes
            .iter()
            .map(|scheme| {
                let variable = scheme.variable();
                let value = checked(variable, scheme.step(values, span)?)?;
                trace!(variable, value, "scheme evaluated");
                Ok((variable, value))
            })
            .collect::<Result<Vec<_>>>()?;

        for (variable, value) in results {
            values.variable_mut(variable)?.set_at(value, span.end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        models::{HeatExchange, LinearDecay},
        scheme::{EulerExplicit, EulerImplicit, RungeKutta4},
        support::constraint::StrictlyPositive,
        value::{Bounds, BoundsPolicy, TimeSeriesValue, ValueConfig},
    };

    fn initial(config: ValueConfig, value: f64) -> TimeSeriesValue {
        TimeSeriesValue::with_initial(config, 0.0, value).unwrap()
    }

    fn two_bodies() -> ModelValues {
        let mut values = ModelValues::new();
        values
            .add_variable(initial(ValueConfig::new("hot"), 350.0))
            .unwrap();
        values
            .add_variable(initial(ValueConfig::new("cold"), 290.0))
            .unwrap();
        values
            .add_parameter(initial(ValueConfig::new("k"), 0.01))
            .unwrap();
        values
    }

    fn stepped(order: [&str; 2]) -> (f64, f64) {
        let mut set = SchemeSet::new();
        for variable in order {
            let other = if variable == "hot" { "cold" } else { "hot" };
            set.push(EulerExplicit::new(HeatExchange::new(variable, other, "k")))
                .unwrap();
        }

        let mut values = two_bodies();
        set.step(&mut values, Span::new(0.0, 10.0).unwrap()).unwrap();

        (
            values.value_at("hot", 10.0).unwrap(),
            values.value_at("cold", 10.0).unwrap(),
        )
    }

    #[test]
    fn coupled_step_is_order_independent() {
        let forward = stepped(["hot", "cold"]);
        let backward = stepped(["cold", "hot"]);

        assert_eq!(forward, backward);
        assert_relative_eq!(forward.0, 344.0, epsilon = 1e-9);
        assert_relative_eq!(forward.1, 296.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_a_second_scheme_for_one_variable() {
        let mut set = SchemeSet::new();
        set.push(EulerExplicit::new(LinearDecay::new("T", "a", "F")))
            .unwrap();
        let err = set
            .push(EulerImplicit::new(LinearDecay::new("T", "a", "F")))
            .unwrap_err();

        assert_eq!(
            err,
            Error::VariableAlreadyIntegrated {
                variable: "T".to_owned()
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn smallest_step_limit_wins() {
        let mut set = SchemeSet::new();
        assert_eq!(set.max_time_step(), None);

        set.push(
            EulerExplicit::new(HeatExchange::new("hot", "cold", "k"))
                .with_max_time_step(StrictlyPositive::new(5.0).unwrap()),
        )
        .unwrap();
        set.push(
            RungeKutta4::new(HeatExchange::new("cold", "hot", "k"))
                .with_max_time_step(StrictlyPositive::new(2.0).unwrap()),
        )
        .unwrap();
        set.push(EulerImplicit::new(LinearDecay::new("T", "a", "F")))
            .unwrap();

        assert_eq!(set.max_time_step(), Some(2.0));
        assert_eq!(set.variables().collect::<Vec<_>>(), ["hot", "cold", "T"]);
    }

    #[test]
    fn failed_evaluation_writes_nothing() {
        let mut set = SchemeSet::new();
        set.push(EulerExplicit::new(HeatExchange::new("hot", "cold", "k")))
            .unwrap();
        set.push(EulerExplicit::new(HeatExchange::new("cold", "hot", "missing")))
            .unwrap();

        let mut values = two_bodies();
        let err = set
            .step(&mut values, Span::new(0.0, 1.0).unwrap())
            .unwrap_err();

        assert_eq!(err, Error::UnknownIdentifier("missing".to_owned()));
        assert_eq!(values.get("hot").unwrap().len(), 1);
        assert_eq!(values.get("cold").unwrap().len(), 1);
    }

    #[test]
    fn bounds_are_applied_on_commit() {
        let mut values = ModelValues::new();
        let config = ValueConfig::new("T")
            .with_bounds(Bounds::new(0.0, 300.0).unwrap())
            .with_bounds_policy(BoundsPolicy::Clamp);
        values.add_variable(initial(config, 293.15)).unwrap();
        values
            .add_parameter(initial(ValueConfig::new("a"), 0.0))
            .unwrap();
        values
            .add_forcing(initial(ValueConfig::new("F"), 10.0))
            .unwrap();

        let mut set = SchemeSet::new();
        set.push(EulerExplicit::new(LinearDecay::new("T", "a", "F")))
            .unwrap();
        set.step(&mut values, Span::new(0.0, 1.0).unwrap()).unwrap();

        assert_eq!(values.value_at("T", 1.0).unwrap(), 300.0);
    }

    #[test]
    fn rejected_commit_keeps_earlier_variables() {
        let bounded = ValueConfig::new("S")
            .with_bounds(Bounds::new(292.0, 400.0).unwrap())
            .with_bounds_policy(BoundsPolicy::Reject);
        let mut values = ModelValues::new();
        values
            .add_variable(initial(ValueConfig::new("T"), 293.15))
            .unwrap();
        values.add_variable(initial(bounded, 293.15)).unwrap();
        values
            .add_parameter(initial(ValueConfig::new("a"), 0.1))
            .unwrap();
        values
            .add_forcing(initial(ValueConfig::new("F"), 28.0))
            .unwrap();

        let mut set = SchemeSet::new();
        for variable in ["T", "S"] {
            set.push(EulerExplicit::new(LinearDecay::new(variable, "a", "F")))
                .unwrap();
        }
        let span = Span::new(0.0, 1.0).unwrap();

        let err = set.step(&mut values, span).unwrap_err();
        assert!(matches!(
            err,
            Error::BoundsViolation { lower, upper, .. } if lower == 292.0 && upper == 400.0
        ));
        assert_relative_eq!(values.value_at("T", 1.0).unwrap(), 291.835, epsilon = 1e-9);
        assert_eq!(values.get("S").unwrap().times(), [0.0]);

        // retrying the same span replaces the point already recorded for T
        values.input_mut("F").unwrap().set_at(30.0, 0.0).unwrap();
        set.step(&mut values, span).unwrap();

        for variable in ["T", "S"] {
            let history = values.get(variable).unwrap();
            assert_eq!(history.times(), [0.0, 1.0]);
            assert_relative_eq!(history.values()[1], 293.835, epsilon = 1e-9);
        }
    }
}
