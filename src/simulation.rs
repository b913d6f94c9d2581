//! The model clock and integration loop.
//!
//! A [`Simulation`] owns a model's values, its [`SchemeSet`], and any
//! diagnostic equations, and advances them together on a shared clock.
//!
//! # Example
//!
//! ```
//! use twine_lumped::{
//!     models::LinearDecay,
//!     scheme::EulerExplicit,
//!     simulation::{IntegrationConfig, Simulation, Status},
//!     value::{TimeSeriesValue, ValueConfig},
//!     value_set::ModelValues,
//! };
//!
//! let mut values = ModelValues::new();
//! values.add_variable(TimeSeriesValue::with_initial(ValueConfig::new("T"), 0.0, 293.15)?)?;
//! values.add_parameter(TimeSeriesValue::with_initial(ValueConfig::new("a"), 0.0, 0.1)?)?;
//! values.add_forcing(TimeSeriesValue::with_initial(ValueConfig::new("F"), 0.0, 28.0)?)?;
//!
//! let mut simulation = Simulation::new(values, IntegrationConfig::default())?;
//! simulation.add_scheme(EulerExplicit::new(LinearDecay::new("T", "a", "F")))?;
//!
//! let solution = simulation.integrate(10.0)?;
//! assert_eq!(solution.status, Status::Complete);
//! assert_eq!(solution.steps, 10);
//! assert_eq!(simulation.time(), 10.0);
//! # Ok::<(), twine_lumped::error::Error>(())
//! ```

mod action;
mod config;
mod event;
mod solution;

pub use action::Action;
pub use config::IntegrationConfig;
pub use event::Event;
pub use solution::{Solution, Status};

use std::fmt;

use tracing::{debug, instrument};
use twine_core::Observer;

use crate::{
    equation::DiagnosticEquation,
    error::{Error, Result},
    scheme::{NumericalScheme, SchemeSet, Span},
    support::{
        clock::{SharedClock, TimeSource},
        constraint::Finite,
    },
    value_set::ModelValues,
};

/// Relative slack, in step sizes, within which the remaining time is taken as
/// one final step instead of a full step plus a sliver.
const REMAINDER_TOLERANCE: f64 = 1e-9;

/// A zero-dimensional model advanced through time.
pub struct Simulation {
    values: ModelValues,
    schemes: SchemeSet,
    diagnostics: Vec<Box<dyn DiagnosticEquation>>,
    clock: SharedClock,
    config: IntegrationConfig,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("time", &self.time())
            .field("values", &self.values)
            .field("schemes", &self.schemes)
            .field(
                "diagnostics",
                &self
                    .diagnostics
                    .iter()
                    .map(|d| d.variable())
                    .collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl Simulation {
    /// Creates a simulation with the clock at the configured start time.
    ///
    /// # Errors
    ///
    /// Fails if the configured step is not strictly positive or the start time
    /// is not finite.
    pub fn new(values: ModelValues, config: IntegrationConfig) -> Result<Self> {
        config.time_step_seconds()?;
        let start = config.start_time_seconds()?;
        Ok(Self {
            values,
            schemes: SchemeSet::new(),
            diagnostics: Vec::new(),
            clock: SharedClock::new(start),
            config,
        })
    }

    /// Binds a scheme to its state variable.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownIdentifier`] if the variable is not a state variable.
    /// - [`Error::VariableAlreadyIntegrated`] if a scheme or diagnostic already
    ///   owns the variable.
    pub fn add_scheme(&mut self, scheme: impl NumericalScheme + 'static) -> Result<()> {
        self.check_unowned(scheme.variable())?;
        self.schemes.push(scheme)
    }

    /// Registers a diagnostic, evaluated after every step.
    ///
    /// Diagnostics are evaluated in the order added, so a diagnostic may read
    /// one added before it.
    ///
    /// # Errors
    ///
    /// Fails like [`add_scheme`](Self::add_scheme).
    pub fn add_diagnostic(&mut self, diagnostic: impl DiagnosticEquation + 'static) -> Result<()> {
        self.check_unowned(diagnostic.variable())?;
        self.diagnostics.push(Box::new(diagnostic));
        Ok(())
    }

    /// Current model time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.clock.now()
    }

    /// A handle to the model clock.
    ///
    /// Values given this handle as their time source record at model time.
    #[must_use]
    pub fn clock(&self) -> SharedClock {
        self.clock.clone()
    }

    #[must_use]
    pub fn values(&self) -> &ModelValues {
        &self.values
    }

    /// Mutable access to the values, for updating inputs between integrations.
    pub fn values_mut(&mut self) -> &mut ModelValues {
        &mut self.values
    }

    #[must_use]
    pub fn schemes(&self) -> &SchemeSet {
        &self.schemes
    }

    #[must_use]
    pub fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// The step size used by the loop: the configured step, capped by the
    /// smallest limit of the schemes.
    ///
    /// # Errors
    ///
    /// Fails if the configured step is not strictly positive.
    pub fn time_step(&self) -> Result<f64> {
        let configured = self.config.time_step_seconds()?;
        Ok(self
            .schemes
            .max_time_step()
            .map_or(configured, |limit| configured.min(limit)))
    }

    /// Evaluates every diagnostic at the current time and records the results.
    ///
    /// # Errors
    ///
    /// Fails if a diagnostic cannot be evaluated or its result cannot be
    /// recorded.
    pub fn update_diagnostics(&mut self) -> Result<()> {
        let time = self.time();
        for diagnostic in &self.diagnostics {
            let value = diagnostic.evaluate(&self.values, time)?;
            self.values
                .variable_mut(diagnostic.variable())?
                .set_at(value, time)?;
        }
        Ok(())
    }

    /// Takes one step of `time_step` from the current time.
    ///
    /// # Errors
    ///
    /// Fails for a non-positive step, or like [`SchemeSet::step`] and
    /// [`update_diagnostics`](Self::update_diagnostics).
    pub fn step(&mut self, time_step: f64) -> Result<Span> {
        let span = Span::from_step(self.time(), time_step)?;
        self.advance(span)?;
        Ok(span)
    }

    /// Integrates until the clock reads exactly `final_time`.
    ///
    /// # Errors
    ///
    /// Fails like [`integrate_observed`](Self::integrate_observed).
    pub fn integrate(&mut self, final_time: f64) -> Result<Solution> {
        self.integrate_observed(final_time, ())
    }

    /// Integrates until the clock reads exactly `final_time`, reporting to an
    /// observer.
    ///
    /// Steps have the size given by [`time_step`](Self::time_step); the last
    /// one is shortened to land on `final_time`. The observer receives an
    /// [`Event`] for the starting state and after every step, and may return
    /// [`Action::StopEarly`] to end the integration there.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTime`] if `final_time` is not finite.
    /// - [`Error::FinalTimeInPast`] if `final_time` precedes the clock.
    /// - Any error raised while stepping; the integration stops at the failed
    ///   step with the clock at the last completed one.
    #[instrument(skip(self, observer))]
    pub fn integrate_observed<O>(&mut self, final_time: f64, mut observer: O) -> Result<Solution>
    where
        O: Observer<Event, Action>,
    {
        Finite::new(final_time).map_err(|source| Error::InvalidTime {
            time: final_time,
            source,
        })?;
        let now = self.time();
        if final_time < now {
            return Err(Error::FinalTimeInPast { final_time, now });
        }

        let time_step = self.time_step()?;
        self.update_diagnostics()?;

        let mut steps = 0;
        let mut time = now;

        if let Some(Action::StopEarly) = observer.observe(&self.event(steps, 0.0)) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                steps,
                time,
            });
        }

        while time < final_time {
            let remaining = final_time - time;
            let end = if remaining <= time_step * (1.0 + REMAINDER_TOLERANCE) {
                final_time
            } else {
                time + time_step
            };
            let span = Span::new(time, end)?;

            self.advance(span)?;
            steps += 1;
            time = end;
            debug!(step = steps, time, time_step = span.size(), "step complete");

            if let Some(Action::StopEarly) = observer.observe(&self.event(steps, span.size())) {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    steps,
                    time,
                });
            }
        }

        Ok(Solution {
            status: Status::Complete,
            steps,
            time,
        })
    }

    fn advance(&mut self, span: Span) -> Result<()> {
        self.schemes.step(&mut self.values, span)?;
        self.clock.set(span.end());
        self.update_diagnostics()
    }

    fn event(&self, step: usize, time_step: f64) -> Event {
        Event {
            step,
            time: self.time(),
            time_step,
            state: self.values.state(),
        }
    }

    fn check_unowned(&self, variable: &str) -> Result<()> {
        self.values.variables().get(variable)?;
        let owned = self.schemes.contains(variable)
            || self.diagnostics.iter().any(|d| d.variable() == variable);
        if owned {
            return Err(Error::VariableAlreadyIntegrated {
                variable: variable.to_owned(),
            });
        }
        Ok(())
    }
}
