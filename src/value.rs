//! Time-indexed values.
//!
//! A [`TimeSeriesValue`] is the recorded history of one named scalar quantity.
//! Every state variable, parameter, and forcing input is one. The history only
//! grows forward in time: a write at the latest recorded time overwrites that
//! point, a later write appends, and an earlier write is rejected with
//! [`Error::OutOfOrderWrite`].
//!
//! ```
//! use twine_lumped::value::{Interpolation, TimeSeriesValue, ValueConfig};
//!
//! let config = ValueConfig::new("T").with_interpolation(Interpolation::Linear);
//! let mut temperature = TimeSeriesValue::new(config);
//!
//! temperature.set_at(290.0, 0.0).unwrap();
//! temperature.set_at(300.0, 10.0).unwrap();
//!
//! assert_eq!(temperature.at(5.0).unwrap(), 295.0);
//! assert_eq!(temperature.current().unwrap().value, 300.0);
//! ```

mod bounds;
mod config;
mod interpolation;

pub use bounds::{Bounds, BoundsPolicy};
pub use config::ValueConfig;
pub use interpolation::Interpolation;

use std::sync::Arc;

use tracing::warn;

use crate::{
    error::{Error, Result},
    support::{
        clock::{FixedClock, TimeSource},
        constraint::Finite,
    },
};

/// A single recorded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub time: f64,
    pub value: f64,
}

/// The recorded history of one named scalar quantity.
#[derive(Debug, Clone)]
pub struct TimeSeriesValue {
    config: ValueConfig,
    times: Vec<f64>,
    values: Vec<f64>,
    clock: Arc<dyn TimeSource>,
}

impl TimeSeriesValue {
    /// Creates an empty value recording at a [`FixedClock`] reading zero.
    #[must_use]
    pub fn new(config: ValueConfig) -> Self {
        Self {
            config,
            times: Vec::new(),
            values: Vec::new(),
            clock: Arc::new(FixedClock::default()),
        }
    }

    /// Creates a value holding a single initial point.
    ///
    /// # Errors
    ///
    /// Fails like [`set_at`](Self::set_at).
    pub fn with_initial(config: ValueConfig, time: f64, value: f64) -> Result<Self> {
        let mut series = Self::new(config);
        series.set_at(value, time)?;
        Ok(series)
    }

    /// Creates a value from a recorded history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHistory`] if the lengths differ or the times are
    /// not strictly increasing, and otherwise fails like [`set_at`](Self::set_at).
    pub fn with_history(config: ValueConfig, times: &[f64], values: &[f64]) -> Result<Self> {
        if times.len() != values.len() {
            return Err(Error::InvalidHistory {
                id: config.id,
                reason: "times and values differ in length",
            });
        }
        if times.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidHistory {
                id: config.id,
                reason: "times are not strictly increasing",
            });
        }

        let mut series = Self::new(config);
        series.times.reserve(times.len());
        series.values.reserve(values.len());
        for (&time, &value) in times.iter().zip(values) {
            series.set_at(value, time)?;
        }
        Ok(series)
    }

    /// Replaces the source consulted by [`set`](Self::set).
    #[must_use]
    pub fn with_time_source(mut self, source: impl TimeSource + 'static) -> Self {
        self.clock = Arc::new(source);
        self
    }

    /// Records `value` at the time source's current time.
    ///
    /// # Errors
    ///
    /// Fails like [`set_at`](Self::set_at).
    pub fn set(&mut self, value: f64) -> Result<f64> {
        let now = self.clock.now();
        self.set_at(value, now)
    }

    /// Records `value` at `time` and returns the value actually stored.
    ///
    /// The value is clamped into the bounds unless the bounds policy is
    /// [`BoundsPolicy::Reject`]. Writing at the latest recorded time replaces
    /// that point; writing later appends a new one.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTime`] if `time` is not finite.
    /// - [`Error::OutOfOrderWrite`] if `time` precedes the latest recorded time.
    /// - [`Error::BoundsViolation`] if `value` is not finite, or lies outside
    ///   the bounds while clamping is disabled.
    pub fn set_at(&mut self, value: f64, time: f64) -> Result<f64> {
        check_time(time)?;

        match self.times.last() {
            Some(&last) if time < last => {
                return Err(Error::OutOfOrderWrite {
                    id: self.config.id.clone(),
                    time,
                    last,
                });
            }
            _ => {}
        }

        let value = self.admit(value)?;

        match self.times.last() {
            Some(&last) if time == last => {
                let index = self.values.len() - 1;
                self.values[index] = value;
            }
            _ => {
                self.times.push(time);
                self.values.push(value);
            }
        }

        Ok(value)
    }

    /// Evaluates the history at `time` using the configured interpolation.
    ///
    /// Before the first and after the last recorded point the nearest boundary
    /// value is held. Never mutates the history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataAvailable`] if nothing has been recorded yet, or
    /// [`Error::InvalidTime`] if `time` is not finite.
    pub fn at(&self, time: f64) -> Result<f64> {
        check_time(time)?;
        if self.times.is_empty() {
            return Err(self.no_data());
        }
        Ok(self
            .config
            .interpolation
            .evaluate(&self.times, &self.values, time))
    }

    /// Returns the most recently recorded point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataAvailable`] if nothing has been recorded yet.
    pub fn current(&self) -> Result<Point> {
        match (self.times.last(), self.values.last()) {
            (Some(&time), Some(&value)) => Ok(Point { time, value }),
            _ => Err(self.no_data()),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.config.unit
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.config.interpolation
    }

    #[must_use]
    pub fn config(&self) -> &ValueConfig {
        &self.config
    }

    /// Recorded times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Recorded values, index-aligned with [`times`](Self::times).
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over recorded points in time order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&time, &value)| Point { time, value })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn first_time(&self) -> Option<f64> {
        self.times.first().copied()
    }

    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    fn admit(&self, value: f64) -> Result<f64> {
        let bounds = self.config.bounds;
        let violation = || Error::BoundsViolation {
            id: self.config.id.clone(),
            value,
            lower: bounds.lower(),
            upper: bounds.upper(),
        };

        if !value.is_finite() {
            return Err(violation());
        }
        if bounds.contains(value) {
            return Ok(value);
        }

        match self.config.bounds_policy {
            BoundsPolicy::Clamp => {
                let clamped = bounds.clamp(value);
                warn!(id = %self.config.id, value, clamped, "value clamped into bounds");
                Ok(clamped)
            }
            BoundsPolicy::Reject => Err(violation()),
        }
    }

    fn no_data(&self) -> Error {
        Error::NoDataAvailable {
            id: self.config.id.clone(),
        }
    }
}

fn check_time(time: f64) -> Result<()> {
    Finite::new(time)
        .map(|_| ())
        .map_err(|source| Error::InvalidTime { time, source })
}
