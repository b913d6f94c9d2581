//! Sources of "now" for writes that do not name a time.
//!
//! A [`TimeSeriesValue`](crate::value::TimeSeriesValue) holds exactly one
//! [`TimeSource`] and consults it in [`set`](crate::value::TimeSeriesValue::set).
//! Sources are values passed in at construction, never process-wide state.
//!
//! - [`FixedClock`]: always reports the same time (the default, at zero)
//! - [`SharedClock`]: a cloneable handle that a [`Simulation`](crate::simulation::Simulation)
//!   advances as it integrates
//! - [`WallClock`]: seconds since the Unix epoch

use std::{
    fmt::Debug,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use jiff::Timestamp;

/// Something that can report the current time in seconds.
pub trait TimeSource: Debug + Send + Sync {
    /// Returns the current time in seconds.
    fn now(&self) -> f64;
}

/// A clock that never moves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedClock(pub f64);

impl TimeSource for FixedClock {
    fn now(&self) -> f64 {
        self.0
    }
}

/// A clock shared between its owner and any number of readers.
///
/// Clones observe the same time. The [`Simulation`](crate::simulation::Simulation)
/// is the only writer of its own clock.
#[derive(Debug, Clone, Default)]
pub struct SharedClock {
    bits: Arc<AtomicU64>,
}

impl SharedClock {
    /// Creates a shared clock reading `time`.
    #[must_use]
    pub fn new(time: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(time.to_bits())),
        }
    }

    /// Moves the clock to `time`.
    pub fn set(&self, time: f64) {
        self.bits.store(time.to_bits(), Ordering::Release);
    }
}

impl TimeSource for SharedClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

/// Wall-clock time as seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallClock;

impl TimeSource for WallClock {
    #[allow(clippy::cast_precision_loss)]
    fn now(&self) -> f64 {
        Timestamp::now().as_millisecond() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_defaults_to_zero() {
        assert_eq!(FixedClock::default().now(), 0.0);
        assert_eq!(FixedClock(12.5).now(), 12.5);
    }

    #[test]
    fn shared_clock_clones_see_updates() {
        let clock = SharedClock::new(1.0);
        let reader = clock.clone();

        clock.set(42.0);

        assert_eq!(reader.now(), 42.0);
    }

    #[test]
    fn default_shared_clock_starts_at_zero() {
        assert_eq!(SharedClock::default().now(), 0.0);
    }

    #[test]
    fn wall_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(WallClock.now() > 1_577_836_800.0);
    }
}
