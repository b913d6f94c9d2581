use uom::si::{f64::Time, time::second};

use crate::{
    error::{Error, Result},
    support::constraint::{Finite, StrictlyPositive},
};

/// Integration loop configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    /// Fixed step size, before capping by the schemes' limits.
    pub time_step: Time,

    /// Model time the clock starts at.
    pub start_time: Time,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            time_step: Time::new::<second>(1.0),
            start_time: Time::new::<second>(0.0),
        }
    }
}

impl IntegrationConfig {
    /// Validated step size in seconds.
    pub(super) fn time_step_seconds(&self) -> Result<f64> {
        let time_step = StrictlyPositive::new(self.time_step.get::<second>())
            .map_err(Error::InvalidTimeStep)?;
        Ok(time_step.into_inner())
    }

    /// Validated start time in seconds.
    pub(super) fn start_time_seconds(&self) -> Result<f64> {
        let time = self.start_time.get::<second>();
        let time = Finite::new(time).map_err(|source| Error::InvalidTime { time, source })?;
        Ok(time.into_inner())
    }
}
