//! Engine errors.
//!
//! Every failure is local and synchronous: it surfaces to the caller of the
//! operation that triggered it and is never retried or replaced by a default.

use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Engine result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by time series values, value sets, equations, and schemes.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A write named a time earlier than the latest recorded time.
    #[error("out-of-order write to `{id}`: time {time} precedes last recorded time {last}")]
    OutOfOrderWrite {
        /// Identifier of the value written to.
        id: String,
        /// Requested time.
        time: f64,
        /// Latest recorded time.
        last: f64,
    },

    /// A read was attempted before any point was recorded.
    #[error("no data recorded for `{id}`")]
    NoDataAvailable { id: String },

    /// The implicit denominator `1 - time_step * linear_factor` vanished.
    #[error(
        "singular implicit step for `{variable}`: time_step={time_step}, linear_factor={linear_factor}"
    )]
    SingularStep {
        variable: String,
        time_step: f64,
        linear_factor: f64,
    },

    /// No value with this identifier exists.
    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),

    /// A written value fell outside its bounds and clamping is disabled.
    #[error("value {value} for `{id}` outside bounds [{lower}, {upper}]")]
    BoundsViolation {
        id: String,
        value: f64,
        lower: f64,
        upper: f64,
    },

    /// A value with this identifier is already present.
    #[error("identifier `{0}` is already in use")]
    DuplicateIdentifier(String),

    /// A time was `NaN` or infinite.
    #[error("invalid time {time}: {source}")]
    InvalidTime {
        time: f64,
        #[source]
        source: ConstraintError,
    },

    /// Lower bound above upper bound, or a `NaN` bound.
    #[error("invalid bounds [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },

    /// A time step was zero, negative, or `NaN`.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(#[source] ConstraintError),

    /// Recorded history was not strictly increasing or had mismatched lengths.
    #[error("invalid history for `{id}`: {reason}")]
    InvalidHistory { id: String, reason: &'static str },

    /// A second scheme was bound to an already integrated variable.
    #[error("variable `{variable}` is already integrated by another scheme")]
    VariableAlreadyIntegrated { variable: String },

    /// A scheme produced `NaN` or an infinite value.
    #[error("non-finite result {value} for `{variable}`")]
    NonFiniteResult { variable: String, value: f64 },

    /// The requested final time lies before the simulation clock.
    #[error("final time {final_time} is before the current time {now}")]
    FinalTimeInPast { final_time: f64, now: f64 },
}
