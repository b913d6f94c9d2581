//! # Twine Lumped
//!
//! Zero-dimensional (lumped, time-only) models for
//! [Twine](https://github.com/isentropic-dev/twine), assembled from recorded
//! values, pluggable equations, and numerical schemes.
//!
//! ## Crate layout
//!
//! - [`value`]: [`TimeSeriesValue`](value::TimeSeriesValue), the interpolated
//!   history of one scalar quantity.
//! - [`value_set`]: Id-keyed collections of values grouped by role.
//! - [`equation`]: Equation traits, including the linear/nonlinear/independent
//!   derivative decomposition used by implicit schemes.
//! - [`models`]: Concrete equations.
//! - [`scheme`]: Numerical schemes and the [`SchemeSet`](scheme::SchemeSet)
//!   that steps coupled schemes consistently.
//! - [`simulation`]: The model clock and integration loop.
//! - [`support`]: Supporting utilities (numeric constraints, time sources).
//! - [`error`]: The crate-wide error type.
//!
//! ## Coupling
//!
//! Equations refer to each other's variables by id. Within one step every
//! scheme reads the pre-step state before any result is recorded, so the
//! outcome of a step never depends on the order the schemes were added in.
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events and spans but never installs a
//! subscriber.

pub mod equation;
pub mod error;
pub mod models;
pub mod scheme;
pub mod simulation;
pub mod support;
pub mod value;
pub mod value_set;
