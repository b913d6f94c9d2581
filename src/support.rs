//! Supporting utilities used throughout the engine.
//!
//! - [`constraint`]: Numeric invariants checked once at construction.
//! - [`clock`]: Time sources used as the default recording time.

pub mod clock;
pub mod constraint;
