//! Concrete equations.
//!
//! Each model names its variable and inputs by id and implements one of the
//! [`equation`](crate::equation) capability traits. The ids are supplied at
//! construction so the same equation can be wired into different models.
//!
//! - [`LinearDecay`]: `dT/dt = -a T + F`
//! - [`HeatExchange`]: `dT/dt = -k (T - T_other)`
//! - [`Logistic`]: `dN/dt = r N (1 - N / K)`
//! - [`Difference`]: diagnostic `D = A - B`

mod algebraic;
mod decay;
mod population;
mod thermal;

pub use algebraic::Difference;
pub use decay::LinearDecay;
pub use population::Logistic;
pub use thermal::HeatExchange;
