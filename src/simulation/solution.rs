/// Indicates how an integration terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the requested final time.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an integration.
///
/// The trajectories themselves stay in the model's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// How the integration terminated.
    pub status: Status,

    /// Number of steps taken.
    pub steps: usize,

    /// Model time at termination, in seconds.
    pub time: f64,
}
