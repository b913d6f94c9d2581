use indexmap::IndexMap;

/// Event emitted by the integration loop.
///
/// Step 0 is the state before integrating.
/// Steps 1..N are emitted after each committed step.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The step number (0 for the starting state).
    pub step: usize,

    /// Model time after the step, in seconds.
    pub time: f64,

    /// Size of the step just taken, in seconds (0 for the starting state).
    pub time_step: f64,

    /// Current value of every state variable, in insertion order.
    pub state: IndexMap<String, f64>,
}
