/// Control actions an observer can return from an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and return the solution so far.
    StopEarly,
}
