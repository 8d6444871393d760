/// Actions an observer can take during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the sweep and return the samples solved so far.
    StopEarly,

    /// Recover from a failed sample by repeating the previous solved state.
    ///
    /// The held sample keeps its own driving motion, is listed in
    /// [`Solution::held`](super::Solution::held), and seeds the next sample.
    /// Only honored in response to [`Event::Failed`](super::Event::Failed)
    /// when a previous state exists.
    HoldPrevious,
}
