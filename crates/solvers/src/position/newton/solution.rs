/// Indicates how the solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual norm met the tolerance.
    Converged,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Newton position solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// The unknown angles at the final iterate.
    pub angles: Vec<f64>,

    /// Residual norm at `angles`.
    pub residual_norm: f64,

    /// Number of Newton steps taken.
    pub iters: usize,
}
