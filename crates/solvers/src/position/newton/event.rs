/// Event emitted by the Newton solver once per iteration.
///
/// Iteration 0 evaluates the initial guess. Each later iteration evaluates the
/// iterate after one more Newton step.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// The sample being solved.
    pub sample: usize,

    /// Iteration counter, starting at 0 for the guess.
    pub iter: usize,

    /// The current unknown angles.
    pub angles: &'a [f64],

    /// The loop residual at `angles`.
    pub residuals: &'a [f64],

    /// Euclidean norm of `residuals`.
    pub residual_norm: f64,
}
