use linkage_core::Observer;
use linkage_solvers::{position::newton, sweep};
use tracing::{debug, trace, warn};

/// Logs solver events through `tracing` and counts them.
///
/// Newton iterations are logged at `TRACE`, solved samples at `DEBUG`, and
/// failed or held samples at `WARN`. The observer never changes how a solver
/// proceeds.
///
/// Newton iterations are only seen when the observer is passed to
/// [`newton::solve`] directly. A sweep runs its position solves unobserved and
/// reports one [`sweep::Event`] per sample, so [`iterations`] stays at zero
/// for sweeps and mechanism runs; [`sweep::Event::Solved`] still carries the
/// iteration count of each sample.
///
/// Pass `&mut TraceObserver` to keep the counts after the solve.
///
/// [`iterations`]: TraceObserver::iterations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceObserver {
    iterations: usize,
    solved: usize,
    held: usize,
    failed: usize,
}

impl TraceObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Newton iterations seen through [`newton::solve`].
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Samples reported as solved.
    #[must_use]
    pub fn solved(&self) -> usize {
        self.solved
    }

    /// Samples reported as held.
    #[must_use]
    pub fn held(&self) -> usize {
        self.held
    }

    /// Samples reported as failed, including those later held.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }
}

impl Observer<newton::Event<'_>, newton::Action> for TraceObserver {
    fn observe(&mut self, event: &newton::Event<'_>) -> Option<newton::Action> {
        self.iterations += 1;
        trace!(
            sample = event.sample,
            iter = event.iter,
            residual_norm = event.residual_norm,
            "newton iteration"
        );
        None
    }
}

impl Observer<sweep::Event<'_>, sweep::Action> for TraceObserver {
    fn observe(&mut self, event: &sweep::Event<'_>) -> Option<sweep::Action> {
        match event {
            sweep::Event::Solved { state, iters } => {
                self.solved += 1;
                debug!(
                    sample = state.sample,
                    input = state.drive.position,
                    iters,
                    angles = ?state.angles,
                    "sample solved"
                );
            }
            sweep::Event::Held { state, failure } => {
                self.held += 1;
                warn!(sample = state.sample, %failure, "holding previous state");
            }
            sweep::Event::Failed {
                sample,
                failure,
                last_valid,
            } => {
                self.failed += 1;
                warn!(
                    sample,
                    kind = ?failure.kind(),
                    last_valid = ?last_valid.map(|state| state.sample),
                    %failure,
                    "sample failed"
                );
            }
        }
        None
    }
}

/// Allows `&mut TraceObserver` to be passed to solvers that take an observer
/// by value, so the counts can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut TraceObserver
where
    TraceObserver: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
