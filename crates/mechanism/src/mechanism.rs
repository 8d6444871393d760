use linkage_core::{AngleRole, DomainError, Guess, Joint, LoopEquation, Observer, Profile, Vector};
use linkage_solvers::sweep::{self, SampleState, Status};
use nalgebra::{Point2, Vector2};
use tracing::{debug, warn};

use crate::{Bounds, Error, Frames, JointPath, layout::Layout};

/// A planar linkage with a prescribed driving input.
///
/// Construction checks everything that can be checked before solving: the
/// profile, guesses and varying lengths must agree on their sample and unknown
/// counts, exactly one vector must be driven, and every joint must connect to
/// the origin. Unknown vectors are matched to the equation's unknowns in
/// declaration order.
#[derive(Debug)]
pub struct Mechanism<E> {
    vectors: Vec<Vector>,
    origin: Joint,
    layout: Layout,
    equation: E,
    profile: Profile,
    guess: Guess,
    config: sweep::Config,
    held: Vec<usize>,
}

impl<E: LoopEquation> Mechanism<E> {
    /// Creates a mechanism.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] for any count mismatch, a driven-vector count
    /// other than one, an invalid length, or a joint that is missing or
    /// unreachable from `origin`.
    pub fn new(
        vectors: Vec<Vector>,
        origin: impl Into<Joint>,
        equation: E,
        profile: Profile,
        guess: Guess,
    ) -> Result<Self, DomainError> {
        let origin = origin.into();

        let driven = count_role(&vectors, |role| role == AngleRole::Driven);
        if driven != 1 {
            return Err(DomainError::DrivenCount { found: driven });
        }

        let unknown = count_role(&vectors, |role| role == AngleRole::Unknown);
        if unknown != equation.unknowns() {
            return Err(DomainError::CountMismatch {
                what: "unknown vectors",
                expected: equation.unknowns(),
                found: unknown,
            });
        }
        guess.check_len(unknown)?;

        for vector in &vectors {
            vector.length().check(profile.len())?;
            if let AngleRole::Fixed(theta) = vector.role() {
                if !theta.is_finite() {
                    return Err(DomainError::NonFinite {
                        what: "fixed angle",
                        value: theta,
                    });
                }
            }
        }

        let layout = Layout::new(&vectors, &origin)?;

        let mut vectors = vectors;
        vectors.iter_mut().for_each(Vector::reset);

        Ok(Self {
            vectors,
            origin,
            layout,
            equation,
            profile,
            guess,
            config: sweep::Config::default(),
            held: Vec::new(),
        })
    }

    /// Replaces the solver configuration.
    #[must_use]
    pub fn with_config(mut self, config: sweep::Config) -> Self {
        self.config = config;
        self
    }

    /// Solves every sample and records the results on the vectors.
    ///
    /// Any results from a previous run are discarded first.
    ///
    /// # Errors
    ///
    /// Returns an error at the first sample that fails. Samples solved before
    /// it stay recorded.
    pub fn iterate(&mut self) -> Result<Status, sweep::Error> {
        self.iterate_observed(())
    }

    /// Solves every sample, reporting each one to `observer` before it is
    /// recorded.
    ///
    /// The observer can stop the run early or hold the previous state over a
    /// failed sample; see [`sweep`].
    ///
    /// # Errors
    ///
    /// Returns an error at the first sample that fails without the observer
    /// recovering. Samples solved before it stay recorded.
    pub fn iterate_observed<Obs>(&mut self, mut observer: Obs) -> Result<Status, sweep::Error>
    where
        Obs: for<'a> Observer<sweep::Event<'a>, sweep::Action>,
    {
        self.vectors.iter_mut().for_each(Vector::reset);
        self.held.clear();

        let Self {
            vectors,
            equation,
            profile,
            guess,
            config,
            ..
        } = self;

        let result = sweep::solve(
            &*equation,
            &*profile,
            &*guess,
            &*config,
            |event: &sweep::Event<'_>| {
                let action = observer.observe(event);
                if let Some(state) = event.state() {
                    record(vectors, state);
                }
                action
            },
        );

        match result {
            Ok(solution) => {
                debug!(
                    samples = solution.states.len(),
                    held = solution.held.len(),
                    status = ?solution.status,
                    "mechanism solved"
                );
                self.held = solution.held;
                Ok(solution.status)
            }
            Err(error) => {
                warn!(
                    sample = ?error.sample(),
                    resolved = self.resolved(),
                    %error,
                    "mechanism run failed"
                );
                Err(error)
            }
        }
    }

    /// Returns the loop residual norm at the recorded state of a sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample is not resolved or the equation fails.
    pub fn closure_residual(&self, sample: usize) -> Result<f64, Error> {
        self.check_resolved(sample)?;

        let mut input = 0.0;
        let mut angles = Vec::with_capacity(self.equation.unknowns());
        for vector in &self.vectors {
            match vector.role() {
                AngleRole::Driven => input = vector.angles()[sample],
                AngleRole::Unknown => angles.push(vector.angles()[sample]),
                AngleRole::Fixed(_) => {}
            }
        }

        let residuals = self
            .equation
            .residuals(sample, &angles, input)
            .map_err(Error::equation)?;
        Ok(residuals.norm())
    }

    /// Returns the largest closure residual norm over every resolved sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the equation fails.
    pub fn max_closure_residual(&self) -> Result<f64, Error> {
        (0..self.resolved()).try_fold(0.0_f64, |max, sample| {
            Ok(max.max(self.closure_residual(sample)?))
        })
    }
}

impl<E> Mechanism<E> {
    /// Returns every vector in declaration order.
    #[must_use]
    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Returns the vector at `index`.
    #[must_use]
    pub fn vector(&self, index: usize) -> Option<&Vector> {
        self.vectors.get(index)
    }

    /// Returns the first vector from `tail` to `head`.
    #[must_use]
    pub fn find(&self, tail: &Joint, head: &Joint) -> Option<&Vector> {
        self.vectors
            .iter()
            .find(|v| v.tail() == tail && v.head() == head)
    }

    /// Returns the joint fixed at the origin.
    #[must_use]
    pub fn origin(&self) -> &Joint {
        &self.origin
    }

    /// Returns every joint, origin first, in the order positions are reported.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        self.layout.joints()
    }

    #[must_use]
    pub fn equation(&self) -> &E {
        &self.equation
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn config(&self) -> &sweep::Config {
        &self.config
    }

    /// Returns the number of samples in the driving profile.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.profile.len()
    }

    /// Returns the number of samples recorded by the last run.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.vectors.first().map_or(0, Vector::resolved)
    }

    /// Returns the samples of the last run recorded by holding the previous
    /// state.
    #[must_use]
    pub fn held(&self) -> &[usize] {
        &self.held
    }

    /// Returns the time stamp of a sample, when the profile has them.
    #[must_use]
    pub fn time(&self, sample: usize) -> Option<f64> {
        self.profile.times()?.get(sample).copied()
    }

    /// Returns the position of every joint at a resolved sample.
    ///
    /// The origin is at `(0, 0)`; every other joint is reached by adding
    /// vector components outwards from it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if the sample is not
    /// resolved.
    pub fn joint_positions(&self, sample: usize) -> Result<Vec<(Joint, Point2<f64>)>, DomainError> {
        self.check_resolved(sample)?;

        let sums = self
            .layout
            .accumulate(|i| self.vectors[i].evaluate(sample, None))?;
        Ok(self
            .layout
            .joints()
            .iter()
            .cloned()
            .zip(sums.into_iter().map(Point2::from))
            .collect())
    }

    /// Returns the position, velocity, and acceleration of `joint` at every
    /// resolved sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownJoint`] if no vector uses `joint`.
    pub fn joint_path(&self, joint: &Joint) -> Result<JointPath, DomainError> {
        let index = self
            .layout
            .index_of(joint)
            .ok_or_else(|| DomainError::UnknownJoint(joint.name().to_owned()))?;

        let samples = self.resolved();
        let mut path = JointPath {
            joint: joint.clone(),
            positions: Vec::with_capacity(samples),
            velocities: Vec::with_capacity(samples),
            accelerations: Vec::with_capacity(samples),
        };

        for sample in 0..samples {
            let position = self.joint_sum(index, |v| v.evaluate(sample, None))?;
            let velocity = self.joint_sum(index, |v| v.velocity_at(sample))?;
            let acceleration = self.joint_sum(index, |v| v.acceleration_at(sample))?;

            path.positions.push(Point2::from(position));
            path.velocities.push(velocity);
            path.accelerations.push(acceleration);
        }
        Ok(path)
    }

    /// Iterates over the joint positions of every resolved sample.
    #[must_use]
    pub fn frames(&self) -> Frames<'_, E> {
        Frames::new(self)
    }

    /// Returns the box containing every joint over every resolved sample.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(
            self.frames()
                .flat_map(|frame| frame.joints.into_iter().map(|(_, point)| point)),
        )
    }

    fn joint_sum<F>(&self, index: usize, component: F) -> Result<Vector2<f64>, DomainError>
    where
        F: Fn(&Vector) -> Result<Vector2<f64>, DomainError>,
    {
        let sums = self.layout.accumulate(|i| component(&self.vectors[i]))?;
        Ok(sums[index])
    }

    fn check_resolved(&self, sample: usize) -> Result<(), DomainError> {
        if sample < self.resolved() {
            Ok(())
        } else {
            Err(DomainError::SampleOutOfRange {
                sample,
                len: self.resolved(),
            })
        }
    }
}

fn count_role(vectors: &[Vector], matches: impl Fn(AngleRole) -> bool) -> usize {
    vectors.iter().filter(|v| matches(v.role())).count()
}

/// Appends a solved state to every vector.
fn record(vectors: &mut [Vector], state: &SampleState) {
    let drive = state.drive;
    let mut unknown = 0;
    for vector in vectors {
        match vector.role() {
            AngleRole::Driven => {
                vector.record(state.sample, drive.position, drive.velocity, drive.acceleration);
            }
            AngleRole::Fixed(theta) => vector.record(state.sample, theta, 0.0, 0.0),
            AngleRole::Unknown => {
                vector.record(
                    state.sample,
                    state.angles[unknown],
                    state.velocities[unknown],
                    state.accelerations[unknown],
                );
                unknown += 1;
            }
        }
    }
}
