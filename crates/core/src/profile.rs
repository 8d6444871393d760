use crate::DomainError;

/// Position, velocity, and acceleration of one quantity at one sample.
///
/// For an angle this is `(θ, ω, α)`; for a length it is `(r, ṙ, r̈)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Motion {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Motion {
    /// Creates a motion sample.
    #[must_use]
    pub const fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// A quantity that holds `position` with zero rates.
    #[must_use]
    pub const fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0, 0.0)
    }
}

/// A prescribed motion over a sequence of samples.
///
/// Holds three equal-length sequences (position, velocity, acceleration) and
/// optional time stamps. Used for the driving input of a mechanism and for
/// links whose length changes over time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "fields::ProfileFields"))]
pub struct Profile {
    position: Vec<f64>,
    velocity: Vec<f64>,
    acceleration: Vec<f64>,
    times: Option<Vec<f64>>,
}

impl Profile {
    /// Creates a profile from its three sequences.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequences differ in length, are empty, or hold
    /// non-finite values.
    pub fn new(
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
    ) -> Result<Self, DomainError> {
        if position.len() != velocity.len() || position.len() != acceleration.len() {
            return Err(DomainError::ProfileMismatch {
                position: position.len(),
                velocity: velocity.len(),
                acceleration: acceleration.len(),
            });
        }
        if position.is_empty() {
            return Err(DomainError::EmptyProfile);
        }
        check_finite("profile position", &position)?;
        check_finite("profile velocity", &velocity)?;
        check_finite("profile acceleration", &acceleration)?;

        Ok(Self {
            position,
            velocity,
            acceleration,
            times: None,
        })
    }

    /// Builds a profile by evaluating `f` at every sample index.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is zero or `f` yields non-finite values.
    pub fn sampled<F>(samples: usize, f: F) -> Result<Self, DomainError>
    where
        F: Fn(usize) -> Motion,
    {
        let (mut position, mut velocity, mut acceleration) = (
            Vec::with_capacity(samples),
            Vec::with_capacity(samples),
            Vec::with_capacity(samples),
        );
        for motion in (0..samples).map(f) {
            position.push(motion.position);
            velocity.push(motion.velocity);
            acceleration.push(motion.acceleration);
        }
        Self::new(position, velocity, acceleration)
    }

    /// A linear sweep from `start` to `end` at constant rate.
    ///
    /// The rate is `(end - start) / duration`, the acceleration is zero, and
    /// time stamps run evenly from `0` to `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is zero or any argument is non-finite,
    /// including a zero `duration`.
    pub fn constant_velocity(
        start: f64,
        end: f64,
        samples: usize,
        duration: f64,
    ) -> Result<Self, DomainError> {
        let rate = (end - start) / duration;
        if !rate.is_finite() {
            return Err(DomainError::NonFinite {
                what: "sweep rate",
                value: rate,
            });
        }

        let times = linspace(0.0, duration, samples);
        let profile = Self::new(
            linspace(start, end, samples),
            vec![rate; samples],
            vec![0.0; samples],
        )?;
        profile.with_times(times)
    }

    /// Attaches time stamps to the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the count differs from the profile length or the
    /// stamps are not finite and strictly increasing.
    pub fn with_times(mut self, times: Vec<f64>) -> Result<Self, DomainError> {
        if times.len() != self.len() {
            return Err(DomainError::CountMismatch {
                what: "time stamps",
                expected: self.len(),
                found: times.len(),
            });
        }
        check_finite("time stamps", &times)?;
        if times.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(DomainError::NonIncreasingTimes);
        }
        self.times = Some(times);
        Ok(self)
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    /// Returns true if the profile has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Returns the motion at a sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if `sample >= len()`.
    pub fn at(&self, sample: usize) -> Result<Motion, DomainError> {
        if sample >= self.len() {
            return Err(DomainError::SampleOutOfRange {
                sample,
                len: self.len(),
            });
        }
        Ok(Motion::new(
            self.position[sample],
            self.velocity[sample],
            self.acceleration[sample],
        ))
    }

    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.position
    }

    #[must_use]
    pub fn velocities(&self) -> &[f64] {
        &self.velocity
    }

    #[must_use]
    pub fn accelerations(&self) -> &[f64] {
        &self.acceleration
    }

    /// Returns the time stamps, if any were attached.
    #[must_use]
    pub fn times(&self) -> Option<&[f64]> {
        self.times.as_deref()
    }
}

/// Initial guesses for the unknown angles and their rates.
///
/// The position guess seeds the first Newton solve. The velocity and
/// acceleration guesses seed the first linear rate solves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "fields::GuessFields"))]
pub struct Guess {
    position: Vec<f64>,
    velocity: Vec<f64>,
    acceleration: Vec<f64>,
}

impl Guess {
    /// Creates a guess set.
    ///
    /// # Errors
    ///
    /// Returns an error if the three guesses differ in length or hold
    /// non-finite values.
    pub fn new(
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
    ) -> Result<Self, DomainError> {
        for (what, values) in [
            ("velocity guess", &velocity),
            ("acceleration guess", &acceleration),
        ] {
            if values.len() != position.len() {
                return Err(DomainError::CountMismatch {
                    what,
                    expected: position.len(),
                    found: values.len(),
                });
            }
        }
        check_finite("position guess", &position)?;
        check_finite("velocity guess", &velocity)?;
        check_finite("acceleration guess", &acceleration)?;

        Ok(Self {
            position,
            velocity,
            acceleration,
        })
    }

    /// Guesses positions only, with zero rate guesses.
    ///
    /// # Errors
    ///
    /// Returns an error if any guess is non-finite.
    pub fn positions(position: Vec<f64>) -> Result<Self, DomainError> {
        let n = position.len();
        Self::new(position, vec![0.0; n], vec![0.0; n])
    }

    /// Returns the number of unknowns these guesses cover.
    #[must_use]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Checks that the guesses cover exactly `unknowns` angles.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CountMismatch`] otherwise.
    pub fn check_len(&self, unknowns: usize) -> Result<(), DomainError> {
        if self.len() == unknowns {
            Ok(())
        } else {
            Err(DomainError::CountMismatch {
                what: "guesses",
                expected: unknowns,
                found: self.len(),
            })
        }
    }

    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    #[must_use]
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    #[must_use]
    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }
}

fn check_finite(what: &'static str, values: &[f64]) -> Result<(), DomainError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(DomainError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Unvalidated field sets, deserialized first and then passed through the
/// checking constructors.
#[cfg(feature = "serde")]
mod fields {
    use serde::Deserialize;

    use super::{Guess, Profile};
    use crate::DomainError;

    #[derive(Deserialize)]
    pub(super) struct ProfileFields {
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
        #[serde(default)]
        times: Option<Vec<f64>>,
    }

    impl TryFrom<ProfileFields> for Profile {
        type Error = DomainError;

        fn try_from(fields: ProfileFields) -> Result<Self, Self::Error> {
            let profile = Profile::new(fields.position, fields.velocity, fields.acceleration)?;
            match fields.times {
                Some(times) => profile.with_times(times),
                None => Ok(profile),
            }
        }
    }

    #[derive(Deserialize)]
    pub(super) struct GuessFields {
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
    }

    impl TryFrom<GuessFields> for Guess {
        type Error = DomainError;

        fn try_from(fields: GuessFields) -> Result<Self, Self::Error> {
            Guess::new(fields.position, fields.velocity, fields.acceleration)
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
