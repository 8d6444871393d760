use nalgebra::Vector2;

use crate::{DomainError, Joint, Motion, Profile};

/// The length of a link, fixed or prescribed per sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    /// A rigid link.
    Fixed(f64),

    /// A link whose length follows a profile, such as a sliding member.
    Varying(Profile),
}

impl Length {
    /// Returns the length and its rates at a sample.
    ///
    /// A fixed length is valid at every sample and has zero rates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if a varying length has no
    /// entry for `sample`.
    pub fn at(&self, sample: usize) -> Result<Motion, DomainError> {
        match self {
            Self::Fixed(value) => Ok(Motion::at_rest(*value)),
            Self::Varying(profile) => profile.at(sample),
        }
    }

    /// Returns the number of samples a varying length covers.
    #[must_use]
    pub fn samples(&self) -> Option<usize> {
        match self {
            Self::Fixed(_) => None,
            Self::Varying(profile) => Some(profile.len()),
        }
    }

    /// Checks that the length is finite and non-negative over `samples`.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite value, or a varying
    /// length with the wrong number of samples.
    pub fn check(&self, samples: usize) -> Result<(), DomainError> {
        match self {
            Self::Fixed(value) => check_value(0, *value),
            Self::Varying(profile) => {
                if profile.len() != samples {
                    return Err(DomainError::CountMismatch {
                        what: "varying length samples",
                        expected: samples,
                        found: profile.len(),
                    });
                }
                profile
                    .positions()
                    .iter()
                    .enumerate()
                    .try_for_each(|(sample, &value)| check_value(sample, value))
            }
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

impl From<Profile> for Length {
    fn from(profile: Profile) -> Self {
        Self::Varying(profile)
    }
}

fn check_value(sample: usize, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFinite {
            what: "length",
            value,
        });
    }
    if value < 0.0 {
        return Err(DomainError::NegativeLength { sample, value });
    }
    Ok(())
}

/// How a vector's angle is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AngleRole {
    /// Supplied per sample by the driving profile.
    Driven,

    /// Solved for at every sample.
    Unknown,

    /// Constant, such as the orientation of a ground link.
    Fixed(f64),
}

/// A link or ground reference as a 2D displacement from `tail` to `head`.
///
/// Besides its definition, a vector owns the series of angles, angular
/// velocities, and angular accelerations resolved for it, one entry per
/// solved sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    tail: Joint,
    head: Joint,
    length: Length,
    role: AngleRole,
    angles: Vec<f64>,
    velocities: Vec<f64>,
    accelerations: Vec<f64>,
}

impl Vector {
    /// Creates a vector between two joints.
    pub fn new(
        tail: impl Into<Joint>,
        head: impl Into<Joint>,
        length: impl Into<Length>,
        role: AngleRole,
    ) -> Self {
        Self {
            tail: tail.into(),
            head: head.into(),
            length: length.into(),
            role,
            angles: Vec::new(),
            velocities: Vec::new(),
            accelerations: Vec::new(),
        }
    }

    /// Creates the vector of the driving link.
    pub fn driven(
        tail: impl Into<Joint>,
        head: impl Into<Joint>,
        length: impl Into<Length>,
    ) -> Self {
        Self::new(tail, head, length, AngleRole::Driven)
    }

    /// Creates a vector whose angle is solved for.
    pub fn unknown(
        tail: impl Into<Joint>,
        head: impl Into<Joint>,
        length: impl Into<Length>,
    ) -> Self {
        Self::new(tail, head, length, AngleRole::Unknown)
    }

    /// Creates a vector with a constant angle.
    pub fn fixed(
        tail: impl Into<Joint>,
        head: impl Into<Joint>,
        length: impl Into<Length>,
        angle: f64,
    ) -> Self {
        Self::new(tail, head, length, AngleRole::Fixed(angle))
    }

    #[must_use]
    pub fn tail(&self) -> &Joint {
        &self.tail
    }

    #[must_use]
    pub fn head(&self) -> &Joint {
        &self.head
    }

    #[must_use]
    pub fn length(&self) -> &Length {
        &self.length
    }

    #[must_use]
    pub fn role(&self) -> AngleRole {
        self.role
    }

    /// Resolved angles, one per solved sample.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Resolved angular velocities, one per solved sample.
    #[must_use]
    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Resolved angular accelerations, one per solved sample.
    #[must_use]
    pub fn accelerations(&self) -> &[f64] {
        &self.accelerations
    }

    /// Returns the number of resolved samples.
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.angles.len()
    }

    /// Returns the resolved angle and its rates at a sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if the sample has not been
    /// resolved.
    pub fn angle_at(&self, sample: usize) -> Result<Motion, DomainError> {
        if sample >= self.resolved() {
            return Err(DomainError::SampleOutOfRange {
                sample,
                len: self.resolved(),
            });
        }
        Ok(Motion::new(
            self.angles[sample],
            self.velocities[sample],
            self.accelerations[sample],
        ))
    }

    /// Returns the Cartesian component of the vector at a sample.
    ///
    /// The angle is `angle` when given, otherwise the fixed angle, otherwise
    /// the resolved angle at `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if the angle must come from an
    /// unresolved sample, or the length has no entry for `sample`.
    pub fn evaluate(&self, sample: usize, angle: Option<f64>) -> Result<Vector2<f64>, DomainError> {
        let theta = match (angle, self.role) {
            (Some(theta), _) | (None, AngleRole::Fixed(theta)) => theta,
            (None, _) => self.angle_at(sample)?.position,
        };
        let r = self.length.at(sample)?.position;
        Ok(r * Vector2::new(theta.cos(), theta.sin()))
    }

    /// Returns the time derivative of the Cartesian component at a sample.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if the sample is unresolved.
    pub fn velocity_at(&self, sample: usize) -> Result<Vector2<f64>, DomainError> {
        let angle = self.angle_at(sample)?;
        let length = self.length.at(sample)?;
        let (radial, normal) = unit_pair(angle.position);

        Ok(length.velocity * radial + length.position * angle.velocity * normal)
    }

    /// Returns the second time derivative of the Cartesian component.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SampleOutOfRange`] if the sample is unresolved.
    pub fn acceleration_at(&self, sample: usize) -> Result<Vector2<f64>, DomainError> {
        let angle = self.angle_at(sample)?;
        let length = self.length.at(sample)?;
        let (radial, normal) = unit_pair(angle.position);

        let along = length.acceleration - length.position * angle.velocity.powi(2);
        let across = length.position * angle.acceleration
            + 2.0 * length.velocity * angle.velocity;
        Ok(along * radial + across * normal)
    }

    /// Appends the solved state for `sample`.
    ///
    /// # Panics
    ///
    /// Panics unless `sample` equals the number of samples already resolved.
    /// Samples are recorded exactly once and in order.
    pub fn record(&mut self, sample: usize, angle: f64, velocity: f64, acceleration: f64) {
        assert_eq!(
            sample,
            self.resolved(),
            "vector {}->{} recorded out of order",
            self.tail,
            self.head
        );
        self.angles.push(angle);
        self.velocities.push(velocity);
        self.accelerations.push(acceleration);
    }

    /// Discards all resolved samples.
    pub fn reset(&mut self) {
        self.angles.clear();
        self.velocities.clear();
        self.accelerations.clear();
    }
}

/// Unit vectors along and perpendicular (counter-clockwise) to `theta`.
#[must_use]
pub fn unit_pair(theta: f64) -> (Vector2<f64>, Vector2<f64>) {
    let (sin, cos) = theta.sin_cos();
    (Vector2::new(cos, sin), Vector2::new(-sin, cos))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    #[test]
    fn evaluate_uses_override_fixed_or_resolved_angle() {
        let mut crank = Vector::driven("O", "A", 2.0);
        let ground = Vector::fixed("O", "C", 3.0, PI);

        let tip = crank.evaluate(0, Some(FRAC_PI_2)).unwrap();
        assert_relative_eq!(tip.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(tip.y, 2.0);

        let left = ground.evaluate(7, None).unwrap();
        assert_relative_eq!(left.x, -3.0);
        assert_relative_eq!(left.y, 0.0, epsilon = 1e-12);

        assert_eq!(
            crank.evaluate(0, None),
            Err(DomainError::SampleOutOfRange { sample: 0, len: 0 })
        );

        crank.record(0, PI, 1.0, 0.0);
        let resolved = crank.evaluate(0, None).unwrap();
        assert_relative_eq!(resolved.x, -2.0);
    }

    #[test]
    fn record_appends_in_order() {
        let mut link = Vector::unknown("A", "B", 1.0);
        link.record(0, 0.1, 1.0, 2.0);
        link.record(1, 0.2, 1.5, 2.5);

        assert_eq!(link.angles(), &[0.1, 0.2]);
        assert_eq!(link.velocities(), &[1.0, 1.5]);
        assert_eq!(link.accelerations(), &[2.0, 2.5]);

        link.reset();
        assert_eq!(link.resolved(), 0);
    }

    #[test]
    #[should_panic(expected = "recorded out of order")]
    fn record_rejects_skipped_sample() {
        let mut link = Vector::unknown("A", "B", 1.0);
        link.record(1, 0.1, 0.0, 0.0);
    }

    #[test]
    fn rotating_link_derivatives() {
        // Rigid link spinning at ω = 2 with α = 3, sampled at θ = 0.
        let mut link = Vector::unknown("A", "B", 1.5);
        link.record(0, 0.0, 2.0, 3.0);

        let v = link.velocity_at(0).unwrap();
        assert_relative_eq!(v.x, 0.0);
        assert_relative_eq!(v.y, 3.0);

        let a = link.acceleration_at(0).unwrap();
        assert_relative_eq!(a.x, -6.0);
        assert_relative_eq!(a.y, 4.5);
    }

    #[test]
    fn sliding_link_derivatives() {
        let length = Profile::new(vec![2.0], vec![0.5], vec![0.25]).unwrap();
        let mut link = Vector::unknown("A", "B", length);
        link.record(0, FRAC_PI_2, 1.0, 0.0);

        let v = link.velocity_at(0).unwrap();
        assert_relative_eq!(v.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.5, epsilon = 1e-12);

        // along = 0.25 - 2·1² = -1.75, across = 2·0.5·1 = 1.0
        let a = link.acceleration_at(0).unwrap();
        assert_relative_eq!(a.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(a.y, -1.75, epsilon = 1e-12);
    }

    #[test]
    fn length_checks() {
        assert!(Length::Fixed(1.0).check(10).is_ok());
        assert_eq!(
            Length::Fixed(-1.0).check(10),
            Err(DomainError::NegativeLength {
                sample: 0,
                value: -1.0,
            })
        );

        let profile = Profile::new(vec![1.0, -0.5], vec![0.0; 2], vec![0.0; 2]).unwrap();
        let varying = Length::from(profile);
        assert_eq!(
            varying.check(2),
            Err(DomainError::NegativeLength {
                sample: 1,
                value: -0.5,
            })
        );
        assert!(matches!(
            varying.check(3),
            Err(DomainError::CountMismatch { .. })
        ));
    }
}
