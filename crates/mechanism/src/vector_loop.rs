use linkage_core::{AngleRole, DomainError, Length, LoopEquation, Motion, Vector, unit_pair};
use nalgebra::{DMatrix, DVector, Vector2};

/// An analytic loop equation built from signed sums of vectors.
///
/// Each loop is a list of vectors added or subtracted so that the sum is zero
/// when the loop closes. The residual stacks the two components of every
/// loop sum. Unknown angles are numbered by the order of the unknown vectors
/// in the slice passed to [`VectorLoop::builder`].
///
/// Lengths are taken per sample, so sliding members with a prescribed
/// [`Length::Varying`] contribute their rates to the velocity and
/// acceleration terms.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLoop {
    loops: Vec<Vec<Term>>,
    unknowns: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Term {
    sign: f64,
    length: Length,
    angle: TermAngle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TermAngle {
    Driven,
    Fixed(f64),
    Unknown(usize),
}

/// Collects the signed terms of each loop for a [`VectorLoop`].
#[derive(Debug, Clone)]
pub struct VectorLoopBuilder<'a> {
    vectors: &'a [Vector],
    loops: Vec<Vec<(usize, f64)>>,
    current: Vec<(usize, f64)>,
}

impl VectorLoop {
    /// Starts a loop equation over `vectors`.
    #[must_use]
    pub fn builder(vectors: &[Vector]) -> VectorLoopBuilder<'_> {
        VectorLoopBuilder {
            vectors,
            loops: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Returns the number of closed loops.
    #[must_use]
    pub fn loops(&self) -> usize {
        self.loops.len()
    }

    fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), DomainError> {
        if expected == found {
            Ok(())
        } else {
            Err(DomainError::CountMismatch {
                what,
                expected,
                found,
            })
        }
    }

    /// Sums `f(term, θ)` over each loop into a stacked residual-shaped vector.
    fn stack<F>(&self, angles: &[f64], input: f64, mut f: F) -> Result<DVector<f64>, DomainError>
    where
        F: FnMut(&Term, f64) -> Result<Vector2<f64>, DomainError>,
    {
        let mut out = DVector::zeros(2 * self.loops.len());
        for (index, terms) in self.loops.iter().enumerate() {
            let mut sum = Vector2::zeros();
            for term in terms {
                let theta = match term.angle {
                    TermAngle::Driven => input,
                    TermAngle::Fixed(theta) => theta,
                    TermAngle::Unknown(k) => angles[k],
                };
                sum += term.sign * f(term, theta)?;
            }
            out[2 * index] = sum.x;
            out[2 * index + 1] = sum.y;
        }
        Ok(out)
    }
}

impl VectorLoopBuilder<'_> {
    /// Adds vector `index` to the current loop.
    #[must_use]
    pub fn plus(mut self, index: usize) -> Self {
        self.current.push((index, 1.0));
        self
    }

    /// Subtracts vector `index` from the current loop.
    #[must_use]
    pub fn minus(mut self, index: usize) -> Self {
        self.current.push((index, -1.0));
        self
    }

    /// Closes the current loop and starts the next one.
    #[must_use]
    pub fn close(mut self) -> Self {
        self.loops.push(std::mem::take(&mut self.current));
        self
    }

    /// Builds the loop equation, closing the current loop if it has terms.
    ///
    /// # Errors
    ///
    /// Returns an error if a loop is empty, refers to a vector that does not
    /// exist, or if the unknown vectors do not give a square system with every
    /// unknown appearing in some loop.
    pub fn build(mut self) -> Result<VectorLoop, DomainError> {
        if !self.current.is_empty() {
            self.loops.push(std::mem::take(&mut self.current));
        }

        let mut unknown_index = Vec::with_capacity(self.vectors.len());
        let mut unknowns = 0;
        for vector in self.vectors {
            if vector.role() == AngleRole::Unknown {
                unknown_index.push(Some(unknowns));
                unknowns += 1;
            } else {
                unknown_index.push(None);
            }
        }

        let mut used = vec![false; unknowns];
        let mut loops = Vec::with_capacity(self.loops.len());
        for (index, entries) in self.loops.iter().enumerate() {
            if entries.is_empty() {
                return Err(DomainError::EmptyLoop { index });
            }

            let mut terms = Vec::with_capacity(entries.len());
            for &(vector_index, sign) in entries {
                let vector =
                    self.vectors
                        .get(vector_index)
                        .ok_or(DomainError::UnknownVector {
                            index: vector_index,
                            len: self.vectors.len(),
                        })?;

                let angle = match (unknown_index[vector_index], vector.role()) {
                    (Some(k), _) => {
                        used[k] = true;
                        TermAngle::Unknown(k)
                    }
                    (None, AngleRole::Fixed(theta)) => TermAngle::Fixed(theta),
                    (None, _) => TermAngle::Driven,
                };
                terms.push(Term {
                    sign,
                    length: vector.length().clone(),
                    angle,
                });
            }
            loops.push(terms);
        }

        if let Some(index) = used.iter().position(|&u| !u) {
            return Err(DomainError::UnusedUnknown { index });
        }
        VectorLoop::check_len("loop residuals", unknowns, 2 * loops.len())?;

        Ok(VectorLoop { loops, unknowns })
    }
}

impl LoopEquation for VectorLoop {
    type Error = DomainError;

    fn unknowns(&self) -> usize {
        self.unknowns
    }

    fn residuals(
        &self,
        sample: usize,
        angles: &[f64],
        input: f64,
    ) -> Result<DVector<f64>, Self::Error> {
        Self::check_len("angles", self.unknowns, angles.len())?;

        self.stack(angles, input, |term, theta| {
            let r = term.length.at(sample)?.position;
            Ok(r * unit_pair(theta).0)
        })
    }

    fn jacobian(
        &self,
        sample: usize,
        angles: &[f64],
        _input: f64,
    ) -> Result<DMatrix<f64>, Self::Error> {
        Self::check_len("angles", self.unknowns, angles.len())?;

        let mut jacobian = DMatrix::zeros(2 * self.loops.len(), self.unknowns);
        for (index, terms) in self.loops.iter().enumerate() {
            for term in terms {
                if let TermAngle::Unknown(k) = term.angle {
                    let r = term.length.at(sample)?.position;
                    let column = term.sign * r * unit_pair(angles[k]).1;
                    jacobian[(2 * index, k)] += column.x;
                    jacobian[(2 * index + 1, k)] += column.y;
                }
            }
        }
        Ok(jacobian)
    }

    fn velocity_terms(
        &self,
        sample: usize,
        angles: &[f64],
        drive: &Motion,
    ) -> Result<DVector<f64>, Self::Error> {
        Self::check_len("angles", self.unknowns, angles.len())?;

        self.stack(angles, drive.position, |term, theta| {
            let length = term.length.at(sample)?;
            let omega = match term.angle {
                TermAngle::Driven => drive.velocity,
                TermAngle::Fixed(_) | TermAngle::Unknown(_) => 0.0,
            };
            let (radial, normal) = unit_pair(theta);
            Ok(length.velocity * radial + length.position * omega * normal)
        })
    }

    fn acceleration_terms(
        &self,
        sample: usize,
        angles: &[f64],
        velocities: &[f64],
        drive: &Motion,
    ) -> Result<DVector<f64>, Self::Error> {
        Self::check_len("angles", self.unknowns, angles.len())?;
        Self::check_len("velocities", self.unknowns, velocities.len())?;

        self.stack(angles, drive.position, |term, theta| {
            let length = term.length.at(sample)?;
            let (omega, alpha) = match term.angle {
                TermAngle::Driven => (drive.velocity, drive.acceleration),
                TermAngle::Fixed(_) => (0.0, 0.0),
                TermAngle::Unknown(k) => (velocities[k], 0.0),
            };
            let (radial, normal) = unit_pair(theta);

            let along = length.acceleration - length.position * omega * omega;
            let across = length.position * alpha + 2.0 * length.velocity * omega;
            Ok(along * radial + across * normal)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use linkage_core::{LoopFn, Profile};

    /// Crank-rocker: ground 4, crank 1, coupler 3, rocker 3.5.
    fn crank_rocker() -> Vec<Vector> {
        vec![
            Vector::fixed("O2", "O4", 4.0, 0.0),
            Vector::driven("O2", "A", 1.0),
            Vector::unknown("A", "B", 3.0),
            Vector::unknown("O4", "B", 3.5),
        ]
    }

    fn crank_rocker_loop(vectors: &[Vector]) -> VectorLoop {
        VectorLoop::builder(vectors)
            .plus(1)
            .plus(2)
            .minus(3)
            .minus(0)
            .build()
            .unwrap()
    }

    #[test]
    fn residual_vanishes_at_a_closed_configuration() {
        // Crank along +x puts A at (1, 0); B sits at the triangle apex over
        // the segment from A to O4 = (4, 0) with sides 3 and 3.5.
        let vectors = crank_rocker();
        let equation = crank_rocker_loop(&vectors);

        let a = Vector2::<f64>::new(1.0, 0.0);
        let o4 = Vector2::<f64>::new(4.0, 0.0);
        let base = (o4 - a).norm();
        let along = (3.0_f64.powi(2) - 3.5_f64.powi(2) + base * base) / (2.0 * base);
        let height = (9.0 - along * along).sqrt();
        let b = a + Vector2::new(along, height);

        let coupler = (b - a).y.atan2((b - a).x);
        let rocker = (b - o4).y.atan2((b - o4).x);
        let residual = equation.residuals(0, &[coupler, rocker], 0.0).unwrap();

        assert_eq!(residual.len(), 2);
        assert_relative_eq!(residual.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn analytic_terms_match_finite_differences() {
        let vectors = crank_rocker();
        let analytic = crank_rocker_loop(&vectors);
        let numeric = LoopFn::new(2, |x: &[f64], u: f64| {
            analytic
                .residuals(0, x, u)
                .map(|r| r.as_slice().to_vec())
                .unwrap_or_default()
        });

        let angles = [0.9, 1.7];
        let velocities = [0.4, -1.1];
        let drive = Motion::new(0.6, 2.0, -0.7);

        let j_analytic = analytic.jacobian(0, &angles, drive.position).unwrap();
        let j_numeric = numeric.jacobian(0, &angles, drive.position).unwrap();
        assert_relative_eq!(j_analytic, j_numeric, epsilon = 1e-8);

        let v_analytic = analytic.velocity_terms(0, &angles, &drive).unwrap();
        let v_numeric = numeric.velocity_terms(0, &angles, &drive).unwrap();
        assert_relative_eq!(v_analytic, v_numeric, epsilon = 1e-7);

        let a_analytic = analytic
            .acceleration_terms(0, &angles, &velocities, &drive)
            .unwrap();
        let a_numeric = numeric
            .acceleration_terms(0, &angles, &velocities, &drive)
            .unwrap();
        assert_relative_eq!(a_analytic, a_numeric, epsilon = 1e-5);
    }

    #[test]
    fn varying_length_contributes_its_rates() {
        // A single slider of length r(t) at a fixed angle, closed by an
        // unknown-angle link back to the origin: only the slider moves.
        let slider = Profile::new(vec![2.0], vec![0.5], vec![0.25]).unwrap();
        let vectors = vec![
            Vector::fixed("O", "S", slider, PI / 2.0),
            Vector::driven("O", "C", 1.0),
            Vector::unknown("C", "S", 2.0),
        ];
        let equation = VectorLoop::builder(&vectors)
            .plus(1)
            .plus(2)
            .minus(0)
            .build();

        // Two residuals, one unknown: not square.
        assert_eq!(
            equation,
            Err(DomainError::CountMismatch {
                what: "loop residuals",
                expected: 1,
                found: 2,
            })
        );

        let vectors = vec![
            vectors[0].clone(),
            Vector::driven("O", "C", 1.0),
            Vector::unknown("C", "D", 2.0),
            Vector::unknown("D", "S", 1.0),
        ];
        let equation = VectorLoop::builder(&vectors)
            .plus(1)
            .plus(2)
            .plus(3)
            .minus(0)
            .build()
            .unwrap();

        let drive = Motion::at_rest(0.0);
        let terms = equation.velocity_terms(0, &[0.3, 1.2], &drive).unwrap();
        // -ṙ ê for the subtracted slider at π/2.
        assert_relative_eq!(terms[0], 0.0, epsilon = 1e-15);
        assert_relative_eq!(terms[1], -0.5, epsilon = 1e-15);

        let accel = equation
            .acceleration_terms(0, &[0.3, 1.2], &[0.0, 0.0], &drive)
            .unwrap();
        assert_relative_eq!(accel[1], -0.25, epsilon = 1e-15);
    }

    #[test]
    fn builder_rejects_malformed_loops() {
        let vectors = crank_rocker();

        let unknown_vector = VectorLoop::builder(&vectors).plus(1).plus(7).build();
        assert_eq!(
            unknown_vector,
            Err(DomainError::UnknownVector { index: 7, len: 4 })
        );

        let empty = VectorLoop::builder(&vectors)
            .plus(1)
            .plus(2)
            .minus(3)
            .minus(0)
            .close()
            .close()
            .build();
        assert_eq!(empty, Err(DomainError::EmptyLoop { index: 1 }));

        let unused = VectorLoop::builder(&vectors)
            .plus(1)
            .plus(2)
            .minus(0)
            .build();
        assert_eq!(unused, Err(DomainError::UnusedUnknown { index: 1 }));
    }

    #[test]
    fn angle_count_is_checked() {
        let vectors = crank_rocker();
        let equation = crank_rocker_loop(&vectors);

        assert_eq!(
            equation.residuals(0, &[0.0], 0.0),
            Err(DomainError::CountMismatch {
                what: "angles",
                expected: 2,
                found: 1,
            })
        );
    }
}
