use linkage_core::Joint;
use nalgebra::{Point2, Vector2};

use crate::Mechanism;

/// Joint positions at one solved sample, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The sample index.
    pub sample: usize,

    /// The sample's time stamp, when the driving profile has them.
    pub time: Option<f64>,

    /// Every joint with its position, origin first.
    pub joints: Vec<(Joint, Point2<f64>)>,
}

impl Frame {
    /// Returns the position of `joint` in this frame.
    #[must_use]
    pub fn position(&self, joint: &Joint) -> Option<Point2<f64>> {
        self.joints
            .iter()
            .find_map(|(j, point)| (j == joint).then_some(*point))
    }
}

/// Iterator over the frames of every resolved sample.
///
/// Created by [`Mechanism::frames`].
#[derive(Debug)]
pub struct Frames<'a, E> {
    mechanism: &'a Mechanism<E>,
    next: usize,
    end: usize,
}

impl<'a, E> Frames<'a, E> {
    pub(crate) fn new(mechanism: &'a Mechanism<E>) -> Self {
        Self {
            mechanism,
            next: 0,
            end: mechanism.resolved(),
        }
    }
}

impl<E> Iterator for Frames<'_, E> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.next >= self.end {
            return None;
        }
        let sample = self.next;
        self.next += 1;

        let joints = self.mechanism.joint_positions(sample).ok()?;
        Some(Frame {
            sample,
            time: self.mechanism.time(sample),
            joints,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<E> ExactSizeIterator for Frames<'_, E> {}

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    /// The smallest box containing every point, or `None` for no points.
    pub fn enclosing(points: impl IntoIterator<Item = Point2<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let start = Self {
            min: first,
            max: first,
        };
        Some(points.fold(start, |bounds, p| Self {
            min: bounds.min.inf(&p),
            max: bounds.max.sup(&p),
        }))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let within_x = (self.min.x..=self.max.x).contains(&point.x);
        within_x && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// The trajectory of one joint over every resolved sample.
#[derive(Debug, Clone, PartialEq)]
pub struct JointPath {
    pub joint: Joint,
    pub positions: Vec<Point2<f64>>,
    pub velocities: Vec<Vector2<f64>>,
    pub accelerations: Vec<Vector2<f64>>,
}

impl JointPath {
    /// Returns the number of samples on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
