use std::collections::{HashMap, VecDeque};

use linkage_core::{DomainError, Joint, Vector};
use nalgebra::Vector2;

/// A spanning tree of the joints, rooted at the origin.
///
/// Joints are stored in breadth-first order from the origin, so each joint's
/// parent comes before it. Each non-origin joint is reached from its parent
/// along one vector, forwards (tail to head) or backwards.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    joints: Vec<Joint>,
    index: HashMap<Joint, usize>,
    edges: Vec<Option<Edge>>,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    parent: usize,
    vector: usize,
    sign: f64,
}

impl Layout {
    /// Builds the tree by walking vectors breadth-first from `origin`.
    pub(crate) fn new(vectors: &[Vector], origin: &Joint) -> Result<Self, DomainError> {
        let mut declared: Vec<&Joint> = Vec::new();
        for vector in vectors {
            for joint in [vector.tail(), vector.head()] {
                if !declared.contains(&joint) {
                    declared.push(joint);
                }
            }
        }
        if !declared.contains(&origin) {
            return Err(DomainError::UnknownJoint(origin.name().to_owned()));
        }

        let mut joints = vec![origin.clone()];
        let mut index = HashMap::from([(origin.clone(), 0)]);
        let mut edges = vec![None];
        let mut queue = VecDeque::from([0]);

        while let Some(parent) = queue.pop_front() {
            let from = joints[parent].clone();
            for (vector, v) in vectors.iter().enumerate() {
                let (next, sign) = if *v.tail() == from {
                    (v.head(), 1.0)
                } else if *v.head() == from {
                    (v.tail(), -1.0)
                } else {
                    continue;
                };
                if index.contains_key(next) {
                    continue;
                }

                index.insert(next.clone(), joints.len());
                queue.push_back(joints.len());
                joints.push(next.clone());
                edges.push(Some(Edge {
                    parent,
                    vector,
                    sign,
                }));
            }
        }

        if let Some(missing) = declared.iter().find(|joint| !index.contains_key(**joint)) {
            return Err(DomainError::Disconnected(missing.name().to_owned()));
        }

        Ok(Self {
            joints,
            index,
            edges,
        })
    }

    /// Joints in breadth-first order, origin first.
    pub(crate) fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub(crate) fn index_of(&self, joint: &Joint) -> Option<usize> {
        self.index.get(joint).copied()
    }

    /// Sums vector components from the origin out to every joint.
    ///
    /// `component(i)` is the contribution of vector `i`; the origin gets zero.
    pub(crate) fn accumulate<F>(&self, mut component: F) -> Result<Vec<Vector2<f64>>, DomainError>
    where
        F: FnMut(usize) -> Result<Vector2<f64>, DomainError>,
    {
        let mut sums = Vec::with_capacity(self.joints.len());
        for edge in &self.edges {
            let sum = match edge {
                None => Vector2::zeros(),
                Some(edge) => sums[edge.parent] + edge.sign * component(edge.vector)?,
            };
            sums.push(sum);
        }
        Ok(sums)
    }
}
