use linkage_core::Motion;

/// The fully solved kinematic state of a linkage at one sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleState {
    /// The sample index.
    pub sample: usize,

    /// Driving-input motion at this sample.
    pub drive: Motion,

    /// Unknown angles, in unknown-index order.
    pub angles: Vec<f64>,

    /// Unknown angular velocities.
    pub velocities: Vec<f64>,

    /// Unknown angular accelerations.
    pub accelerations: Vec<f64>,
}
