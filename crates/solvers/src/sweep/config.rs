use crate::{position::newton, rates};

/// Configuration for a sweep over a driving profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Settings for the per-sample position solve.
    pub newton: newton::Config,

    /// Settings for the velocity and acceleration solves.
    pub rates: rates::Config,

    /// Wrap the first sample's angles into `(-π, π]`.
    ///
    /// Later samples follow by continuation and are never wrapped, so their
    /// series stay continuous.
    pub normalize_initial: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newton: newton::Config::default(),
            rates: rates::Config::default(),
            normalize_initial: true,
        }
    }
}
