use std::{fmt, sync::Arc};

/// A named point in a linkage.
///
/// Joints carry identity only. Their positions follow from the vectors that
/// connect them, so cloning a joint is cheap and two joints are the same joint
/// whenever their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Joint(Arc<str>);

impl Joint {
    /// Creates a joint with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the joint's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Joint {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Joint {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Joint> for Joint {
    fn from(joint: &Joint) -> Self {
        joint.clone()
    }
}
