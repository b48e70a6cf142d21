//! Engine configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which item orientations the allocator considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrientationPolicy {
    /// Three candidates, one per dimension sent to the depth axis, each
    /// keeping a fixed pairing of the other two.
    #[default]
    ThreeCandidates,
    /// All six axis permutations; the three default candidates come first.
    AllPermutations,
}

/// Common configuration for allocation runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Orientation candidates considered per item.
    pub orientation_policy: OrientationPolicy,

    /// User id stamped on events emitted by the engine.
    pub actor_id: String,

    /// Reason attached to placement events.
    pub placement_reason: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            orientation_policy: OrientationPolicy::default(),
            actor_id: "system".to_string(),
            placement_reason: "Placed on open face.".to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the orientation policy.
    pub fn with_orientation_policy(mut self, policy: OrientationPolicy) -> Self {
        self.orientation_policy = policy;
        self
    }

    /// Sets the actor id used on emitted events.
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }

    /// Sets the reason attached to placement events.
    pub fn with_placement_reason(mut self, reason: impl Into<String>) -> Self {
        self.placement_reason = reason.into();
        self
    }
}
