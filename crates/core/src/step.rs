//! Ordered action steps handed to whoever moves items around.

use crate::geometry::{ContainerId, ItemId};
use crate::placement::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire value standing for "no container".
pub const NO_CONTAINER: &str = "NONE";

/// Physical action of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Put an item that was not stowed into a container.
    Place,
    /// Relocate a stowed item.
    Move,
    /// Take an item out (to be placed back, or for good).
    Remove,
    /// Take the target item out.
    Retrieve,
}

impl Action {
    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Place => "place",
            Action::Move => "move",
            Action::Remove => "remove",
            Action::Retrieve => "retrieve",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a rearrangement between two layouts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RearrangementStep {
    /// 1-based step number.
    pub step: u32,

    /// Place, move or remove.
    pub action: Action,

    /// Affected item.
    pub item_id: ItemId,

    /// Source container; `None` for a place.
    #[cfg_attr(feature = "serde", serde(with = "container_or_none"))]
    pub from_container: Option<ContainerId>,

    /// Source box; zero for a place.
    pub from_position: Position,

    /// Destination container; `None` for a remove.
    #[cfg_attr(feature = "serde", serde(with = "container_or_none"))]
    pub to_container: Option<ContainerId>,

    /// Destination box; zero for a remove.
    pub to_position: Position,
}

/// One step of a retrieval plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RetrievalStep {
    /// 1-based step number.
    pub step: u32,

    /// Remove (a blocking item) or retrieve (the target).
    pub action: Action,

    /// Affected item.
    pub item_id: ItemId,

    /// Display name, when known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub item_name: Option<String>,

    /// Whether the item must be put back once the target is out.
    pub place_back: bool,
}

impl RetrievalStep {
    /// A blocking item to set aside and put back afterwards.
    pub fn set_aside(step: u32, item_id: impl Into<ItemId>) -> Self {
        Self {
            step,
            action: Action::Remove,
            item_id: item_id.into(),
            item_name: None,
            place_back: true,
        }
    }

    /// The target item itself.
    pub fn retrieve(step: u32, item_id: impl Into<ItemId>) -> Self {
        Self {
            step,
            action: Action::Retrieve,
            item_id: item_id.into(),
            item_name: None,
            place_back: false,
        }
    }

    /// Sets the display name.
    pub fn with_item_name(mut self, name: impl Into<String>) -> Self {
        self.item_name = Some(name.into());
        self
    }
}

#[cfg(feature = "serde")]
mod container_or_none {
    use super::NO_CONTAINER;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NO_CONTAINER))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| s != NO_CONTAINER && !s.is_empty()))
    }
}
