//! The station inventory: item catalog, containers and current layout.

use crate::waste::WASTE_ZONE;
use stowage_core::{Container, Error, Item, Placement, PlacementSnapshot, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Items, containers and placements managed together.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Inventory {
    /// Item catalog.
    pub items: Vec<Item>,
    /// Known containers.
    pub containers: Vec<Container>,
    /// Current layout.
    pub placements: Vec<Placement>,
}

impl Inventory {
    /// Creates an inventory.
    pub fn new(items: Vec<Item>, containers: Vec<Container>, placements: Vec<Placement>) -> Self {
        Self {
            items,
            containers,
            placements,
        }
    }

    /// Validates every record.
    ///
    /// Containers in the waste zone only need an id; they have no face.
    pub fn validate(&self) -> Result<()> {
        for item in &self.items {
            item.validate()?;
        }
        for container in &self.containers {
            if container.zone == WASTE_ZONE {
                if container.container_id.is_empty() {
                    return Err(Error::invalid_container("container id must not be empty"));
                }
                continue;
            }
            container.validate()?;
        }
        for placement in &self.placements {
            placement.validate()?;
        }
        Ok(())
    }

    /// Looks up an item by id.
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    /// Looks up a container by id.
    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.container_id == container_id)
    }

    /// The current layout keyed by item id.
    pub fn snapshot(&self) -> PlacementSnapshot {
        PlacementSnapshot::from(self.placements.as_slice())
    }

    /// Items with no placement, in catalog order.
    pub fn unplaced_items(&self) -> Vec<&Item> {
        let layout = self.snapshot();
        self.items
            .iter()
            .filter(|i| !layout.contains(&i.item_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::{Position, Rect};

    #[test]
    fn test_lookup_and_unplaced() {
        let inventory = Inventory::new(
            vec![
                Item::new("a", 1.0, 1.0, 1.0, "Z"),
                Item::new("b", 1.0, 1.0, 1.0, "Z"),
            ],
            vec![Container::new("C", "Z", 5.0, 5.0, 5.0)],
            vec![Placement::new(
                "C",
                "a",
                Position::on_open_face(&Rect::new(0.0, 0.0, 1.0, 1.0), 1.0),
            )],
        );

        assert!(inventory.validate().is_ok());
        assert_eq!(inventory.item("b").map(|i| i.item_id.as_str()), Some("b"));
        assert!(inventory.container("D").is_none());

        let unplaced: Vec<&str> = inventory
            .unplaced_items()
            .iter()
            .map(|i| i.item_id.as_str())
            .collect();
        assert_eq!(unplaced, vec!["b"]);
    }

    #[test]
    fn test_validate_reports_bad_container() {
        let inventory = Inventory::new(Vec::new(), vec![Container::new("", "Z", 1.0, 1.0, 1.0)], Vec::new());
        assert!(matches!(inventory.validate(), Err(Error::InvalidContainer(_))));
    }
}
