//! Items, containers and their box dimensions.

use crate::time::Instant;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Item identifier.
pub type ItemId = String;

/// Container identifier.
pub type ContainerId = String;

/// Axis-aligned box extents on the (width, height, depth) axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Extent along the width axis.
    pub width: f64,
    /// Extent along the height axis.
    pub height: f64,
    /// Extent along the depth axis.
    pub depth: f64,
}

impl Dimensions {
    /// Creates new dimensions.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the volume.
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Returns the area of the open face (width x height).
    pub fn face_area(&self) -> f64 {
        self.width * self.height
    }

    /// Returns true if every extent is strictly positive and finite.
    pub fn is_positive(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// A physical item with a fixed rectangular footprint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    /// Unique identifier.
    pub item_id: ItemId,

    /// Extent along the width axis.
    pub width: f64,

    /// Extent along the height axis.
    pub height: f64,

    /// Extent along the depth axis.
    pub depth: f64,

    /// Zone the item should be stowed in.
    pub preferred_zone: String,

    /// Packing priority; higher values are placed first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i64,

    /// Remaining number of uses.
    pub usage_limit: u32,

    /// Instant after which the item counts as expired.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            skip_serializing_if = "Option::is_none",
            with = "crate::time::serde_instant_opt"
        )
    )]
    pub expiry_date: Option<Instant>,

    /// Display name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,

    /// Mass, when known. Waste planning falls back to a volume-derived mass.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mass: Option<f64>,
}

impl Item {
    /// Creates a new item with priority 0 and a single use.
    pub fn new(
        item_id: impl Into<ItemId>,
        width: f64,
        height: f64,
        depth: f64,
        preferred_zone: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            width,
            height,
            depth,
            preferred_zone: preferred_zone.into(),
            priority: 0,
            usage_limit: 1,
            expiry_date: None,
            name: None,
            mass: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the remaining usage count.
    pub fn with_usage_limit(mut self, usage_limit: u32) -> Self {
        self.usage_limit = usage_limit;
        self
    }

    /// Sets the expiry instant.
    pub fn with_expiry(mut self, expiry: Instant) -> Self {
        self.expiry_date = Some(expiry);
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Returns the item's dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }

    /// Returns the display name or `"Unknown"`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Validates the descriptor.
    pub fn validate(&self) -> Result<()> {
        if self.item_id.is_empty() {
            return Err(Error::invalid_item("item id must not be empty"));
        }

        if !self.dimensions().is_positive() {
            return Err(Error::invalid_item(format!(
                "All dimensions for '{}' must be positive",
                self.item_id
            )));
        }

        if let Some(mass) = self.mass {
            if mass < 0.0 {
                return Err(Error::invalid_item(format!(
                    "Mass for '{}' cannot be negative",
                    self.item_id
                )));
            }
        }

        Ok(())
    }
}

/// A bounded rectangular container belonging to a zone.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Container {
    /// Unique identifier.
    pub container_id: ContainerId,

    /// Zone label.
    pub zone: String,

    /// Open face width.
    pub width: f64,

    /// Open face height.
    pub height: f64,

    /// Maximum usable depth.
    pub depth: f64,
}

impl Container {
    /// Creates a new container.
    pub fn new(
        container_id: impl Into<ContainerId>,
        zone: impl Into<String>,
        width: f64,
        height: f64,
        depth: f64,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            zone: zone.into(),
            width,
            height,
            depth,
        }
    }

    /// Returns the container's dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }

    /// Returns the open face area.
    pub fn face_area(&self) -> f64 {
        self.width * self.height
    }

    /// Validates the descriptor.
    pub fn validate(&self) -> Result<()> {
        if self.container_id.is_empty() {
            return Err(Error::invalid_container("container id must not be empty"));
        }

        if !self.dimensions().is_positive() {
            return Err(Error::invalid_container(format!(
                "All dimensions for '{}' must be positive",
                self.container_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_item_dimensions() {
        let item = Item::new("I1", 10.0, 20.0, 30.0, "Z");
        assert_relative_eq!(item.dimensions().volume(), 6000.0, epsilon = 1e-9);
        assert_relative_eq!(item.dimensions().face_area(), 200.0, epsilon = 1e-9);
        assert_eq!(item.display_name(), "Unknown");
    }

    #[test]
    fn test_item_validation() {
        assert!(Item::new("I1", 10.0, 20.0, 30.0, "Z").validate().is_ok());
        assert!(Item::new("", 10.0, 20.0, 30.0, "Z").validate().is_err());
        assert!(Item::new("I2", 0.0, 20.0, 30.0, "Z").validate().is_err());
        assert!(Item::new("I3", 10.0, f64::NAN, 30.0, "Z").validate().is_err());
        assert!(Item::new("I4", 10.0, 20.0, 30.0, "Z")
            .with_mass(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_container_validation() {
        assert!(Container::new("C1", "Z", 100.0, 100.0, 50.0).validate().is_ok());

        let err = Container::new("C2", "Z", 100.0, -1.0, 50.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidContainer(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_item_wire_shape() {
        let json = r#"{
            "itemId": "001",
            "name": "Food Packet",
            "width": 10,
            "depth": 10,
            "height": 20,
            "priority": 80,
            "expiryDate": "2025-05-20",
            "usageLimit": 30,
            "preferredZone": "Crew Quarters"
        }"#;

        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_id, "001");
        assert_eq!(item.priority, 80);
        assert_eq!(item.usage_limit, 30);
        assert_eq!(item.preferred_zone, "Crew Quarters");
        assert!(item.expiry_date.is_some());
        assert_relative_eq!(item.height, 20.0);
    }
}
