//! Placement records for items stowed in containers.

use crate::geometry::{ContainerId, ItemId};
use crate::rect::Rect;
use crate::{Error, Result};

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point on the (width, depth, height) axes of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    /// Offset along the width axis.
    pub width: f64,
    /// Offset along the depth axis; 0 is the open face.
    pub depth: f64,
    /// Offset along the height axis.
    pub height: f64,
}

impl Coordinates {
    /// Creates new coordinates.
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// The container origin.
    pub fn origin() -> Self {
        Self::default()
    }
}

/// A 3D axis-aligned box given by its start and end corners.
///
/// The all-zero box doubles as the "no position" sentinel in step lists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Position {
    /// Minimum corner.
    pub start_coordinates: Coordinates,
    /// Maximum corner.
    pub end_coordinates: Coordinates,
}

impl Position {
    /// Creates a position from its corners.
    pub fn new(start: Coordinates, end: Coordinates) -> Self {
        Self {
            start_coordinates: start,
            end_coordinates: end,
        }
    }

    /// The zero box used when a step has no source or destination.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns true for the zero sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Builds the box of a footprint anchored on the open face.
    pub fn on_open_face(footprint: &Rect, depth: f64) -> Self {
        Self::new(
            Coordinates::new(footprint.x, 0.0, footprint.y),
            Coordinates::new(footprint.right(), depth, footprint.top()),
        )
    }

    /// Projection onto the (width, height) plane.
    pub fn footprint(&self) -> Rect {
        let start = &self.start_coordinates;
        let end = &self.end_coordinates;
        Rect::new(
            start.width,
            start.height,
            end.width - start.width,
            end.height - start.height,
        )
    }

    /// Returns true if the box starts at depth 0.
    pub fn is_on_open_face(&self) -> bool {
        self.start_coordinates.depth == 0.0
    }

    /// Checks that every coordinate is finite and start <= end on each axis.
    pub fn validate(&self) -> Result<()> {
        let start = &self.start_coordinates;
        let end = &self.end_coordinates;
        let axes = [
            ("width", start.width, end.width),
            ("depth", start.depth, end.depth),
            ("height", start.height, end.height),
        ];

        for (axis, lo, hi) in axes {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(Error::malformed_placement(format!(
                    "non-finite {} coordinate",
                    axis
                )));
            }
            if lo > hi {
                return Err(Error::malformed_placement(format!(
                    "{} start {} exceeds end {}",
                    axis, lo, hi
                )));
            }
        }

        Ok(())
    }
}

/// An item stowed in a container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Placement {
    /// Container holding the item.
    pub container_id: ContainerId,

    /// The placed item.
    pub item_id: ItemId,

    /// Occupied box.
    pub position: Position,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        container_id: impl Into<ContainerId>,
        item_id: impl Into<ItemId>,
        position: Position,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            item_id: item_id.into(),
            position,
        }
    }

    /// Footprint on the open face.
    pub fn footprint(&self) -> Rect {
        self.position.footprint()
    }

    /// Returns true if the placement sits on the open face.
    pub fn is_on_open_face(&self) -> bool {
        self.position.is_on_open_face()
    }

    /// Validates the record.
    pub fn validate(&self) -> Result<()> {
        if self.item_id.is_empty() || self.container_id.is_empty() {
            return Err(Error::malformed_placement(
                "placement needs both an item id and a container id",
            ));
        }

        self.position.validate().map_err(|e| match e {
            Error::MalformedPlacement(details) => {
                Error::malformed_placement(format!("item '{}': {}", self.item_id, details))
            }
            other => other,
        })
    }
}

/// Placement statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Placements per container, by container id.
    pub container_distribution: BTreeMap<ContainerId, usize>,
    /// Sum of occupied footprint areas.
    pub footprint_area: f64,
    /// Sum of occupied volumes.
    pub volume: f64,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut stats = Self {
            count: placements.len(),
            ..Default::default()
        };

        for p in placements {
            *stats
                .container_distribution
                .entry(p.container_id.clone())
                .or_insert(0) += 1;

            let footprint = p.footprint();
            let depth = p.position.end_coordinates.depth - p.position.start_coordinates.depth;
            stats.footprint_area += footprint.area();
            stats.volume += footprint.area() * depth;
        }

        stats
    }
}
