//! Allocation result representation.

use crate::geometry::ItemId;
use crate::placement::{Placement, PlacementStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-zone outcome of an allocation batch.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZoneStats {
    /// Zone label.
    pub zone: String,
    /// Containers of the zone that were considered.
    pub container_count: usize,
    /// Items placed in the zone.
    pub placed_count: usize,
    /// Items of the zone left unplaced.
    pub unplaced_count: usize,
    /// Footprint area placed by this batch.
    pub placed_area: f64,
    /// Total open-face area of the zone's containers.
    pub face_area: f64,
}

impl ZoneStats {
    /// Placed area over available face area (0.0 when the zone has no face).
    pub fn utilization(&self) -> f64 {
        if self.face_area > 0.0 {
            self.placed_area / self.face_area
        } else {
            0.0
        }
    }
}

/// Result of an allocation batch.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationResult {
    /// Placements committed by this batch, grouped by zone then container.
    pub placements: Vec<Placement>,

    /// IDs of items no container could take.
    pub unplaced: Vec<ItemId>,

    /// Number of distinct containers that received at least one item.
    pub containers_used: usize,

    /// Placed footprint area over the face area of all considered containers.
    pub utilization: f64,

    /// Per-zone breakdown, in zone visitation order.
    pub zone_stats: Vec<ZoneStats>,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl AllocationResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if all items were placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Returns the number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of unplaced items.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(&self.placements)
    }

    /// Recomputes `containers_used` and `utilization` from the zone stats
    /// and placements.
    pub fn finalize(&mut self) {
        let mut used: Vec<&str> = self
            .placements
            .iter()
            .map(|p| p.container_id.as_str())
            .collect();
        used.sort_unstable();
        used.dedup();
        self.containers_used = used.len();

        let face: f64 = self.zone_stats.iter().map(|z| z.face_area).sum();
        let placed: f64 = self.zone_stats.iter().map(|z| z.placed_area).sum();
        self.utilization = if face > 0.0 { placed / face } else { 0.0 };
    }
}

/// Summary statistics for an allocation result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AllocationSummary {
    /// Total items requested.
    pub total_requested: usize,
    /// Total items placed.
    pub total_placed: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Number of containers used.
    pub containers_used: usize,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl From<&AllocationResult> for AllocationSummary {
    fn from(result: &AllocationResult) -> Self {
        Self {
            total_requested: result.placements.len() + result.unplaced.len(),
            total_placed: result.placements.len(),
            utilization_percent: result.utilization * 100.0,
            containers_used: result.containers_used,
            time_ms: result.computation_time_ms,
        }
    }
}
