//! Zone-level greedy allocator.
//!
//! Items and containers are grouped by zone and zones never interact. Within
//! a zone, items go in priority order (highest first, stable) and each one
//! lands in the first container, by ascending id, whose face can hold its
//! best orientation. Inside a container the face packer picks the best-fit
//! free rectangle.

use crate::face::FacePacker;
use crate::orientation::{feasible_orientations, select_orientation_with, Orientation};
use stowage_core::{
    ActionEvent, ActionSink, ActionType, AllocationResult, Allocator, Config, Container, Item,
    OrientationPolicy, Placement, Position, Rect, Result, ZoneStats, NO_CONTAINER,
};

use std::collections::HashMap;
use std::time::Instant;

/// Per-container packing state for one batch.
struct ContainerFace<'a> {
    container: &'a Container,
    packer: FacePacker,
    placements: Vec<Placement>,
}

impl<'a> ContainerFace<'a> {
    fn new(container: &'a Container) -> Self {
        Self {
            container,
            packer: FacePacker::for_container(container),
            placements: Vec::new(),
        }
    }
}

/// First-fit across containers, best-fit within a container.
#[derive(Debug, Clone, Default)]
pub struct ZoneAllocator {
    config: Config,
}

impl ZoneAllocator {
    /// Creates an allocator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates an allocator with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Orientations to try for an item in a container, in preference order.
    fn orientations_for(&self, item: &Item, container: &Container) -> Vec<Orientation> {
        let dims = item.dimensions();
        match self.config.orientation_policy {
            OrientationPolicy::ThreeCandidates => {
                select_orientation_with(OrientationPolicy::ThreeCandidates, &dims, container.depth)
                    .into_iter()
                    .collect()
            }
            OrientationPolicy::AllPermutations => feasible_orientations(
                OrientationPolicy::AllPermutations,
                &dims,
                container.depth,
            ),
        }
    }

    /// Tries to put `item` on `face`; returns the committed placement.
    fn try_place(&self, item: &Item, face: &mut ContainerFace<'_>) -> Option<Placement> {
        for orientation in self.orientations_for(item, face.container) {
            let (w, h) = (orientation.footprint_width, orientation.footprint_height);
            if let Some((x, y)) = face.packer.place(w, h) {
                let footprint = Rect::new(x, y, w, h);
                let placement = Placement::new(
                    face.container.container_id.clone(),
                    item.item_id.clone(),
                    Position::on_open_face(&footprint, orientation.depth),
                );
                face.placements.push(placement.clone());
                return Some(placement);
            }
        }
        None
    }

    /// Allocates one zone's items into its containers.
    fn allocate_zone(
        &self,
        zone: &str,
        mut items: Vec<&Item>,
        containers: &[Container],
        existing: &[Placement],
        sink: &mut dyn ActionSink,
        result: &mut AllocationResult,
    ) {
        items.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut zone_containers: Vec<&Container> =
            containers.iter().filter(|c| c.zone == zone).collect();
        zone_containers.sort_by(|a, b| a.container_id.cmp(&b.container_id));

        let mut faces: Vec<ContainerFace<'_>> =
            zone_containers.into_iter().map(ContainerFace::new).collect();

        for face in &mut faces {
            for placement in existing
                .iter()
                .filter(|p| p.container_id == face.container.container_id)
            {
                face.packer.occupy(placement.footprint());
            }
        }

        let mut stats = ZoneStats {
            zone: zone.to_string(),
            container_count: faces.len(),
            face_area: faces.iter().map(|f| f.container.face_area()).sum(),
            ..Default::default()
        };

        for item in items {
            let placed = faces
                .iter_mut()
                .find_map(|face| self.try_place(item, face));

            match placed {
                Some(placement) => {
                    log::debug!(
                        "Placed '{}' in '{}' at ({}, {})",
                        placement.item_id,
                        placement.container_id,
                        placement.position.start_coordinates.width,
                        placement.position.start_coordinates.height
                    );
                    sink.record(ActionEvent::new(
                        self.config.actor_id.clone(),
                        ActionType::NewPlacement,
                        placement.item_id.clone(),
                        NO_CONTAINER,
                        placement.container_id.clone(),
                        self.config.placement_reason.clone(),
                    ));
                    stats.placed_count += 1;
                    stats.placed_area += placement.footprint().area();
                }
                None => {
                    log::warn!(
                        "No container in zone '{}' can take item '{}'",
                        zone,
                        item.item_id
                    );
                    stats.unplaced_count += 1;
                    result.unplaced.push(item.item_id.clone());
                }
            }
        }

        for face in faces {
            result.placements.extend(face.placements);
        }
        result.zone_stats.push(stats);
    }
}

impl Allocator for ZoneAllocator {
    fn allocate_with_existing(
        &self,
        items: &[Item],
        containers: &[Container],
        existing: &[Placement],
        sink: &mut dyn ActionSink,
    ) -> Result<AllocationResult> {
        let start = Instant::now();

        for item in items {
            item.validate()?;
        }
        for container in containers {
            container.validate()?;
        }
        for placement in existing {
            placement.validate()?;
        }

        // Zones in order of first appearance among the items.
        let mut zone_order: Vec<&str> = Vec::new();
        let mut zone_items: HashMap<&str, Vec<&Item>> = HashMap::new();
        for item in items {
            let zone = item.preferred_zone.as_str();
            zone_items
                .entry(zone)
                .or_insert_with(|| {
                    zone_order.push(zone);
                    Vec::new()
                })
                .push(item);
        }

        let mut result = AllocationResult::new();
        for zone in zone_order {
            let batch = zone_items.remove(zone).unwrap_or_default();
            self.allocate_zone(zone, batch, containers, existing, sink, &mut result);
        }

        result.finalize();
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Allocated {} of {} items into {} containers ({} face utilization)",
            result.placed_count(),
            items.len(),
            result.containers_used,
            result.utilization_percent()
        );

        Ok(result)
    }
}
