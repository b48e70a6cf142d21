//! Waste identification and return planning.
//!
//! An item is waste once it has expired or has no uses left. Waste is
//! moved to an undocking container under a weight budget and disappears
//! from the inventory when that container undocks.

use crate::inventory::Inventory;
use stowage_core::{
    ActionEvent, ActionSink, ActionType, Container, ContainerId, Error, Instant, Item, ItemId,
    Placement, Position, Result, RetrievalStep,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Container id reported for waste that has no placement.
pub const NOT_PLACED: &str = "Not Placed";

/// Zone of undocking containers registered by return planning. Such a
/// container only stages waste and has no packable face.
pub const WASTE_ZONE: &str = "Waste";

/// Why an item counts as waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WasteReason {
    /// Past its expiry date.
    Expired,
    /// No uses left.
    #[cfg_attr(feature = "serde", serde(rename = "Out of Uses"))]
    OutOfUses,
}

impl WasteReason {
    /// Classifies an item at `now`. Expiry wins over usage.
    pub fn of(item: &Item, now: Instant) -> Option<Self> {
        match item.expiry_date {
            Some(expiry) if expiry < now => Some(Self::Expired),
            _ if item.usage_limit == 0 => Some(Self::OutOfUses),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::OutOfUses => "Out of Uses",
        }
    }
}

impl std::fmt::Display for WasteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A waste item and where it sits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WasteItem {
    /// Waste item.
    pub item_id: ItemId,
    /// Display name.
    pub name: String,
    /// Why it is waste.
    pub reason: WasteReason,
    /// Holding container, or [`NOT_PLACED`].
    pub container_id: ContainerId,
    /// Occupied box, zero when not placed.
    pub position: Position,
}

/// Lists waste items in item order.
pub fn identify_waste(items: &[Item], placements: &[Placement], now: Instant) -> Vec<WasteItem> {
    items
        .iter()
        .filter_map(|item| {
            let reason = WasteReason::of(item, now)?;
            let placement = placements.iter().find(|p| p.item_id == item.item_id);
            Some(WasteItem {
                item_id: item.item_id.clone(),
                name: item.display_name().to_string(),
                reason,
                container_id: placement
                    .map(|p| p.container_id.clone())
                    .unwrap_or_else(|| NOT_PLACED.to_string()),
                position: placement.map(|p| p.position).unwrap_or_default(),
            })
        })
        .collect()
}

/// Return planning settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReturnPlanConfig {
    /// Mass assumed per unit volume for items without an explicit mass.
    pub mass_per_volume: f64,

    /// User id stamped on emitted events.
    pub actor_id: String,
}

impl Default for ReturnPlanConfig {
    fn default() -> Self {
        Self {
            mass_per_volume: 1.0,
            actor_id: "system".to_string(),
        }
    }
}

impl ReturnPlanConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mass-per-volume factor.
    pub fn with_mass_per_volume(mut self, mass_per_volume: f64) -> Self {
        self.mass_per_volume = mass_per_volume;
        self
    }

    /// Sets the actor id used on emitted events.
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }

    /// Checks the factor is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.mass_per_volume.is_finite() || self.mass_per_volume < 0.0 {
            return Err(Error::ConfigError(format!(
                "mass per volume must be finite and non-negative, got {}",
                self.mass_per_volume
            )));
        }
        Ok(())
    }

    /// Mass of an item: explicit, or derived from its volume.
    pub fn mass_of(&self, item: &Item) -> f64 {
        item.mass
            .unwrap_or_else(|| item.dimensions().volume() * self.mass_per_volume)
    }
}

/// Request for a waste return plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReturnRequest {
    /// Container that leaves the station with the waste.
    pub undocking_container_id: ContainerId,
    /// When it leaves.
    #[cfg_attr(feature = "serde", serde(with = "stowage_core::time::serde_instant"))]
    pub undocking_date: Instant,
    /// Weight budget of the undocking container.
    pub max_weight: f64,
}

impl ReturnRequest {
    /// Creates a request.
    pub fn new(undocking_container_id: impl Into<ContainerId>, undocking_date: Instant, max_weight: f64) -> Self {
        Self {
            undocking_container_id: undocking_container_id.into(),
            undocking_date,
            max_weight,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.undocking_container_id.is_empty() {
            return Err(Error::ConfigError("undocking container id is empty".into()));
        }
        if !self.max_weight.is_finite() || self.max_weight < 0.0 {
            return Err(Error::ConfigError(format!(
                "max weight must be finite and non-negative, got {}",
                self.max_weight
            )));
        }
        Ok(())
    }
}

/// One move of a waste item into the undocking container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReturnStep {
    /// 1-based step number.
    pub step: u32,
    /// Moved item.
    pub item_id: ItemId,
    /// Display name.
    pub item_name: String,
    /// Current container, or [`NOT_PLACED`].
    pub from_container: ContainerId,
    /// The undocking container.
    pub to_container: ContainerId,
}

/// A manifest line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReturnItem {
    /// Returned item.
    pub item_id: ItemId,
    /// Display name.
    pub name: String,
    /// Why it is returned.
    pub reason: WasteReason,
}

/// What leaves with the undocking container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReturnManifest {
    /// Undocking container.
    pub undocking_container_id: ContainerId,
    /// Undocking date.
    #[cfg_attr(feature = "serde", serde(with = "stowage_core::time::serde_instant"))]
    pub undocking_date: Instant,
    /// Selected items, in selection order.
    pub return_items: Vec<ReturnItem>,
    /// Sum of item volumes.
    pub total_volume: f64,
    /// Sum of item masses.
    pub total_weight: f64,
}

/// A waste return plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReturnPlan {
    /// Moves into the undocking container.
    pub return_plan: Vec<ReturnStep>,
    /// One retrieve step per selected item.
    pub retrieval_steps: Vec<RetrievalStep>,
    /// What leaves the station.
    pub return_manifest: ReturnManifest,
}

/// Outcome of an undocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UndockingReport {
    /// Items dropped from the catalog.
    pub items_removed: usize,
    /// Placements dropped from the layout.
    pub placements_removed: usize,
}

impl Inventory {
    /// Lists waste items at `now`.
    pub fn identify_waste(&self, now: Instant) -> Vec<WasteItem> {
        identify_waste(&self.items, &self.placements, now)
    }

    /// Selects waste for the undocking container and relabels the selected
    /// placements to it.
    ///
    /// An undocking container missing from `containers` is registered in
    /// [`WASTE_ZONE`] with zero extents.
    ///
    /// Selection is greedy in item order: an item goes in iff the running
    /// weight plus its mass stays within `max_weight`.
    pub fn plan_return(
        &mut self,
        now: Instant,
        request: &ReturnRequest,
        config: &ReturnPlanConfig,
        sink: &mut dyn ActionSink,
    ) -> Result<ReturnPlan> {
        request.validate()?;
        config.validate()?;

        let waste = self.identify_waste(now);

        let mut return_plan = Vec::new();
        let mut retrieval_steps = Vec::new();
        let mut return_items = Vec::new();
        let mut total_weight = 0.0;
        let mut total_volume = 0.0;

        for entry in waste {
            let Some(item) = self.items.iter().find(|i| i.item_id == entry.item_id) else {
                continue;
            };
            let mass = config.mass_of(item);
            if total_weight + mass > request.max_weight {
                log::debug!(
                    "Skipping '{}' ({} over budget {})",
                    entry.item_id,
                    total_weight + mass,
                    request.max_weight
                );
                continue;
            }
            total_weight += mass;
            total_volume += item.dimensions().volume();

            let step = return_plan.len() as u32 + 1;
            return_plan.push(ReturnStep {
                step,
                item_id: entry.item_id.clone(),
                item_name: entry.name.clone(),
                from_container: entry.container_id.clone(),
                to_container: request.undocking_container_id.clone(),
            });
            retrieval_steps.push(
                RetrievalStep::retrieve(step, entry.item_id.clone()).with_item_name(entry.name.clone()),
            );
            return_items.push(ReturnItem {
                item_id: entry.item_id,
                name: entry.name,
                reason: entry.reason,
            });
        }

        if self.container(&request.undocking_container_id).is_none() {
            log::info!(
                "Registering undocking container '{}' in zone '{}'",
                request.undocking_container_id,
                WASTE_ZONE
            );
            self.containers.push(Container::new(
                request.undocking_container_id.clone(),
                WASTE_ZONE,
                0.0,
                0.0,
                0.0,
            ));
        }

        for placement in &mut self.placements {
            if return_items.iter().any(|r| r.item_id == placement.item_id) {
                placement.container_id = request.undocking_container_id.clone();
                placement.position = Position::zero();
            }
        }

        log::info!(
            "Return plan for '{}': {} items, weight {} of {}",
            request.undocking_container_id,
            return_items.len(),
            total_weight,
            request.max_weight
        );
        sink.record(ActionEvent::new(
            config.actor_id.clone(),
            ActionType::WasteReturnPlan,
            "",
            "Various",
            request.undocking_container_id.clone(),
            "Waste return plan generated",
        ));

        Ok(ReturnPlan {
            return_plan,
            retrieval_steps,
            return_manifest: ReturnManifest {
                undocking_container_id: request.undocking_container_id.clone(),
                undocking_date: request.undocking_date,
                return_items,
                total_volume,
                total_weight,
            },
        })
    }

    /// Drops everything held by the undocking container, the container
    /// itself included.
    pub fn complete_undocking(
        &mut self,
        undocking_container_id: &str,
        actor: &str,
        sink: &mut dyn ActionSink,
    ) -> UndockingReport {
        let leaving: Vec<ItemId> = self
            .placements
            .iter()
            .filter(|p| p.container_id == undocking_container_id)
            .map(|p| p.item_id.clone())
            .collect();

        let placements_before = self.placements.len();
        self.placements
            .retain(|p| p.container_id != undocking_container_id);

        let items_before = self.items.len();
        self.items.retain(|item| !leaving.contains(&item.item_id));

        self.containers
            .retain(|c| c.container_id != undocking_container_id);

        let report = UndockingReport {
            items_removed: items_before - self.items.len(),
            placements_removed: placements_before - self.placements.len(),
        };

        log::info!(
            "Undocked '{}': {} items removed",
            undocking_container_id,
            report.items_removed
        );
        sink.record(ActionEvent::new(
            actor,
            ActionType::CompleteUndocking,
            "",
            undocking_container_id,
            "Removed",
            "Undocking completed",
        ));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use stowage_core::{MemorySink, NullSink, Rect};

    fn now() -> Instant {
        Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
    }

    fn placed(container: &str, item: &str) -> Placement {
        Placement::new(
            container,
            item,
            Position::on_open_face(&Rect::new(0.0, 0.0, 1.0, 1.0), 1.0),
        )
    }

    fn sample() -> Inventory {
        Inventory {
            items: vec![
                Item::new("old", 2.0, 2.0, 2.0, "Z")
                    .with_name("Old Food")
                    .with_usage_limit(3)
                    .with_expiry(now() - Duration::days(1)),
                Item::new("used", 1.0, 1.0, 1.0, "Z").with_usage_limit(0),
                Item::new("fine", 1.0, 1.0, 1.0, "Z")
                    .with_usage_limit(2)
                    .with_expiry(now() + Duration::days(1)),
                Item::new("heavy", 1.0, 1.0, 1.0, "Z")
                    .with_usage_limit(0)
                    .with_mass(100.0),
            ],
            containers: vec![Container::new("C1", "Z", 10.0, 10.0, 10.0)],
            placements: vec![placed("C1", "old"), placed("C1", "fine")],
        }
    }

    #[test]
    fn test_waste_reason() {
        let expired_and_empty = Item::new("x", 1.0, 1.0, 1.0, "Z")
            .with_usage_limit(0)
            .with_expiry(now() - Duration::seconds(1));
        assert_eq!(WasteReason::of(&expired_and_empty, now()), Some(WasteReason::Expired));

        // Expiry exactly now is not yet expired.
        let boundary = Item::new("y", 1.0, 1.0, 1.0, "Z").with_expiry(now());
        assert_eq!(WasteReason::of(&boundary, now()), None);
    }

    #[test]
    fn test_identify_waste() {
        let inventory = sample();
        let waste = inventory.identify_waste(now());

        let ids: Vec<&str> = waste.iter().map(|w| w.item_id.as_str()).collect();
        assert_eq!(ids, vec!["old", "used", "heavy"]);

        assert_eq!(waste[0].name, "Old Food");
        assert_eq!(waste[0].reason, WasteReason::Expired);
        assert_eq!(waste[0].container_id, "C1");
        assert_eq!(waste[1].name, "Unknown");
        assert_eq!(waste[1].reason, WasteReason::OutOfUses);
        assert_eq!(waste[1].container_id, NOT_PLACED);
        assert!(waste[1].position.is_zero());
    }

    #[test]
    fn test_plan_return_respects_budget() {
        let mut inventory = sample();
        let request = ReturnRequest::new("U1", now() + Duration::days(7), 10.0);
        let mut sink = MemorySink::new();

        let plan = inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut sink)
            .unwrap();

        // old = 8, used = 1, heavy = 100 (explicit) is over budget.
        let ids: Vec<&str> = plan.return_plan.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(ids, vec!["old", "used"]);
        assert_eq!(plan.return_plan[0].from_container, "C1");
        assert_eq!(plan.return_plan[1].from_container, NOT_PLACED);
        assert_eq!(plan.return_plan[1].step, 2);
        assert_eq!(plan.retrieval_steps[1].item_name.as_deref(), Some("Unknown"));
        assert_relative_eq!(plan.return_manifest.total_weight, 9.0);
        assert_relative_eq!(plan.return_manifest.total_volume, 9.0);

        let relabeled = inventory
            .placements
            .iter()
            .find(|p| p.item_id == "old")
            .unwrap();
        assert_eq!(relabeled.container_id, "U1");
        assert!(relabeled.position.is_zero());

        assert_eq!(sink.events()[0].action_type, ActionType::WasteReturnPlan);
        assert_eq!(sink.events()[0].details.to_container, "U1");
    }

    #[test]
    fn test_plan_return_registers_undocking_container() {
        let mut inventory = sample();
        let request = ReturnRequest::new("U1", now(), 10.0);
        inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .unwrap();

        let undocking = inventory.container("U1").unwrap();
        assert_eq!(undocking.zone, WASTE_ZONE);
        assert!(inventory.validate().is_ok());

        // A second plan reuses it.
        inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .unwrap();
        let count = inventory
            .containers
            .iter()
            .filter(|c| c.container_id == "U1")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_plan_return_keeps_known_container() {
        let mut inventory = sample();
        inventory.containers.push(Container::new("U1", "Airlock", 5.0, 5.0, 5.0));
        let request = ReturnRequest::new("U1", now(), 10.0);
        inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .unwrap();

        assert_eq!(inventory.containers.len(), 2);
        assert_eq!(inventory.container("U1").map(|c| c.zone.as_str()), Some("Airlock"));
    }

    #[test]
    fn test_mass_per_volume_factor() {
        let config = ReturnPlanConfig::new().with_mass_per_volume(0.5);
        let item = Item::new("x", 2.0, 2.0, 2.0, "Z");
        assert_relative_eq!(config.mass_of(&item), 4.0);
        assert_relative_eq!(config.mass_of(&item.with_mass(3.0)), 3.0);
    }

    #[test]
    fn test_plan_return_rejects_bad_request() {
        let mut inventory = sample();
        let request = ReturnRequest::new("", now(), 10.0);
        let err = inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let request = ReturnRequest::new("U1", now(), -1.0);
        assert!(inventory
            .plan_return(now(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .is_err());
    }

    #[test]
    fn test_complete_undocking() {
        let mut inventory = sample();
        inventory.placements.push(placed("U1", "used"));
        inventory.containers.push(Container::new("U1", "Waste", 5.0, 5.0, 5.0));

        let mut sink = MemorySink::new();
        let report = inventory.complete_undocking("U1", "system", &mut sink);

        assert_eq!(report.items_removed, 1);
        assert_eq!(report.placements_removed, 1);
        assert!(inventory.items.iter().all(|i| i.item_id != "used"));
        assert!(inventory.containers.iter().all(|c| c.container_id != "U1"));
        assert_eq!(sink.events()[0].action_type, ActionType::CompleteUndocking);
        assert_eq!(sink.events()[0].details.from_container, "U1");
    }
}
