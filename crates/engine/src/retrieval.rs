//! Retrieval planning.
//!
//! Only items touching the open face (depth-start 0) can be taken out
//! directly. A deeper item is reached by setting aside every front-row item
//! whose footprint overlaps it.

use stowage_core::{
    ActionEvent, ActionSink, ActionType, Container, ContainerId, Error, Item, ItemId, Placement,
    Position, Result, RetrievalStep,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Front-row placements that block access to `target`, in scan order.
///
/// A placement blocks when it sits in the same container, is a different
/// item, starts at depth 0 and strictly overlaps the target's footprint.
pub fn blocking_placements<'a>(target: &Placement, placements: &'a [Placement]) -> Vec<&'a Placement> {
    let footprint = target.footprint();
    placements
        .iter()
        .filter(|p| {
            p.container_id == target.container_id
                && p.item_id != target.item_id
                && p.position.start_coordinates.depth == 0.0
                && p.footprint().overlaps(&footprint)
        })
        .collect()
}

/// Plans the steps needed to take `target` out of its container.
///
/// Steps are numbered from 1. A target on the open face needs a single
/// retrieve step; otherwise each blocker is set aside first.
pub fn plan_retrieval(target: &Placement, placements: &[Placement]) -> Vec<RetrievalStep> {
    if target.is_on_open_face() {
        return vec![RetrievalStep::retrieve(1, target.item_id.clone())];
    }

    let mut steps: Vec<RetrievalStep> = blocking_placements(target, placements)
        .into_iter()
        .zip(1..)
        .map(|(blocker, step)| RetrievalStep::set_aside(step, blocker.item_id.clone()))
        .collect();

    let last = steps.len() as u32 + 1;
    steps.push(RetrievalStep::retrieve(last, target.item_id.clone()));
    steps
}

/// Resolves a query to a placement: by item id first, then by item name
/// through the item catalog.
pub fn find_target<'a>(
    query: &str,
    placements: &'a [Placement],
    items: &[Item],
) -> Result<&'a Placement> {
    if let Some(p) = placements.iter().find(|p| p.item_id == query) {
        return Ok(p);
    }

    items
        .iter()
        .filter(|item| item.name.as_deref() == Some(query))
        .find_map(|item| placements.iter().find(|p| p.item_id == item.item_id))
        .ok_or_else(|| Error::PlacementNotFound(query.to_string()))
}

/// Where a found item lives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TargetInfo {
    /// Found item.
    pub item_id: ItemId,
    /// Display name, `"Unknown"` without a catalog entry.
    pub name: String,
    /// Holding container.
    pub container_id: ContainerId,
    /// Zone of the holding container.
    pub zone: String,
    /// Occupied box.
    pub position: Position,
}

/// Result of a search.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SearchOutcome {
    /// Whether a placement matched the query.
    pub found: bool,
    /// The matched item, if any.
    pub item: Option<TargetInfo>,
    /// Steps to take the item out; empty when not found.
    pub retrieval_steps: Vec<RetrievalStep>,
}

fn display_name(item_id: &str, items: &[Item]) -> String {
    items
        .iter()
        .find(|item| item.item_id == item_id)
        .map(|item| item.display_name().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Zone of a container: from the container list when known, else the
/// two-character prefix of its id.
fn zone_of(container_id: &str, containers: &[Container]) -> String {
    if let Some(c) = containers.iter().find(|c| c.container_id == container_id) {
        return c.zone.clone();
    }
    match container_id.char_indices().nth(2) {
        Some((end, _)) => container_id[..end].to_string(),
        None if container_id.chars().count() == 2 => container_id.to_string(),
        None => "Unknown".to_string(),
    }
}

/// Looks up an item and plans its retrieval.
///
/// Records one `SEARCH_ITEM` event whether or not the item was found.
pub fn plan_search(
    query: &str,
    placements: &[Placement],
    items: &[Item],
    containers: &[Container],
    user_id: &str,
    sink: &mut dyn ActionSink,
) -> SearchOutcome {
    let target = match find_target(query, placements, items) {
        Ok(target) => target,
        Err(_) => {
            log::debug!("Search for '{}' found nothing", query);
            sink.record(ActionEvent::new(
                user_id,
                ActionType::SearchItem,
                query,
                "N/A",
                "N/A",
                "Item not found during search",
            ));
            return SearchOutcome::default();
        }
    };

    let retrieval_steps = plan_retrieval(target, placements)
        .into_iter()
        .map(|step| {
            let name = display_name(&step.item_id, items);
            step.with_item_name(name)
        })
        .collect();

    let info = TargetInfo {
        item_id: target.item_id.clone(),
        name: display_name(&target.item_id, items),
        container_id: target.container_id.clone(),
        zone: zone_of(&target.container_id, containers),
        position: target.position,
    };

    sink.record(ActionEvent::new(
        user_id,
        ActionType::SearchItem,
        query,
        "N/A",
        "N/A",
        "Item found during search",
    ));

    SearchOutcome {
        found: true,
        item: Some(info),
        retrieval_steps,
    }
}

/// Takes an item out: drops its placement and spends one use.
///
/// Returns the removed placement, or `Error::PlacementNotFound`.
pub fn complete_retrieval(
    item_id: &str,
    placements: &mut Vec<Placement>,
    items: &mut [Item],
    user_id: &str,
    sink: &mut dyn ActionSink,
) -> Result<Placement> {
    let idx = placements
        .iter()
        .position(|p| p.item_id == item_id)
        .ok_or_else(|| Error::PlacementNotFound(item_id.to_string()))?;
    let removed = placements.remove(idx);

    if let Some(item) = items.iter_mut().find(|item| item.item_id == item_id) {
        item.usage_limit = item.usage_limit.saturating_sub(1);
    }

    log::debug!("Retrieved '{}' from '{}'", item_id, removed.container_id);
    sink.record(ActionEvent::new(
        user_id,
        ActionType::ItemRetrieval,
        item_id,
        removed.container_id.clone(),
        "Retrieved",
        "Item retrieved",
    ));

    Ok(removed)
}
