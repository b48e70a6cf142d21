//! Insertion-ordered placement snapshots keyed by item id.

use crate::geometry::ItemId;
use crate::placement::Placement;

use std::collections::HashMap;

/// Placements of a layout keyed by item id, iterated in insertion order.
///
/// Inserting an id that is already present replaces the stored placement
/// but keeps the slot of the first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementSnapshot {
    entries: Vec<Placement>,
    index: HashMap<ItemId, usize>,
}

impl PlacementSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the placement of `placement.item_id`.
    ///
    /// Returns the replaced placement, if any.
    pub fn insert(&mut self, placement: Placement) -> Option<Placement> {
        match self.index.get(&placement.item_id) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], placement)),
            None => {
                self.index
                    .insert(placement.item_id.clone(), self.entries.len());
                self.entries.push(placement);
                None
            }
        }
    }

    /// Returns the placement of an item.
    pub fn get(&self, item_id: &str) -> Option<&Placement> {
        self.index.get(item_id).map(|&slot| &self.entries[slot])
    }

    /// Returns true if the item is present.
    pub fn contains(&self, item_id: &str) -> bool {
        self.index.contains_key(item_id)
    }

    /// Number of items in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates placements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.entries.iter()
    }

    /// Returns the placements as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Placement] {
        &self.entries
    }

    /// Consumes the snapshot, returning its placements.
    pub fn into_placements(self) -> Vec<Placement> {
        self.entries
    }
}

impl FromIterator<Placement> for PlacementSnapshot {
    fn from_iter<I: IntoIterator<Item = Placement>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for placement in iter {
            snapshot.insert(placement);
        }
        snapshot
    }
}

impl From<Vec<Placement>> for PlacementSnapshot {
    fn from(placements: Vec<Placement>) -> Self {
        placements.into_iter().collect()
    }
}

impl From<&[Placement]> for PlacementSnapshot {
    fn from(placements: &[Placement]) -> Self {
        placements.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a PlacementSnapshot {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
