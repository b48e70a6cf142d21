//! Day-by-day usage simulation.

use std::collections::HashMap;

use chrono::Duration;
use stowage_core::{Error, Instant, Item, ItemId, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How far to advance the simulated clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advance {
    /// A fixed number of days.
    Days(u32),
    /// Whole days up to the given instant.
    Until(Instant),
}

impl Advance {
    /// Number of whole days to simulate from `start`.
    pub fn days_from(&self, start: Instant) -> Result<u32> {
        match *self {
            Advance::Days(n) => Ok(n),
            Advance::Until(target) if target < start => Err(Error::ConfigError(format!(
                "target {} is before the current date {}",
                stowage_core::time::format_instant(&target),
                stowage_core::time::format_instant(&start)
            ))),
            Advance::Until(target) => u32::try_from((target - start).num_days())
                .map_err(|_| Error::ConfigError("simulation span is too long".into())),
        }
    }
}

/// An item used once per simulated day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UsageEntry {
    /// Used item.
    pub item_id: ItemId,
    /// Name reported in changes instead of the catalog name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
}

impl UsageEntry {
    /// Creates an entry for `item_id`.
    pub fn new(item_id: impl Into<ItemId>) -> Self {
        Self {
            item_id: item_id.into(),
            name: None,
        }
    }

    /// Sets the reported name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A used item and what it has left.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct UsedItem {
    /// Used item.
    pub item_id: ItemId,
    /// Reported name.
    pub name: String,
    /// Uses left after the latest simulated day.
    pub remaining_uses: u32,
}

/// An item that expired or ran out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ItemChange {
    /// Affected item.
    pub item_id: ItemId,
    /// Reported name.
    pub name: String,
}

/// Changes collected over a simulation, one entry per item per list.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationChanges {
    /// Items that spent at least one use.
    pub items_used: Vec<UsedItem>,
    /// Items found expired when due for use.
    pub items_expired: Vec<ItemChange>,
    /// Items whose last use was spent.
    pub items_depleted_today: Vec<ItemChange>,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationOutcome {
    /// Clock after the last simulated day.
    #[cfg_attr(feature = "serde", serde(with = "stowage_core::time::serde_instant"))]
    pub new_date: Instant,
    /// Days simulated.
    pub days_simulated: u32,
    /// Collected changes.
    pub changes: SimulationChanges,
}

/// Keeps the first-seen slot of each item and its latest value.
struct Ledger<T> {
    entries: Vec<T>,
    slots: HashMap<ItemId, usize>,
}

impl<T> Ledger<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    fn record(&mut self, item_id: &str, value: T) {
        match self.slots.get(item_id) {
            Some(&slot) => self.entries[slot] = value,
            None => {
                self.slots.insert(item_id.to_string(), self.entries.len());
                self.entries.push(value);
            }
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.entries
    }
}

/// Advances the clock day by day, spending one use of each listed item per
/// day.
///
/// Each day first moves the date forward, then visits the usage entries in
/// order: an item whose expiry is at or before the date is recorded as
/// expired; otherwise an item with uses left spends one, and is recorded as
/// depleted when that was its last. Entries naming unknown items are
/// skipped.
pub fn simulate_days(
    items: &mut [Item],
    usage: &[UsageEntry],
    start: Instant,
    advance: Advance,
) -> Result<SimulationOutcome> {
    let days = advance.days_from(start)?;

    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.item_id.as_str(), i))
        .collect();
    let targets: Vec<(usize, &UsageEntry)> = usage
        .iter()
        .filter_map(|entry| match index.get(entry.item_id.as_str()) {
            Some(&idx) => Some((idx, entry)),
            None => {
                log::warn!("Usage entry for unknown item '{}' ignored", entry.item_id);
                None
            }
        })
        .collect();

    let mut used = Ledger::new();
    let mut expired = Ledger::new();
    let mut depleted = Ledger::new();
    let mut now = start;

    for _ in 0..days {
        now += Duration::days(1);

        for &(idx, entry) in &targets {
            let item = &mut items[idx];
            let name = entry
                .name
                .clone()
                .unwrap_or_else(|| item.display_name().to_string());

            if item.expiry_date.is_some_and(|expiry| now >= expiry) {
                expired.record(
                    &entry.item_id,
                    ItemChange {
                        item_id: entry.item_id.clone(),
                        name,
                    },
                );
            } else if item.usage_limit > 0 {
                item.usage_limit -= 1;
                used.record(
                    &entry.item_id,
                    UsedItem {
                        item_id: entry.item_id.clone(),
                        name: name.clone(),
                        remaining_uses: item.usage_limit,
                    },
                );
                if item.usage_limit == 0 {
                    depleted.record(
                        &entry.item_id,
                        ItemChange {
                            item_id: entry.item_id.clone(),
                            name,
                        },
                    );
                }
            }
        }
    }

    let changes = SimulationChanges {
        items_used: used.into_vec(),
        items_expired: expired.into_vec(),
        items_depleted_today: depleted.into_vec(),
    };
    log::info!(
        "Simulated {} days: {} used, {} expired, {} depleted",
        days,
        changes.items_used.len(),
        changes.items_expired.len(),
        changes.items_depleted_today.len()
    );

    Ok(SimulationOutcome {
        new_date: now,
        days_simulated: days,
        changes,
    })
}
