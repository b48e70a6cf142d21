//! Observability events and the sink they are recorded into.
//!
//! Operations take a `&mut dyn ActionSink` instead of writing to a shared
//! log buffer. A sink that drops or fails to persist an event never stops
//! the operation that emitted it.

use crate::error::{Error, Result};
use crate::geometry::{ContainerId, ItemId};
use crate::time::{self, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of recorded action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ActionType {
    /// The allocator committed a placement.
    NewPlacement,
    /// An item was taken out for use.
    ItemRetrieval,
    /// A lookup by id or name was answered.
    SearchItem,
    /// Waste candidates were listed.
    IdentifyWaste,
    /// A waste return plan was produced.
    WasteReturnPlan,
    /// An undocking container was emptied and removed.
    CompleteUndocking,
}

impl ActionType {
    /// Every action type, in declaration order.
    pub const ALL: [ActionType; 6] = [
        ActionType::NewPlacement,
        ActionType::ItemRetrieval,
        ActionType::SearchItem,
        ActionType::IdentifyWaste,
        ActionType::WasteReturnPlan,
        ActionType::CompleteUndocking,
    ];

    /// Wire name, e.g. `NEW_PLACEMENT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::NewPlacement => "NEW_PLACEMENT",
            ActionType::ItemRetrieval => "ITEM_RETRIEVAL",
            ActionType::SearchItem => "SEARCH_ITEM",
            ActionType::IdentifyWaste => "IDENTIFY_WASTE",
            ActionType::WasteReturnPlan => "WASTE_RETURN_PLAN",
            ActionType::CompleteUndocking => "COMPLETE_UNDOCKING",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionType {
    type Err = Error;

    /// Parses a wire name, ignoring ASCII case.
    fn from_str(text: &str) -> Result<Self> {
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| Error::ConfigError(format!("unknown action type '{}'", text)))
    }
}

/// Movement details of an event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EventDetails {
    /// Where the item came from (`"NONE"` for new placements).
    pub from_container: ContainerId,
    /// Where the item went.
    pub to_container: ContainerId,
    /// Free-form reason.
    pub reason: String,
}

/// A single recorded action.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ActionEvent {
    /// When the event was emitted.
    #[cfg_attr(feature = "serde", serde(with = "crate::time::serde_instant"))]
    pub timestamp: Instant,
    /// Acting user, `"system"` for engine decisions.
    pub user_id: String,
    /// What happened.
    pub action_type: ActionType,
    /// Affected item (empty for batch-level events).
    pub item_id: ItemId,
    /// Movement details.
    pub details: EventDetails,
}

impl ActionEvent {
    /// Creates an event stamped with the current time.
    pub fn new(
        user_id: impl Into<String>,
        action_type: ActionType,
        item_id: impl Into<ItemId>,
        from_container: impl Into<ContainerId>,
        to_container: impl Into<ContainerId>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: time::now(),
            user_id: user_id.into(),
            action_type,
            item_id: item_id.into(),
            details: EventDetails {
                from_container: from_container.into(),
                to_container: to_container.into(),
                reason: reason.into(),
            },
        }
    }

    /// Overrides the timestamp.
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Receiver of observability events.
pub trait ActionSink {
    /// Records one event.
    fn record(&mut self, event: ActionEvent);
}

impl<F: FnMut(ActionEvent)> ActionSink for F {
    fn record(&mut self, event: ActionEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ActionSink for NullSink {
    fn record(&mut self, _event: ActionEvent) {}
}

/// Forwards events to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ActionSink for LogSink {
    fn record(&mut self, event: ActionEvent) {
        log::info!(
            "{:?} by {}: item '{}' {} -> {} ({})",
            event.action_type,
            event.user_id,
            event.item_id,
            event.details.from_container,
            event.details.to_container,
            event.details.reason
        );
    }
}

/// Collects events in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<ActionEvent>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events.
    pub fn events(&self) -> &[ActionEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes the recorded events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<ActionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ActionSink for MemorySink {
    fn record(&mut self, event: ActionEvent) {
        self.events.push(event);
    }
}

/// Selection criteria over recorded events; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Inclusive lower bound on the timestamp.
    pub start: Option<Instant>,
    /// Inclusive upper bound on the timestamp.
    pub end: Option<Instant>,
    /// Exact item id.
    pub item_id: Option<ItemId>,
    /// Exact user id.
    pub user_id: Option<String>,
    /// Exact action type.
    pub action_type: Option<ActionType>,
}

impl EventFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to events at or after `start`.
    pub fn since(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Restricts to events at or before `end`.
    pub fn until(mut self, end: Instant) -> Self {
        self.end = Some(end);
        self
    }

    /// Restricts to one item.
    pub fn with_item(mut self, item_id: impl Into<ItemId>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// Restricts to one user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Restricts to one action type.
    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    /// Returns true if the event passes every set criterion.
    pub fn matches(&self, event: &ActionEvent) -> bool {
        self.start.map_or(true, |s| event.timestamp >= s)
            && self.end.map_or(true, |e| event.timestamp <= e)
            && self.item_id.as_ref().map_or(true, |id| &event.item_id == id)
            && self.user_id.as_ref().map_or(true, |u| &event.user_id == u)
            && self.action_type.map_or(true, |t| event.action_type == t)
    }

    /// Returns the matching events, in recording order.
    pub fn apply<'a>(&self, events: &'a [ActionEvent]) -> Vec<&'a ActionEvent> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_instant;

    fn event(item: &str, user: &str, kind: ActionType, at: &str) -> ActionEvent {
        ActionEvent::new(user, kind, item, "NONE", "C1", "test").at(parse_instant(at).unwrap())
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let mut sink = MemorySink::new();
        sink.record(event("a", "system", ActionType::NewPlacement, "2025-01-01"));
        sink.record(event("b", "system", ActionType::NewPlacement, "2025-01-02"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events()[1].item_id, "b");

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: ActionEvent| seen.push(e.item_id);
            sink.record(event("x", "system", ActionType::SearchItem, "2025-01-01"));
        }
        assert_eq!(seen, vec!["x".to_string()]);
    }

    #[test]
    fn test_filter() {
        let events = vec![
            event("a", "system", ActionType::NewPlacement, "2025-01-01"),
            event("a", "crew", ActionType::ItemRetrieval, "2025-01-05"),
            event("b", "system", ActionType::NewPlacement, "2025-01-10"),
        ];

        let by_item = EventFilter::new().with_item("a").apply(&events);
        assert_eq!(by_item.len(), 2);

        let by_type = EventFilter::new()
            .with_action_type(ActionType::NewPlacement)
            .apply(&events);
        assert_eq!(by_type.len(), 2);

        let window = EventFilter::new()
            .since(parse_instant("2025-01-02").unwrap())
            .until(parse_instant("2025-01-10").unwrap())
            .with_user("system")
            .apply(&events);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].item_id, "b");
    }

    #[test]
    fn test_action_type_names() {
        for kind in ActionType::ALL {
            assert_eq!(kind.as_str().parse::<ActionType>().unwrap(), kind);
        }
        assert_eq!(
            "complete_undocking".parse::<ActionType>().unwrap(),
            ActionType::CompleteUndocking
        );
        assert!("MOVE".parse::<ActionType>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_event_wire_shape() {
        let e = event("a", "system", ActionType::NewPlacement, "2025-01-01");
        let value = serde_json::to_value(&e).unwrap();

        assert_eq!(value["actionType"], "NEW_PLACEMENT");
        assert_eq!(value["userId"], "system");
        assert_eq!(value["details"]["fromContainer"], "NONE");
        assert_eq!(value["timestamp"], "2025-01-01T00:00:00Z");
    }
}
