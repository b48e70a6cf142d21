//! # Stowage Core
//!
//! Core types and abstractions for the stowage spatial allocation engine.
//!
//! This crate provides the data model shared by the engine, the inventory
//! helpers and the command-line front end.
//!
//! ## Core Components
//!
//! - **Descriptors**: `Item`, `Container`, `Dimensions`
//! - **Layout records**: `Placement`, `Position`, `Coordinates`, `PlacementSnapshot`
//! - **Steps**: `RearrangementStep`, `RetrievalStep`, `Action`
//! - **Allocator trait**: Common interface for allocation strategies
//! - **Observability**: `ActionSink` and the events recorded into it
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support (camelCase wire shapes)

pub mod allocator;
pub mod config;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod rect;
pub mod result;
pub mod sink;
pub mod snapshot;
pub mod step;
pub mod time;

// Re-exports
pub use allocator::Allocator;
pub use config::{Config, OrientationPolicy};
pub use error::{Error, Result};
pub use geometry::{Container, ContainerId, Dimensions, Item, ItemId};
pub use placement::{Coordinates, Placement, PlacementStats, Position};
pub use rect::Rect;
pub use result::{AllocationResult, AllocationSummary, ZoneStats};
pub use sink::{
    ActionEvent, ActionSink, ActionType, EventDetails, EventFilter, LogSink, MemorySink, NullSink,
};
pub use snapshot::PlacementSnapshot;
pub use step::{Action, RearrangementStep, RetrievalStep, NO_CONTAINER};
pub use time::{parse_instant, Instant};
