//! # Stowage
//!
//! Spatial allocation for zoned storage containers.
//!
//! Items are stowed on the open face of bounded rectangular containers:
//! each item is turned so that it fits the container's depth with the
//! smallest footprint, footprints are packed onto the face with a
//! guillotine free-rectangle packer, and whole batches are allocated zone
//! by zone in priority order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stowage::{Allocator, Container, Item, NullSink, ZoneAllocator};
//!
//! let containers = vec![Container::new("C", "Lab", 100.0, 100.0, 50.0)];
//! let items = vec![Item::new("A", 30.0, 40.0, 20.0, "Lab").with_priority(5)];
//!
//! let result = ZoneAllocator::default_config().allocate(&items, &containers, &mut NullSink)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `engine` (default): allocation, retrieval and rearrangement planning
//! - `inventory` (default): waste handling, usage simulation, CSV export
//! - `serde`: Serialization support

/// Core data model and abstractions.
pub use stowage_core as core;

/// Allocation and planning algorithms.
#[cfg(feature = "engine")]
pub use stowage_engine as engine;

/// Inventory-level operations.
#[cfg(feature = "inventory")]
pub use stowage_inventory as inventory;

// Re-export commonly used types at root level
pub use stowage_core::{
    ActionEvent, ActionSink, Allocator, AllocationResult, Config, Container, Error, Item,
    MemorySink, NullSink, Placement, PlacementSnapshot, Result,
};

#[cfg(feature = "engine")]
pub use stowage_engine::{diff, plan_retrieval, plan_search, ZoneAllocator};
