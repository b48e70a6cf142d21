//! # Stowage Inventory
//!
//! Inventory-level operations built on the stowage data model.
//!
//! ## Core Components
//!
//! - **Inventory**: items, containers and the current layout together
//! - **Waste**: expired and used-up items, weight-bounded return plans, undocking
//! - **Simulation**: day-by-day usage with expiry and depletion tracking
//! - **Export**: the arrangement as CSV

pub mod export;
pub mod inventory;
pub mod simulate;
pub mod waste;

// Re-exports
pub use export::{arrangement_csv, export_arrangement_file, write_arrangement_csv, ARRANGEMENT_HEADER};
pub use inventory::Inventory;
pub use simulate::{
    simulate_days, Advance, ItemChange, SimulationChanges, SimulationOutcome, UsageEntry, UsedItem,
};
pub use stowage_core::{Error, Result};
pub use waste::{
    identify_waste, ReturnItem, ReturnManifest, ReturnPlan, ReturnPlanConfig, ReturnRequest,
    ReturnStep, UndockingReport, WasteItem, WasteReason, NOT_PLACED, WASTE_ZONE,
};
