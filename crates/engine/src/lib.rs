//! # Stowage Engine
//!
//! Spatial allocation algorithms for the stowage engine.
//!
//! This crate picks item orientations against container depth, packs item
//! footprints onto container open faces with a guillotine free-rectangle
//! packer, allocates whole batches zone by zone, and plans retrievals and
//! rearrangements.

pub mod allocator;
pub mod face;
pub mod orientation;
pub mod rearrange;
pub mod retrieval;

// Re-exports
pub use allocator::ZoneAllocator;
pub use face::{FacePacker, FreeRect};
pub use orientation::{feasible_orientations, select_orientation, select_orientation_with, Orientation};
pub use rearrange::{diff, diff_placements};
pub use retrieval::{
    blocking_placements, complete_retrieval, find_target, plan_retrieval, plan_search,
    SearchOutcome, TargetInfo,
};
pub use stowage_core::{
    Allocator, AllocationResult, Config, Container, Error, Item, OrientationPolicy, Placement,
    PlacementSnapshot, RearrangementStep, Result, RetrievalStep,
};
