//! Allocator trait.

use crate::geometry::{Container, Item};
use crate::placement::Placement;
use crate::result::AllocationResult;
use crate::sink::ActionSink;
use crate::Result;

/// Assigns a batch of items to containers.
///
/// Implementations hold configuration only; all packing state lives for the
/// duration of one call. Callers serialize concurrent allocations that
/// target the same containers.
pub trait Allocator {
    /// Allocates `items` into empty `containers`.
    fn allocate(
        &self,
        items: &[Item],
        containers: &[Container],
        sink: &mut dyn ActionSink,
    ) -> Result<AllocationResult> {
        self.allocate_with_existing(items, containers, &[], sink)
    }

    /// Allocates `items` into the space `existing` placements leave free.
    fn allocate_with_existing(
        &self,
        items: &[Item],
        containers: &[Container],
        existing: &[Placement],
        sink: &mut dyn ActionSink,
    ) -> Result<AllocationResult>;
}
