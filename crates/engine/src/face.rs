//! Guillotine free-rectangle packer for a container's open face.
//!
//! The packer keeps the free space of one face as a list of maximal
//! rectangles. A placement picks the best-fitting rectangle, then every
//! rectangle it touches is split into the strips left around the footprint
//! and rectangles swallowed by another are pruned.
//!
//! Invariants after every placement:
//! - the union of free rectangles is exactly the face minus the placed
//!   footprints;
//! - no free rectangle lies inside another.
//!
//! Split and prune are quadratic in the rectangle count, which stays small
//! because it is bounded by the number of placed items.

use stowage_core::{Container, Rect};

/// A free region of the face.
pub type FreeRect = Rect;

/// Free-space tracker for one container face.
#[derive(Debug, Clone)]
pub struct FacePacker {
    /// Face extents.
    bounds: Rect,
    /// Current free rectangles, in scan order.
    free: Vec<FreeRect>,
    /// Footprints placed or occupied so far.
    placed: Vec<Rect>,
}

impl FacePacker {
    /// Creates a packer for an empty `width` x `height` face.
    pub fn new(width: f64, height: f64) -> Self {
        let bounds = Rect::new(0.0, 0.0, width, height);
        Self {
            bounds,
            free: vec![bounds],
            placed: Vec::new(),
        }
    }

    /// Creates a packer for a container's open face.
    pub fn for_container(container: &Container) -> Self {
        Self::new(container.width, container.height)
    }

    /// Face extents.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Current free rectangles, in scan order.
    pub fn free_rects(&self) -> &[FreeRect] {
        &self.free
    }

    /// Footprints placed so far.
    pub fn placed(&self) -> &[Rect] {
        &self.placed
    }

    /// Total placed footprint area.
    pub fn placed_area(&self) -> f64 {
        self.placed.iter().map(Rect::area).sum()
    }

    /// Finds the best-fitting free rectangle for a footprint.
    ///
    /// Best fit is the smallest leftover area; ties go to the first
    /// rectangle in scan order.
    pub fn find_position(&self, width: f64, height: f64) -> Option<(f64, f64)> {
        let needed = width * height;
        let mut best: Option<(&FreeRect, f64)> = None;

        for rect in &self.free {
            if !rect.can_hold(width, height) {
                continue;
            }
            let leftover = rect.area() - needed;
            match best {
                Some((_, score)) if leftover >= score => {}
                _ => best = Some((rect, leftover)),
            }
        }

        best.map(|(rect, _)| (rect.x, rect.y))
    }

    /// Places a `width` x `height` footprint at the best-fitting position.
    ///
    /// Returns the anchor `(x, y)`, or `None` if no free rectangle can hold
    /// the footprint. A `None` leaves the packer untouched.
    pub fn place(&mut self, width: f64, height: f64) -> Option<(f64, f64)> {
        let (x, y) = self.find_position(width, height)?;
        self.commit(Rect::new(x, y, width, height));
        Some((x, y))
    }

    /// Marks an already-placed footprint as occupied.
    ///
    /// Used to rebuild a face from persisted placements; no fit check is
    /// made, only the parts of the footprint inside free space are taken.
    pub fn occupy(&mut self, footprint: Rect) {
        if footprint.width <= 0.0 || footprint.height <= 0.0 {
            return;
        }
        self.commit(footprint);
    }

    fn commit(&mut self, footprint: Rect) {
        let mut next = Vec::with_capacity(self.free.len() + 3);
        for rect in &self.free {
            split_free_rect(rect, &footprint, &mut next);
        }
        self.free = prune_contained(next);
        self.placed.push(footprint);
    }
}

/// Replaces `free` by the strips left around `used`.
///
/// A rectangle that does not intersect `used` is kept as is; otherwise the
/// left, right, top and bottom strips of positive area are emitted.
pub fn split_free_rect(free: &FreeRect, used: &Rect, out: &mut Vec<FreeRect>) {
    let Some(hit) = free.intersection(used) else {
        out.push(*free);
        return;
    };

    let strips = [
        // Left, full height.
        Rect::new(free.x, free.y, hit.x - free.x, free.height),
        // Right, full height.
        Rect::new(hit.right(), free.y, free.right() - hit.right(), free.height),
        // Top, full width.
        Rect::new(free.x, hit.top(), free.width, free.top() - hit.top()),
        // Bottom, full width.
        Rect::new(free.x, free.y, free.width, hit.y - free.y),
    ];

    out.extend(
        strips
            .into_iter()
            .filter(|r| r.width > 0.0 && r.height > 0.0),
    );
}

/// Drops every rectangle contained in another one.
///
/// Of two identical rectangles only the first survives.
pub fn prune_contained(rects: Vec<FreeRect>) -> Vec<FreeRect> {
    let mut kept = Vec::with_capacity(rects.len());

    for (i, r) in rects.iter().enumerate() {
        let redundant = rects.iter().enumerate().any(|(j, other)| {
            i != j && other.contains(r) && (other != r || j < i)
        });
        if !redundant {
            kept.push(*r);
        }
    }

    kept
}
