//! Property-based tests for face packing, allocation and diffs.
//!
//! Run with: cargo test -p stowage-engine -- proptest

use proptest::prelude::*;
use stowage_core::{Action, Allocator, Container, Item, NullSink, Placement, Position, Rect};
use stowage_engine::{diff_placements, select_orientation, FacePacker, ZoneAllocator};

// =============================================================================
// Strategies
// =============================================================================

/// Integer-valued face extents so that every split edge stays on the grid.
fn arb_face() -> impl Strategy<Value = (u32, u32)> {
    (4u32..=24, 4u32..=24)
}

fn arb_rects(max: usize) -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=12, 1u32..=12), 1..=max)
}

fn arb_items(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((1u32..=30, 1u32..=30, 1u32..=30, 0i64..5, 0usize..2), 1..=max).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (w, h, d, priority, zone))| {
                    Item::new(
                        format!("I{:03}", i),
                        w as f64,
                        h as f64,
                        d as f64,
                        format!("Z{}", zone),
                    )
                    .with_priority(priority)
                })
                .collect()
        },
    )
}

fn arb_layout(max: usize) -> impl Strategy<Value = Vec<Placement>> {
    prop::collection::vec((0u32..3, 0u32..50, 1u32..10), 0..=max).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (c, x, w))| {
                Placement::new(
                    format!("C{}", c),
                    format!("I{}", i),
                    Position::on_open_face(&Rect::new(x as f64, 0.0, w as f64, 5.0), 5.0),
                )
            })
            .collect()
    })
}

fn containers() -> Vec<Container> {
    vec![
        Container::new("A", "Z0", 40.0, 30.0, 20.0),
        Container::new("B", "Z0", 25.0, 25.0, 30.0),
        Container::new("C", "Z1", 50.0, 20.0, 25.0),
    ]
}

fn point_in(rect: &Rect, x: f64, y: f64) -> bool {
    x > rect.x && x < rect.right() && y > rect.y && y < rect.top()
}

// =============================================================================
// Face packer invariants
// =============================================================================

proptest! {
    /// Every unit cell of the face is covered by exactly one placed footprint
    /// or by free space, never both and never neither.
    #[test]
    fn proptest_free_space_and_footprints_tile_face(face in arb_face(), rects in arb_rects(20)) {
        let (fw, fh) = face;
        let mut packer = FacePacker::new(fw as f64, fh as f64);

        for (w, h) in rects {
            packer.place(w as f64, h as f64);

            for i in 0..fw {
                for j in 0..fh {
                    let (cx, cy) = (i as f64 + 0.5, j as f64 + 0.5);
                    let placed = packer.placed().iter().filter(|r| point_in(r, cx, cy)).count();
                    let free = packer.free_rects().iter().any(|r| point_in(r, cx, cy));

                    prop_assert!(placed <= 1, "cell ({}, {}) covered {} times", i, j, placed);
                    prop_assert!(
                        (placed == 1) != free,
                        "cell ({}, {}) placed={} free={}", i, j, placed, free
                    );
                }
            }
        }
    }

    /// The pruned free set never holds a rectangle inside another.
    #[test]
    fn proptest_no_contained_free_rects(face in arb_face(), rects in arb_rects(20)) {
        let mut packer = FacePacker::new(face.0 as f64, face.1 as f64);

        for (w, h) in rects {
            packer.place(w as f64, h as f64);

            let free = packer.free_rects();
            for (i, a) in free.iter().enumerate() {
                for (j, b) in free.iter().enumerate() {
                    if i != j {
                        prop_assert!(!b.contains(a), "{:?} inside {:?}", a, b);
                    }
                }
            }
        }
    }

    /// Placed footprints stay within the face.
    #[test]
    fn proptest_footprints_within_bounds(face in arb_face(), rects in arb_rects(20)) {
        let mut packer = FacePacker::new(face.0 as f64, face.1 as f64);
        for (w, h) in rects {
            packer.place(w as f64, h as f64);
        }

        let bounds = packer.bounds();
        for r in packer.placed() {
            prop_assert!(bounds.contains(r));
        }
    }
}

// =============================================================================
// Allocation properties
// =============================================================================

proptest! {
    /// Same input, same placements.
    #[test]
    fn proptest_allocate_is_deterministic(items in arb_items(25)) {
        let allocator = ZoneAllocator::default_config();
        let first = allocator.allocate(&items, &containers(), &mut NullSink).unwrap();
        let second = allocator.allocate(&items, &containers(), &mut NullSink).unwrap();

        prop_assert_eq!(first.placements, second.placements);
        prop_assert_eq!(first.unplaced, second.unplaced);
    }

    /// Every item ends up either placed once or reported unplaced.
    #[test]
    fn proptest_every_item_accounted_for(items in arb_items(25)) {
        let result = ZoneAllocator::default_config()
            .allocate(&items, &containers(), &mut NullSink)
            .unwrap();

        prop_assert_eq!(result.placements.len() + result.unplaced.len(), items.len());
        for item in &items {
            let placed = result.placements.iter().filter(|p| p.item_id == item.item_id).count();
            let unplaced = result.unplaced.iter().filter(|id| **id == item.item_id).count();
            prop_assert_eq!(placed + unplaced, 1);
        }
    }

    /// An item promoted above every other one is placed whenever it fits an
    /// empty container of its zone.
    #[test]
    fn proptest_promoted_item_is_placed(items in arb_items(25), pick in any::<prop::sample::Index>()) {
        let mut items = items;
        let idx = pick.index(items.len());
        items[idx].priority = 100;
        let promoted = items[idx].clone();

        let fits_alone = containers().iter().any(|c| {
            c.zone == promoted.preferred_zone
                && select_orientation(&promoted.dimensions(), c.depth)
                    .map_or(false, |o| o.footprint_width <= c.width && o.footprint_height <= c.height)
        });

        let result = ZoneAllocator::default_config()
            .allocate(&items, &containers(), &mut NullSink)
            .unwrap();
        let placed = result.placements.iter().any(|p| p.item_id == promoted.item_id);

        prop_assert_eq!(placed, fits_alone);
    }

    /// Placements inside one container never overlap and stay on the open face.
    #[test]
    fn proptest_no_overlap_within_container(items in arb_items(25)) {
        let result = ZoneAllocator::default_config()
            .allocate(&items, &containers(), &mut NullSink)
            .unwrap();

        for (i, a) in result.placements.iter().enumerate() {
            prop_assert!(a.is_on_open_face());
            for b in &result.placements[i + 1..] {
                if a.container_id == b.container_id {
                    prop_assert!(!a.footprint().overlaps(&b.footprint()));
                }
            }
        }
    }
}

// =============================================================================
// Diff laws
// =============================================================================

proptest! {
    #[test]
    fn proptest_diff_identity_is_empty(layout in arb_layout(20)) {
        prop_assert!(diff_placements(&layout, &layout).is_empty());
    }

    #[test]
    fn proptest_diff_from_empty_places_in_order(layout in arb_layout(20)) {
        let steps = diff_placements(&[], &layout);

        prop_assert_eq!(steps.len(), layout.len());
        for (i, (step, p)) in steps.iter().zip(&layout).enumerate() {
            prop_assert_eq!(step.step as usize, i + 1);
            prop_assert_eq!(step.action, Action::Place);
            prop_assert_eq!(&step.item_id, &p.item_id);
        }
    }

    #[test]
    fn proptest_diff_to_empty_removes_in_order(layout in arb_layout(20)) {
        let steps = diff_placements(&layout, &[]);

        prop_assert_eq!(steps.len(), layout.len());
        for (step, p) in steps.iter().zip(&layout) {
            prop_assert_eq!(step.action, Action::Remove);
            prop_assert_eq!(&step.item_id, &p.item_id);
            prop_assert_eq!(step.from_container.as_deref(), Some(p.container_id.as_str()));
        }
    }
}
