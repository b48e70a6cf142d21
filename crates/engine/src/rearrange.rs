//! Rearrangement plans between two layouts.

use stowage_core::{Action, Placement, PlacementSnapshot, Position, RearrangementStep};

/// Computes the steps that turn layout `old` into layout `new`.
///
/// Items of `new` are visited first, in order: new items are placed, items
/// whose container or position changed are moved. Items of `old` missing
/// from `new` are then removed, in `old` order. Positions compare exactly.
pub fn diff(old: &PlacementSnapshot, new: &PlacementSnapshot) -> Vec<RearrangementStep> {
    let mut steps = Vec::new();
    let mut next = 1u32;
    let mut push = |steps: &mut Vec<RearrangementStep>, mut step: RearrangementStep| {
        step.step = next;
        next += 1;
        steps.push(step);
    };

    for target in new {
        match old.get(&target.item_id) {
            None => push(&mut steps, place_step(target)),
            Some(source)
                if source.container_id != target.container_id
                    || source.position != target.position =>
            {
                push(&mut steps, move_step(source, target))
            }
            Some(_) => {}
        }
    }

    for source in old {
        if !new.contains(&source.item_id) {
            push(&mut steps, remove_step(source));
        }
    }

    log::debug!(
        "Rearrangement of {} -> {} placements takes {} steps",
        old.len(),
        new.len(),
        steps.len()
    );
    steps
}

/// Like [`diff`] over plain placement lists.
///
/// A repeated item id keeps its first slot and its last value.
pub fn diff_placements(old: &[Placement], new: &[Placement]) -> Vec<RearrangementStep> {
    diff(&PlacementSnapshot::from(old), &PlacementSnapshot::from(new))
}

fn place_step(target: &Placement) -> RearrangementStep {
    RearrangementStep {
        step: 0,
        action: Action::Place,
        item_id: target.item_id.clone(),
        from_container: None,
        from_position: Position::zero(),
        to_container: Some(target.container_id.clone()),
        to_position: target.position,
    }
}

fn move_step(source: &Placement, target: &Placement) -> RearrangementStep {
    RearrangementStep {
        step: 0,
        action: Action::Move,
        item_id: target.item_id.clone(),
        from_container: Some(source.container_id.clone()),
        from_position: source.position,
        to_container: Some(target.container_id.clone()),
        to_position: target.position,
    }
}

fn remove_step(source: &Placement) -> RearrangementStep {
    RearrangementStep {
        step: 0,
        action: Action::Remove,
        item_id: source.item_id.clone(),
        from_container: Some(source.container_id.clone()),
        from_position: source.position,
        to_container: None,
        to_position: Position::zero(),
    }
}
