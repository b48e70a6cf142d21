//! Integration tests for stowage-inventory.

use chrono::{Duration, TimeZone, Utc};
use stowage_core::{Instant, Item, MemorySink, NullSink, Placement, Position, Rect};
use stowage_inventory::{
    arrangement_csv, simulate_days, Advance, Inventory, ReturnPlanConfig, ReturnRequest,
    UsageEntry, WasteReason,
};

fn day0() -> Instant {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
}

fn front(container: &str, item: &str, x: f64) -> Placement {
    Placement::new(
        container,
        item,
        Position::on_open_face(&Rect::new(x, 0.0, 10.0, 10.0), 10.0),
    )
}

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_simulation_feeds_waste_and_undocking() {
        let mut inventory = Inventory::new(
            vec![
                Item::new("food", 10.0, 10.0, 10.0, "Galley")
                    .with_usage_limit(2)
                    .with_mass(3.0),
                Item::new("tool", 10.0, 10.0, 10.0, "Galley").with_usage_limit(50),
            ],
            Vec::new(),
            vec![front("G1", "food", 0.0), front("G1", "tool", 10.0)],
        );

        let usage = vec![UsageEntry::new("food"), UsageEntry::new("tool")];
        let outcome =
            simulate_days(&mut inventory.items, &usage, day0(), Advance::Days(2)).unwrap();
        assert_eq!(outcome.changes.items_depleted_today.len(), 1);

        let waste = inventory.identify_waste(outcome.new_date);
        assert_eq!(waste.len(), 1);
        assert_eq!(waste[0].reason, WasteReason::OutOfUses);
        assert_eq!(waste[0].container_id, "G1");

        let mut sink = MemorySink::new();
        let request = ReturnRequest::new("U9", outcome.new_date + Duration::days(30), 5.0);
        let plan = inventory
            .plan_return(outcome.new_date, &request, &ReturnPlanConfig::default(), &mut sink)
            .unwrap();
        assert_eq!(plan.return_manifest.return_items.len(), 1);
        assert_eq!(plan.return_manifest.total_weight, 3.0);

        let report = inventory.complete_undocking("U9", "system", &mut sink);
        assert_eq!(report.items_removed, 1);
        assert_eq!(inventory.items.len(), 1);
        assert_eq!(inventory.placements.len(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_export_after_return_plan() {
        let mut inventory = Inventory::new(
            vec![Item::new("x", 1.0, 1.0, 1.0, "Z").with_usage_limit(0)],
            Vec::new(),
            vec![front("C", "x", 0.0)],
        );
        let request = ReturnRequest::new("U1", day0(), 100.0);
        inventory
            .plan_return(day0(), &request, &ReturnPlanConfig::default(), &mut NullSink)
            .unwrap();

        let text = arrangement_csv(&inventory.placements).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("x,U1,"));
    }
}
