//! Subcommand handlers.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::json;
use stowage_core::time::now;
use stowage_core::{
    ActionEvent, ActionSink, ActionType, AllocationSummary, Allocator, Container, EventFilter, Item,
    Placement, PlacementSnapshot,
};
use stowage_engine::{complete_retrieval, diff, plan_search, ZoneAllocator};
use stowage_inventory::{
    arrangement_csv, simulate_days, Advance, Inventory, ReturnRequest, UsageEntry,
};

use crate::cli::{Cli, Commands, WasteCommand};
use crate::documents::{read_list, read_optional_list, Output, SimulationClock};
use crate::event_log::query_events;
use crate::settings::Settings;

/// Runs a parsed command line; events go to `sink`.
pub fn run(cli: &Cli, sink: &mut dyn ActionSink) -> Result<Output> {
    let settings = Settings::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Place {
            items,
            containers,
            existing,
        } => {
            let items: Vec<Item> = read_list(items, "items")?;
            let containers: Vec<Container> = read_list(containers, "containers")?;
            let existing: Vec<Placement> = read_optional_list(existing.as_deref(), "placements")?;

            let allocator = ZoneAllocator::new(settings.allocation.clone());
            let result = allocator
                .allocate_with_existing(&items, &containers, &existing, sink)
                .context("allocation failed")?;

            let mut value = serde_json::to_value(&result)?;
            value["summary"] = serde_json::to_value(AllocationSummary::from(&result))?;
            value["stats"] = serde_json::to_value(result.placement_stats())?;
            Ok(Output::Json(value))
        }

        Commands::Search {
            query,
            placements,
            items,
            containers,
        } => {
            let placements: Vec<Placement> = read_list(placements, "placements")?;
            let items: Vec<Item> = read_optional_list(items.as_deref(), "items")?;
            let containers: Vec<Container> =
                read_optional_list(containers.as_deref(), "containers")?;

            let outcome = plan_search(
                query,
                &placements,
                &items,
                &containers,
                &settings.allocation.actor_id,
                sink,
            );
            Output::json(&outcome)
        }

        Commands::Retrieve {
            item_id,
            placements,
            items,
        } => {
            let mut placements: Vec<Placement> = read_list(placements, "placements")?;
            let mut items: Vec<Item> = read_list(items, "items")?;

            let retrieved = complete_retrieval(
                item_id,
                &mut placements,
                &mut items,
                &settings.allocation.actor_id,
                sink,
            )?;
            Ok(Output::Json(json!({
                "retrieved": retrieved,
                "placements": placements,
                "items": items,
            })))
        }

        Commands::Rearrange { old, new } => {
            let old: PlacementSnapshot = read_list::<Placement>(old, "placements")?.into();
            let new: PlacementSnapshot = read_list::<Placement>(new, "placements")?.into();
            Output::json(&json!({ "rearrangements": diff(&old, &new) }))
        }

        Commands::Export { placements } => {
            let placements: Vec<Placement> = read_list(placements, "placements")?;
            Ok(Output::Text(arrangement_csv(&placements)?))
        }

        Commands::Waste(command) => run_waste(command, &settings, sink),

        Commands::Simulate {
            items,
            usage,
            start,
            days,
            until,
            state,
        } => {
            let mut items: Vec<Item> = read_list(items, "items")?;
            let usage: Vec<UsageEntry> =
                read_optional_list(usage.as_deref(), "itemsToBeUsedPerDay")?;
            let advance = match (days, until) {
                (Some(days), _) => Advance::Days(*days),
                (None, Some(until)) => Advance::Until(*until),
                (None, None) => bail!("simulate needs --days or --until"),
            };

            let clock = match state {
                Some(path) => SimulationClock::load(path)?,
                None => None,
            };
            let start = match (start, clock) {
                (Some(start), _) => *start,
                (None, Some(clock)) => clock.current_date,
                (None, None) => now(),
            };

            let outcome = simulate_days(&mut items, &usage, start, advance)?;
            if let Some(path) = state {
                SimulationClock {
                    current_date: outcome.new_date,
                }
                .save(path)?;
            }

            let mut value = serde_json::to_value(&outcome)?;
            value["items"] = serde_json::to_value(&items)?;
            Ok(Output::Json(value))
        }

        Commands::Logs {
            start,
            end,
            item,
            user,
            action_type,
        } => {
            let Some(path) = cli.log_file.as_deref() else {
                bail!("logs needs --log-file");
            };

            let mut filter = EventFilter::new();
            filter.start = *start;
            filter.end = *end;
            filter.item_id = item.clone();
            filter.user_id = user.clone();
            filter.action_type = *action_type;

            let logs = query_events(path, &filter)?;
            Output::json(&json!({ "logs": logs }))
        }
    }
}

fn load_inventory(
    items: &Path,
    placements: Option<&Path>,
    containers: Option<&Path>,
) -> Result<Inventory> {
    Ok(Inventory::new(
        read_list(items, "items")?,
        read_optional_list(containers, "containers")?,
        read_optional_list(placements, "placements")?,
    ))
}

fn run_waste(
    command: &WasteCommand,
    settings: &Settings,
    sink: &mut dyn ActionSink,
) -> Result<Output> {
    match command {
        WasteCommand::Identify {
            items,
            placements,
            now: at,
        } => {
            let inventory = load_inventory(items, placements.as_deref(), None)?;
            let waste = inventory.identify_waste(at.unwrap_or_else(now));

            sink.record(ActionEvent::new(
                settings.allocation.actor_id.clone(),
                ActionType::IdentifyWaste,
                "",
                "N/A",
                "N/A",
                "Waste identification completed",
            ));
            Output::json(&json!({ "wasteItems": waste }))
        }

        WasteCommand::ReturnPlan {
            items,
            placements,
            containers,
            container,
            date,
            max_weight,
            now: at,
        } => {
            let mut inventory =
                load_inventory(items, placements.as_deref(), containers.as_deref())?;
            let request = ReturnRequest::new(container.clone(), *date, *max_weight);

            let plan = inventory.plan_return(
                at.unwrap_or_else(now),
                &request,
                &settings.waste,
                sink,
            )?;
            let mut value = serde_json::to_value(&plan)?;
            value["placements"] = serde_json::to_value(&inventory.placements)?;
            value["containers"] = serde_json::to_value(&inventory.containers)?;
            Ok(Output::Json(value))
        }

        WasteCommand::CompleteUndocking {
            items,
            placements,
            containers,
            container,
        } => {
            let mut inventory =
                load_inventory(items, Some(placements.as_path()), containers.as_deref())?;
            let report = inventory.complete_undocking(container, &settings.waste.actor_id, sink);

            let mut value = serde_json::to_value(report)?;
            value["items"] = serde_json::to_value(&inventory.items)?;
            value["placements"] = serde_json::to_value(&inventory.placements)?;
            value["containers"] = serde_json::to_value(&inventory.containers)?;
            Ok(Output::Json(value))
        }
    }
}
