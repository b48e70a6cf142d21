//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use stowage_core::{parse_instant, ActionType, Instant};

fn parse_timestamp(text: &str) -> Result<Instant, String> {
    parse_instant(text).map_err(|e| e.to_string())
}

fn parse_action_type(text: &str) -> Result<ActionType, String> {
    text.parse().map_err(|e: stowage_core::Error| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "stow")]
#[command(about = "Stowage planning for zoned storage containers")]
#[command(version)]
pub struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append recorded actions to this JSON-lines file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate items into containers, zone by zone
    Place {
        /// Items document
        #[arg(long)]
        items: PathBuf,

        /// Containers document
        #[arg(long)]
        containers: PathBuf,

        /// Placements already in the containers
        #[arg(long)]
        existing: Option<PathBuf>,
    },

    /// Find an item by id or name and plan its retrieval
    Search {
        /// Item id or name
        query: String,

        /// Placements document
        #[arg(long)]
        placements: PathBuf,

        /// Items document, for names
        #[arg(long)]
        items: Option<PathBuf>,

        /// Containers document, for zones
        #[arg(long)]
        containers: Option<PathBuf>,
    },

    /// Take an item out and spend one of its uses
    Retrieve {
        /// Item id
        item_id: String,

        /// Placements document
        #[arg(long)]
        placements: PathBuf,

        /// Items document
        #[arg(long)]
        items: PathBuf,
    },

    /// Plan the moves between two layouts
    Rearrange {
        /// Current placements
        #[arg(long)]
        old: PathBuf,

        /// Target placements
        #[arg(long)]
        new: PathBuf,
    },

    /// Export the arrangement as CSV
    Export {
        /// Placements document
        #[arg(long)]
        placements: PathBuf,
    },

    /// Waste management
    #[command(subcommand)]
    Waste(WasteCommand),

    /// Simulate daily item usage
    #[command(group(ArgGroup::new("span").required(true).args(["days", "until"])))]
    Simulate {
        /// Items document
        #[arg(long)]
        items: PathBuf,

        /// Items used once per day
        #[arg(long)]
        usage: Option<PathBuf>,

        /// Simulation start (defaults to now)
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<Instant>,

        /// Number of days to simulate
        #[arg(long)]
        days: Option<u32>,

        /// Simulate whole days up to this instant
        #[arg(long, value_parser = parse_timestamp)]
        until: Option<Instant>,

        /// Clock file; read for the start date and updated with the new date
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Query the action log given by --log-file
    Logs {
        /// Earliest timestamp
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<Instant>,

        /// Latest timestamp
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<Instant>,

        /// Item id
        #[arg(long)]
        item: Option<String>,

        /// User id
        #[arg(long)]
        user: Option<String>,

        /// Action type, e.g. NEW_PLACEMENT
        #[arg(long, value_parser = parse_action_type)]
        action_type: Option<ActionType>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WasteCommand {
    /// List expired and used-up items
    Identify {
        /// Items document
        #[arg(long)]
        items: PathBuf,

        /// Placements document
        #[arg(long)]
        placements: Option<PathBuf>,

        /// Evaluation instant (defaults to now)
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<Instant>,
    },

    /// Select waste for an undocking container under a weight budget
    ReturnPlan {
        /// Items document
        #[arg(long)]
        items: PathBuf,

        /// Placements document
        #[arg(long)]
        placements: Option<PathBuf>,

        /// Containers document; the undocking container is added if missing
        #[arg(long)]
        containers: Option<PathBuf>,

        /// Undocking container id
        #[arg(long)]
        container: String,

        /// Undocking date
        #[arg(long, value_parser = parse_timestamp)]
        date: Instant,

        /// Weight budget
        #[arg(long)]
        max_weight: f64,

        /// Evaluation instant (defaults to now)
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<Instant>,
    },

    /// Drop the undocked container and everything in it
    CompleteUndocking {
        /// Items document
        #[arg(long)]
        items: PathBuf,

        /// Placements document
        #[arg(long)]
        placements: PathBuf,

        /// Containers document
        #[arg(long)]
        containers: Option<PathBuf>,

        /// Undocking container id
        #[arg(long)]
        container: String,
    },
}
