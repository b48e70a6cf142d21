//! # Stowage CLI
//!
//! The `stow` command: JSON documents in, JSON (or CSV) out, logs on stderr.

pub mod cli;
pub mod commands;
pub mod documents;
pub mod event_log;
pub mod logger;
pub mod settings;

// Re-exports
pub use cli::{Cli, Commands, WasteCommand};
pub use commands::run;
pub use documents::{Output, SimulationClock};
pub use event_log::{query_events, read_events, EventLogSink};
pub use settings::Settings;
