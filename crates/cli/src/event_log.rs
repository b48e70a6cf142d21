//! Persistent action log: one JSON event per line.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stowage_core::{ActionEvent, ActionSink, EventFilter, LogSink};

/// Appends every event to a JSON-lines file and echoes it to the log.
///
/// A failed write is logged and dropped; the operation that emitted the
/// event carries on.
pub struct EventLogSink {
    path: PathBuf,
    file: BufWriter<File>,
}

impl EventLogSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: BufWriter::new(file),
        })
    }

    fn append(&mut self, event: &ActionEvent) -> Result<()> {
        serde_json::to_writer(&mut self.file, event)?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

impl ActionSink for EventLogSink {
    fn record(&mut self, event: ActionEvent) {
        if let Err(err) = self.append(&event) {
            log::warn!("Event not written to {}: {:#}", self.path.display(), err);
        }
        LogSink.record(event);
    }
}

/// Reads every event of a log file, in recording order.
///
/// A missing file is an empty log. Blank lines are skipped.
pub fn read_events(path: &Path) -> Result<Vec<ActionEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read event log {}", path.display()))?;

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{}:{}: not an event", path.display(), idx + 1))
        })
        .collect()
}

/// Reads a log file and keeps the events `filter` accepts.
pub fn query_events(path: &Path, filter: &EventFilter) -> Result<Vec<ActionEvent>> {
    let events = read_events(path)?;
    Ok(filter.apply(&events).into_iter().cloned().collect())
}
