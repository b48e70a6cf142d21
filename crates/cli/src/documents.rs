//! JSON documents read and written by the CLI.
//!
//! A list document is either a bare array or an object wrapping the array
//! under a named field, e.g. `{"items": [...]}`.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stowage_core::Instant;

/// Reads a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Extracts a list from a bare array or from the `key` field of an object.
pub fn list_from_value<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove(key) {
            Some(inner) => inner,
            None => bail!("expected an array or an object with a \"{}\" field", key),
        },
        _ => bail!("expected an array or an object with a \"{}\" field", key),
    };
    Ok(serde_json::from_value(list)?)
}

/// Reads a list document.
pub fn read_list<T: DeserializeOwned>(path: &Path, key: &str) -> Result<Vec<T>> {
    let value = read_json(path)?;
    list_from_value(value, key).with_context(|| format!("failed to read {} from {}", key, path.display()))
}

/// Reads a list document, or returns an empty list when no path is given.
pub fn read_optional_list<T: DeserializeOwned>(path: Option<&Path>, key: &str) -> Result<Vec<T>> {
    match path {
        Some(path) => read_list(path, key),
        None => Ok(Vec::new()),
    }
}

/// Simulated clock kept between `simulate` runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationClock {
    /// Date reached by the last run.
    #[serde(with = "stowage_core::time::serde_instant")]
    pub current_date: Instant,
}

impl SimulationClock {
    /// Reads the clock, or `None` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let value = read_json(path)?;
        let clock = serde_json::from_value(value)
            .with_context(|| format!("{} is not a simulation clock", path.display()))?;
        Ok(Some(clock))
    }

    /// Writes the clock.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// What a command produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Printed as pretty JSON.
    Json(Value),
    /// Printed as is.
    Text(String),
}

impl Output {
    /// Wraps a serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Renders pretty JSON or the raw text.
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Json(value) => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
            Self::Text(text) => Ok(text.clone()),
        }
    }

    /// Writes to `path`, or to stdout when no path is given.
    pub fn emit(&self, path: Option<&Path>) -> Result<()> {
        let rendered = self.render()?;
        match path {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}
