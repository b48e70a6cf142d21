//! Settings file for the command-line front end.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use stowage_core::Config;
use stowage_inventory::ReturnPlanConfig;

/// Settings read from `--config <file.json>`; missing fields take defaults.
///
/// ```json
/// {
///   "allocation": { "orientation_policy": "all_permutations", "actor_id": "crew-1" },
///   "waste": { "mass_per_volume": 0.8 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Allocation settings.
    pub allocation: Config,
    /// Return planning settings.
    pub waste: ReturnPlanConfig,
}

impl Settings {
    /// Loads settings, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        settings.waste.validate()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
