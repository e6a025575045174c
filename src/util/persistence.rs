use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::info;
use serde_json::Error as SerdeError;

use crate::domain::{InvalidInput, Scenario};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ShopProfit";
const APP_NAME: &str = "ShopProfit";
const SCENARIO_FILENAME: &str = "scenario.json";

/// Platform config location of the working scenario.
pub fn default_scenario_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(SCENARIO_FILENAME))
}

/// Reads a scenario and dry-runs it so a malformed file is reported up front.
pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioStoreError> {
    let data = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&data)?;
    scenario.evaluate()?;
    info!(
        "Loaded scenario with {} basket(s) from {}",
        scenario.baskets.len(),
        path.display()
    );
    Ok(scenario)
}

/// Loads `path` when it exists, otherwise falls back to [`Scenario::default`].
pub fn load_or_default(path: Option<&Path>) -> Result<Scenario, ScenarioStoreError> {
    match path {
        Some(path) if path.exists() => load_scenario(path),
        Some(path) => {
            info!("No scenario at {}; using defaults", path.display());
            Ok(Scenario::default())
        }
        None => Ok(Scenario::default()),
    }
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> Result<(), ScenarioStoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(scenario)?;
    fs::write(path, json)?;
    info!(
        "Saved scenario ({} basket(s)) to {}",
        scenario.baskets.len(),
        path.display()
    );
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioStoreError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
    #[error("scenario is not valid: {0}")]
    Invalid(#[from] InvalidInput),
}
