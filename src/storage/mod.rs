//! Versioned JSON persistence for a planning session
//!
//! The payload is `{ version, inputs, scenarios, activeScenarioId }`.
//! Readers reject a different version or any malformed payload, and callers
//! fall back to defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assumptions::GlobalInputs;
use crate::error::StorageError;
use crate::plan::Scenario;

/// Schema version written by this crate
pub const STORAGE_VERSION: u32 = 2;

/// State file used when no path is given
pub const DEFAULT_STATE_PATH: &str = "liquidity-planner-state.v2.json";

/// Everything needed to restore a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub version: u32,
    pub inputs: GlobalInputs,
    pub scenarios: Vec<Scenario>,
    pub active_scenario_id: String,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl PersistedState {
    pub fn new(inputs: GlobalInputs, scenarios: Vec<Scenario>, active_scenario_id: impl Into<String>) -> Self {
        Self {
            version: STORAGE_VERSION,
            inputs,
            scenarios,
            active_scenario_id: active_scenario_id.into(),
        }
    }

    /// Range checks serde cannot express
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.version != STORAGE_VERSION {
            return Err(StorageError::VersionMismatch {
                found: self.version,
                expected: STORAGE_VERSION,
            });
        }
        self.inputs.validate()?;
        if self.scenarios.is_empty() {
            return Err(StorageError::NoScenarios);
        }
        for segment in self.scenarios.iter().flat_map(|s| &s.segments) {
            segment.validate_shape()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse and validate a persisted payload
///
/// The version is checked before the full schema so that payloads from
/// other versions are reported as such rather than as shape errors.
pub fn parse_state(raw: &str) -> Result<PersistedState, StorageError> {
    let probe: VersionProbe = serde_json::from_str(raw)?;
    if probe.version != STORAGE_VERSION {
        return Err(StorageError::VersionMismatch {
            found: probe.version,
            expected: STORAGE_VERSION,
        });
    }

    let state: PersistedState = serde_json::from_str(raw)?;
    state.validate()?;
    Ok(state)
}

/// File-backed store; last write wins
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state, distinguishing "nothing stored" from errors
    pub fn try_load(&self) -> Result<Option<PersistedState>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        parse_state(&raw).map(Some)
    }

    /// Read the stored state, treating any problem as "nothing stored"
    pub fn load(&self) -> Option<PersistedState> {
        match self.try_load() {
            Ok(Some(state)) => {
                log::debug!("loaded state from {}", self.path.display());
                Some(state)
            }
            Ok(None) => {
                log::debug!("no state at {}", self.path.display());
                None
            }
            Err(err) => {
                log::warn!("ignoring stored state at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    pub fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        fs::write(&self.path, state.to_json()?)?;
        log::info!("saved {} scenarios to {}", state.scenarios.len(), self.path.display());
        Ok(())
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATE_PATH)
    }
}
