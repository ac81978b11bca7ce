//! JSON persistence for lander state and physical constants.
//!
//! Floats are written in shortest round-trip form and parsed exactly, so a
//! reloaded state continues bit-for-bit along the same trajectory.

use std::fs;
use std::path::Path;

use crate::constants::PhysicalConstants;
use crate::control::lander::SimulationState;
use crate::errors::SimulationError;

pub fn to_json(state: &SimulationState) -> Result<String, SimulationError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn from_json(json: &str) -> Result<SimulationState, SimulationError> {
    let state: SimulationState = serde_json::from_str(json)?;
    state.validate()?;
    Ok(state)
}

pub fn save_state(state: &SimulationState, path: impl AsRef<Path>) -> Result<(), SimulationError> {
    fs::write(path.as_ref(), to_json(state)?)?;
    log::debug!("Saved state to {}", path.as_ref().display());
    Ok(())
}

pub fn load_state(path: impl AsRef<Path>) -> Result<SimulationState, SimulationError> {
    let json = fs::read_to_string(path.as_ref())?;
    from_json(&json)
}

/// Reads constants from a JSON file; missing fields keep their Mars defaults.
pub fn load_constants(path: impl AsRef<Path>) -> Result<PhysicalConstants, SimulationError> {
    let json = fs::read_to_string(path.as_ref())?;
    let constants: PhysicalConstants = serde_json::from_str(&json)?;
    constants.validate()?;
    Ok(constants)
}
