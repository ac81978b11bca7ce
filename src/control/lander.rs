use serde::{Deserialize, Serialize};

use crate::constants::PhysicalConstants;
use crate::errors::SimulationError;
use crate::utils::vector3d::Vector3;

/// Parachute deployment state. Only ever moves forward:
/// `NotDeployed -> Deployed -> Lost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParachuteStatus {
    NotDeployed,
    Deployed,
    Lost,
}

/// Everything the integrator and the autopilot read and write each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Planet-centred position (m).
    pub position: Vector3,
    /// m/s
    pub velocity: Vector3,
    /// xyz Euler angles, degrees.
    pub orientation: Vector3,
    /// Fraction of fuel capacity remaining.
    pub fuel: f64,
    throttle: f64,
    parachute_status: ParachuteStatus,
    pub stabilized_attitude: bool,
    pub autopilot_enabled: bool,
    pub delta_t: f64,
    #[serde(default)]
    pub time: f64,
}

impl SimulationState {
    pub fn new(
        position: Vector3,
        velocity: Vector3,
        orientation: Vector3,
        delta_t: f64,
    ) -> Self {
        SimulationState {
            position,
            velocity,
            orientation,
            fuel: 1.0,
            throttle: 0.0,
            parachute_status: ParachuteStatus::NotDeployed,
            stabilized_attitude: false,
            autopilot_enabled: false,
            delta_t,
            time: 0.0,
        }
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    /// Sets the engine command, saturating into [0, 1]. NaN shuts the engine off.
    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = if throttle.is_nan() {
            0.0
        } else {
            throttle.clamp(0.0, 1.0)
        };
    }

    pub fn parachute_status(&self) -> ParachuteStatus {
        self.parachute_status
    }

    /// Returns true if this call deployed the chute.
    pub fn deploy_parachute(&mut self) -> bool {
        if self.parachute_status == ParachuteStatus::NotDeployed {
            self.parachute_status = ParachuteStatus::Deployed;
            true
        } else {
            false
        }
    }

    /// Returns true if this call tore off a deployed chute.
    pub fn lose_parachute(&mut self) -> bool {
        if self.parachute_status == ParachuteStatus::Deployed {
            self.parachute_status = ParachuteStatus::Lost;
            true
        } else {
            false
        }
    }

    pub fn altitude(&self, planet_radius: f64) -> f64 {
        self.position.magnitude() - planet_radius
    }

    /// Radial component of velocity; negative while descending.
    pub fn descent_rate(&self) -> Result<f64, SimulationError> {
        let up = self.position.normalize("position")?;
        Ok(self.velocity.dot(&up))
    }

    pub fn mass(&self, constants: &PhysicalConstants) -> f64 {
        constants.lander_mass(self.fuel)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.delta_t.is_finite() && self.delta_t > 0.0) {
            return Err(SimulationError::invalid_state(
                "delta_t",
                format!("must be positive and finite, got {}", self.delta_t),
            ));
        }
        if !self.position.is_finite() {
            return Err(SimulationError::invalid_state("position", "is not finite"));
        }
        if self.position.magnitude() == 0.0 {
            return Err(SimulationError::invalid_state(
                "position",
                "must not be the planet centre",
            ));
        }
        if !self.velocity.is_finite() {
            return Err(SimulationError::invalid_state("velocity", "is not finite"));
        }
        if !self.orientation.is_finite() {
            return Err(SimulationError::invalid_state("orientation", "is not finite"));
        }
        if !(0.0..=1.0).contains(&self.fuel) {
            return Err(SimulationError::invalid_state(
                "fuel",
                format!("must lie in [0, 1], got {}", self.fuel),
            ));
        }
        if !(0.0..=1.0).contains(&self.throttle) {
            return Err(SimulationError::invalid_state(
                "throttle",
                format!("must lie in [0, 1], got {}", self.throttle),
            ));
        }
        Ok(())
    }
}
