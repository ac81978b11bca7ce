use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

// Physical Constants
pub const GRAVITY: f64 = 6.673e-11; // N⋅m²/kg²
pub const MARS_RADIUS: f64 = 3_386_000.0; // meters
pub const MARS_MASS: f64 = 6.42e23; // kg
pub const MARS_DAY: f64 = 88_642.65; // s
pub const EXOSPHERE: f64 = 200_000.0; // m

// Lander Constants
pub const UNLOADED_LANDER_MASS: f64 = 100.0; // kg
pub const FUEL_CAPACITY: f64 = 100.0; // l
pub const FUEL_DENSITY: f64 = 1.0; // kg/l
pub const LANDER_SIZE: f64 = 1.0; // m
pub const MAX_THRUST: f64 = 1.5
    * (FUEL_DENSITY * FUEL_CAPACITY + UNLOADED_LANDER_MASS)
    * (GRAVITY * MARS_MASS / (MARS_RADIUS * MARS_RADIUS)); // N

// Aerodynamic Constants
pub const DRAG_COEF_LANDER: f64 = 1.0;
pub const DRAG_COEF_CHUTE: f64 = 2.0;
pub const CHUTE_AREA_FACTOR: f64 = 20.0; // chute area in units of LANDER_SIZE²
pub const MAX_PARACHUTE_DRAG: f64 = 20_000.0; // N
pub const MAX_PARACHUTE_SPEED: f64 = 500.0; // m/s
pub const SURFACE_AIR_DENSITY: f64 = 0.017; // kg/m³
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 11_000.0; // m

// Simulation Parameters
pub const DEFAULT_MAX_SIMULATION_TIME: f64 = 20_000.0; // s

/// Process-wide physical parameters for a run.
///
/// Set once at configuration time and only read afterwards. `Default` gives
/// the Mars values above; a JSON file may override any subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub gravitational_constant: f64,
    pub planet_mass: f64,
    pub planet_radius: f64,
    pub exosphere: f64,
    pub dry_mass: f64,
    pub fuel_capacity: f64,
    pub fuel_density: f64,
    pub max_thrust: f64,
    pub drag_coef_lander: f64,
    pub drag_coef_chute: f64,
    pub chute_area_factor: f64,
    pub lander_size: f64,
    pub max_parachute_drag: f64,
    pub max_parachute_speed: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gravitational_constant: GRAVITY,
            planet_mass: MARS_MASS,
            planet_radius: MARS_RADIUS,
            exosphere: EXOSPHERE,
            dry_mass: UNLOADED_LANDER_MASS,
            fuel_capacity: FUEL_CAPACITY,
            fuel_density: FUEL_DENSITY,
            max_thrust: MAX_THRUST,
            drag_coef_lander: DRAG_COEF_LANDER,
            drag_coef_chute: DRAG_COEF_CHUTE,
            chute_area_factor: CHUTE_AREA_FACTOR,
            lander_size: LANDER_SIZE,
            max_parachute_drag: MAX_PARACHUTE_DRAG,
            max_parachute_speed: MAX_PARACHUTE_SPEED,
        }
    }
}

impl PhysicalConstants {
    /// Standard gravitational parameter GM of the planet.
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.planet_mass
    }

    pub fn surface_gravity(&self) -> f64 {
        self.mu() / (self.planet_radius * self.planet_radius)
    }

    /// Mass of the lander carrying `fuel` (fraction of capacity).
    pub fn lander_mass(&self, fuel: f64) -> f64 {
        self.dry_mass + fuel * self.fuel_capacity * self.fuel_density
    }

    /// Cross-section used for body drag (π size²).
    pub fn lander_area(&self) -> f64 {
        std::f64::consts::PI * self.lander_size * self.lander_size
    }

    pub fn chute_area(&self) -> f64 {
        self.chute_area_factor * self.lander_size * self.lander_size
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let strictly_positive = [
            ("gravitational_constant", self.gravitational_constant),
            ("planet_mass", self.planet_mass),
            ("planet_radius", self.planet_radius),
            ("dry_mass", self.dry_mass),
            ("lander_size", self.lander_size),
        ];
        let non_negative = [
            ("exosphere", self.exosphere),
            ("fuel_capacity", self.fuel_capacity),
            ("fuel_density", self.fuel_density),
            ("max_thrust", self.max_thrust),
            ("drag_coef_lander", self.drag_coef_lander),
            ("drag_coef_chute", self.drag_coef_chute),
            ("chute_area_factor", self.chute_area_factor),
            ("max_parachute_drag", self.max_parachute_drag),
            ("max_parachute_speed", self.max_parachute_speed),
        ];

        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidConstant { name, value });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimulationError::InvalidConstant { name, value });
            }
        }
        Ok(())
    }
}
