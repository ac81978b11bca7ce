use crate::constants::{EXOSPHERE, LANDER_SIZE, MARS_RADIUS};
use crate::control::lander::SimulationState;
use crate::errors::SimulationError;
use crate::utils::vector3d::Vector3;

pub const SCENARIO_COUNT: usize = 10;

/// Initial conditions fixed by a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub position: Vector3,
    pub velocity: Vector3,
    pub orientation: Vector3,
    pub delta_t: f64,
    pub stabilized_attitude: bool,
    pub autopilot_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    /// `None` for reserved slots.
    pub preset: Option<Preset>,
}

impl Scenario {
    const fn reserved() -> Self {
        Scenario {
            name: "reserved",
            description: "",
            preset: None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.preset.is_none()
    }

    /// Fresh state for this scenario: full tank, engine off, chute stowed.
    pub fn initial_state(&self) -> Option<SimulationState> {
        self.preset.map(|preset| {
            let mut state = SimulationState::new(
                preset.position,
                preset.velocity,
                preset.orientation,
                preset.delta_t,
            );
            state.stabilized_attitude = preset.stabilized_attitude;
            state.autopilot_enabled = preset.autopilot_enabled;
            state
        })
    }
}

pub static SCENARIOS: [Scenario; SCENARIO_COUNT] = [
    Scenario {
        name: "circular_orbit",
        description: "circular orbit",
        preset: Some(Preset {
            position: Vector3::new(1.2 * MARS_RADIUS, 0.0, 0.0),
            velocity: Vector3::new(0.0, -3247.087385863725, 0.0),
            orientation: Vector3::new(0.0, 90.0, 0.0),
            delta_t: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "descent_10km",
        description: "descent from 10km",
        preset: Some(Preset {
            position: Vector3::new(0.0, -(MARS_RADIUS + 10_000.0), 0.0),
            velocity: Vector3::zero(),
            orientation: Vector3::new(0.0, 0.0, 90.0),
            delta_t: 0.1,
            stabilized_attitude: true,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "elliptical_polar_orbit",
        description: "elliptical orbit, thrust changes orbital plane",
        preset: Some(Preset {
            position: Vector3::new(0.0, 0.0, 1.2 * MARS_RADIUS),
            velocity: Vector3::new(3500.0, 0.0, 0.0),
            orientation: Vector3::new(0.0, 0.0, 90.0),
            delta_t: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "polar_launch",
        description: "polar launch at escape velocity (but drag prevents escape)",
        preset: Some(Preset {
            position: Vector3::new(0.0, 0.0, MARS_RADIUS + LANDER_SIZE / 2.0),
            velocity: Vector3::new(0.0, 0.0, 5027.0),
            orientation: Vector3::zero(),
            delta_t: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "aerobraking_orbit",
        description: "elliptical orbit that clips the atmosphere and decays",
        preset: Some(Preset {
            position: Vector3::new(0.0, 0.0, MARS_RADIUS + 100_000.0),
            velocity: Vector3::new(4000.0, 0.0, 0.0),
            orientation: Vector3::new(0.0, 90.0, 0.0),
            delta_t: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "descent_200km",
        description: "descent from 200km",
        preset: Some(Preset {
            position: Vector3::new(0.0, -(MARS_RADIUS + EXOSPHERE), 0.0),
            velocity: Vector3::zero(),
            orientation: Vector3::new(0.0, 0.0, 90.0),
            delta_t: 0.1,
            stabilized_attitude: true,
            autopilot_enabled: false,
        }),
    },
    Scenario {
        name: "areostationary_orbit",
        description: "geostationary orbit",
        // radius = cbrt(GM * (MARS_DAY / 2π)²)
        preset: Some(Preset {
            position: Vector3::new(20_429_635.87, 0.0, 0.0),
            velocity: Vector3::new(0.0, 1448.025, 0.0),
            orientation: Vector3::new(0.0, 90.0, 0.0),
            delta_t: 0.1,
            stabilized_attitude: false,
            autopilot_enabled: false,
        }),
    },
    Scenario::reserved(),
    Scenario::reserved(),
    Scenario::reserved(),
];

pub fn scenario(index: usize) -> Result<&'static Scenario, SimulationError> {
    SCENARIOS
        .get(index)
        .ok_or(SimulationError::UnknownScenario(index))
}

/// Initial state of scenario `index`.
pub fn load_scenario(index: usize) -> Result<SimulationState, SimulationError> {
    scenario(index)?
        .initial_state()
        .ok_or(SimulationError::ReservedScenario(index))
}
