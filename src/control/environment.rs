use crate::constants::{PhysicalConstants, ATMOSPHERE_SCALE_HEIGHT, SURFACE_AIR_DENSITY};
use crate::control::attitude::{base_down_orientation, body_to_world};
use crate::control::lander::SimulationState;
use crate::utils::vector3d::Vector3;

/// Capabilities the integrator and autopilot need from the outside world.
///
/// Implementations must be free of hidden mutable state so that a tick is a
/// pure function of `SimulationState`.
pub trait Environment {
    /// Local air density (kg/m³), never negative.
    fn atmospheric_density(&self, position: Vector3) -> f64;

    /// Engine thrust (N) in planet coordinates.
    fn thrust_in_world_frame(&self, throttle: f64, orientation: Vector3) -> Vector3;

    fn safe_to_deploy_parachute(&self, state: &SimulationState) -> bool;

    /// Rewrites `state.orientation` so the base faces the planet.
    fn stabilize_attitude(&self, state: &mut SimulationState);
}

/// Exponential Martian atmosphere with a single-engine lander.
#[derive(Debug, Clone)]
pub struct MarsEnvironment {
    pub constants: PhysicalConstants,
    pub surface_density: f64,
    pub scale_height: f64,
}

impl MarsEnvironment {
    pub fn new(constants: PhysicalConstants) -> Self {
        MarsEnvironment {
            constants,
            surface_density: SURFACE_AIR_DENSITY,
            scale_height: ATMOSPHERE_SCALE_HEIGHT,
        }
    }

    fn altitude(&self, position: Vector3) -> f64 {
        position.magnitude() - self.constants.planet_radius
    }

    /// Drag force (N) a deployed chute would feel in the current state.
    pub fn chute_drag_force(&self, state: &SimulationState) -> f64 {
        0.5 * self.constants.drag_coef_chute
            * self.atmospheric_density(state.position)
            * self.constants.chute_area()
            * state.velocity.magnitude_squared()
    }
}

impl Default for MarsEnvironment {
    fn default() -> Self {
        MarsEnvironment::new(PhysicalConstants::default())
    }
}

impl Environment for MarsEnvironment {
    fn atmospheric_density(&self, position: Vector3) -> f64 {
        let altitude = self.altitude(position);
        if altitude > self.constants.exosphere || altitude < 0.0 {
            0.0
        } else {
            self.surface_density * (-altitude / self.scale_height).exp()
        }
    }

    fn thrust_in_world_frame(&self, throttle: f64, orientation: Vector3) -> Vector3 {
        let throttle = if throttle.is_nan() {
            0.0
        } else {
            throttle.clamp(0.0, 1.0)
        };
        let body_thrust = Vector3::new(0.0, 0.0, self.constants.max_thrust * throttle);
        body_to_world(orientation, body_thrust)
    }

    fn safe_to_deploy_parachute(&self, state: &SimulationState) -> bool {
        let too_much_drag = self.chute_drag_force(state) > self.constants.max_parachute_drag;
        let too_fast = state.velocity.magnitude() > self.constants.max_parachute_speed
            && self.altitude(state.position) < self.constants.exosphere;
        !(too_much_drag || too_fast)
    }

    fn stabilize_attitude(&self, state: &mut SimulationState) {
        match state.position.normalize("position") {
            Ok(up) => state.orientation = base_down_orientation(up),
            Err(err) => log::debug!(
                "Kept orientation {:?}, position has no direction: {}",
                state.orientation,
                err
            ),
        }
    }
}
