use crate::constants::PhysicalConstants;
use crate::control::autopilot::Autopilot;
use crate::control::environment::Environment;
use crate::control::lander::{ParachuteStatus, SimulationState};
use crate::errors::SimulationError;
use crate::utils::vector3d::Vector3;

/// Per-force accelerations (m/s²) acting on the lander in one state.
///
/// `lander_drag` and `chute_drag` point along the velocity; they are
/// subtracted when forming `net`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerations {
    pub gravity: Vector3,
    pub lander_drag: Vector3,
    pub chute_drag: Vector3,
    pub thrust: Vector3,
    pub net: Vector3,
}

/// Fixed-step integrator for the lander's translational motion.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub constants: PhysicalConstants,
    pub autopilot: Autopilot,
}

impl Integrator {
    pub fn new(constants: PhysicalConstants, autopilot: Autopilot) -> Self {
        Integrator {
            constants,
            autopilot,
        }
    }

    pub fn accelerations<E: Environment + ?Sized>(
        &self,
        state: &SimulationState,
        environment: &E,
    ) -> Result<Accelerations, SimulationError> {
        let c = &self.constants;

        let mass = state.mass(c);
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimulationError::invalid_state(
                "mass",
                format!("must be positive, got {} kg", mass),
            ));
        }

        let r = state.position.magnitude();
        let normal_r = state.position.normalize("position")?;
        let gravity = -c.gravitational_constant * c.planet_mass * normal_r / (r * r);

        let speed = state.velocity.magnitude();
        let density = environment.atmospheric_density(state.position);
        let (lander_drag, chute_drag) = if speed == 0.0 {
            (Vector3::zero(), Vector3::zero())
        } else {
            let normal_v = state.velocity.normalize("velocity")?;
            let lander_drag =
                0.5 * density * c.drag_coef_lander * c.lander_area() * speed * speed * normal_v
                    / mass;
            let chute_drag = if state.parachute_status() == ParachuteStatus::Deployed {
                0.5 * density * c.drag_coef_chute * c.chute_area() * speed * speed * normal_v
                    / mass
            } else {
                Vector3::zero()
            };
            (lander_drag, chute_drag)
        };

        let thrust =
            environment.thrust_in_world_frame(state.throttle(), state.orientation) / mass;

        let net = if state.parachute_status() == ParachuteStatus::Deployed {
            gravity - lander_drag - chute_drag + thrust
        } else {
            gravity - lander_drag + thrust
        };

        Ok(Accelerations {
            gravity,
            lander_drag,
            chute_drag,
            thrust,
            net,
        })
    }

    /// Advances `state` by one tick of `state.delta_t`.
    ///
    /// Position moves with the old velocity and velocity with the
    /// acceleration of the old state. The autopilot and attitude hold then
    /// act on the updated state for the next tick. On error the state is
    /// left untouched.
    pub fn advance<E: Environment + ?Sized>(
        &self,
        state: &mut SimulationState,
        environment: &E,
    ) -> Result<(), SimulationError> {
        let acceleration = self.accelerations(state, environment)?.net;
        let dt = state.delta_t;

        let mut next = state.clone();
        next.position = state.position + dt * state.velocity;
        next.velocity = state.velocity + dt * acceleration;

        if next.autopilot_enabled {
            self.autopilot.regulate(&mut next, &self.constants, environment)?;
        }

        if next.stabilized_attitude {
            environment.stabilize_attitude(&mut next);
        }

        *state = next;
        Ok(())
    }
}
