use crate::constants::PhysicalConstants;
use crate::control::environment::Environment;
use crate::control::lander::SimulationState;
use crate::errors::SimulationError;

/// Proportional throttle controller tracking the descent profile
/// `descent_rate = -(0.5 + kh * altitude)`, plus the parachute deploy rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Autopilot {
    pub kh: f64,
    pub kp: f64,
    pub offset: f64,
    /// Highest altitude (m) at which the chute may be opened.
    pub deploy_altitude: f64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Autopilot {
            kh: 0.02,
            kp: 0.5,
            offset: 0.5,
            deploy_altitude: 150_000.0,
        }
    }
}

impl Autopilot {
    pub fn proportional_output(&self, altitude: f64, descent_rate: f64) -> f64 {
        self.kp * -(0.5 + self.kh * altitude + descent_rate)
    }

    /// Saturating map of the controller output into [0, 1]; an output of
    /// zero gives a throttle of `offset`.
    pub fn throttle_for(&self, altitude: f64, descent_rate: f64) -> f64 {
        let p_out = self.proportional_output(altitude, descent_rate);

        if p_out <= -self.offset {
            0.0
        } else if p_out < 1.0 - self.offset {
            self.offset + p_out
        } else {
            1.0
        }
    }

    /// Throttle the controller would command in `state`, without touching it.
    pub fn command(
        &self,
        state: &SimulationState,
        constants: &PhysicalConstants,
    ) -> Result<f64, SimulationError> {
        let altitude = state.altitude(constants.planet_radius);
        let descent_rate = state.descent_rate()?;
        Ok(self.throttle_for(altitude, descent_rate))
    }

    /// Applies the control law: sets the throttle, holds the base down and
    /// opens the parachute once low enough and safe.
    pub fn regulate<E: Environment + ?Sized>(
        &self,
        state: &mut SimulationState,
        constants: &PhysicalConstants,
        environment: &E,
    ) -> Result<(), SimulationError> {
        let throttle = self.command(state, constants)?;
        state.set_throttle(throttle);
        state.stabilized_attitude = true;

        let altitude = state.altitude(constants.planet_radius);
        if altitude <= self.deploy_altitude
            && environment.safe_to_deploy_parachute(state)
            && state.deploy_parachute()
        {
            log::debug!(
                "Autopilot deployed parachute at t={:.1}s, altitude {:.0} m",
                state.time,
                altitude
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MARS_RADIUS;
    use crate::control::lander::ParachuteStatus;
    use crate::utils::vector3d::Vector3;
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;

    struct StubEnvironment {
        safe: Cell<bool>,
    }

    impl Environment for StubEnvironment {
        fn atmospheric_density(&self, _position: Vector3) -> f64 {
            0.0
        }

        fn thrust_in_world_frame(&self, _throttle: f64, _orientation: Vector3) -> Vector3 {
            Vector3::zero()
        }

        fn safe_to_deploy_parachute(&self, _state: &SimulationState) -> bool {
            self.safe.get()
        }

        fn stabilize_attitude(&self, _state: &mut SimulationState) {}
    }

    fn descending(altitude: f64, descent_rate: f64) -> SimulationState {
        SimulationState::new(
            Vector3::new(MARS_RADIUS + altitude, 0.0, 0.0),
            Vector3::new(descent_rate, 0.0, 0.0),
            Vector3::zero(),
            0.1,
        )
    }

    #[test]
    fn test_high_altitude_engine_off() {
        let autopilot = Autopilot::default();
        assert_abs_diff_eq!(
            autopilot.proportional_output(200_000.0, -50.0),
            -1975.25,
            epsilon = 1e-9
        );
        assert_eq!(autopilot.throttle_for(200_000.0, -50.0), 0.0);
    }

    #[test]
    fn test_low_altitude_slow_descent_engine_off() {
        let autopilot = Autopilot::default();
        assert_abs_diff_eq!(
            autopilot.proportional_output(1000.0, -5.0),
            -7.75,
            epsilon = 1e-12
        );
        assert_eq!(autopilot.throttle_for(1000.0, -5.0), 0.0);
    }

    #[test]
    fn test_linear_region() {
        let autopilot = Autopilot::default();
        // P = 0.5 * -(0.5 + 2 - 2.6) = 0.05
        assert_abs_diff_eq!(autopilot.throttle_for(100.0, -2.6), 0.55, epsilon = 1e-12);
        // P = 0 maps onto the offset
        assert_abs_diff_eq!(autopilot.throttle_for(0.0, -0.5), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_fast_descent_full_throttle() {
        let autopilot = Autopilot::default();
        assert_eq!(autopilot.throttle_for(100.0, -300.0), 1.0);
    }

    #[test]
    fn test_throttle_always_in_unit_interval() {
        let autopilot = Autopilot::default();
        let altitudes = [-1.0e3, 0.0, 1.0, 150.0, 2.0e3, 5.0e4, 2.0e5, 1.0e7];
        let rates = [-1.0e4, -500.0, -25.0, -1.0, 0.0, 3.0, 80.0, 1.0e4];
        for altitude in altitudes {
            for rate in rates {
                let throttle = autopilot.throttle_for(altitude, rate);
                assert!(
                    (0.0..=1.0).contains(&throttle),
                    "throttle {throttle} out of range at h={altitude}, v={rate}"
                );
            }
        }
    }

    #[test]
    fn test_command_is_pure() {
        let autopilot = Autopilot::default();
        let constants = PhysicalConstants::default();
        let state = descending(800.0, -40.0);
        let first = autopilot.command(&state, &constants).unwrap();
        let second = autopilot.command(&state, &constants).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(state, descending(800.0, -40.0));
    }

    #[test]
    fn test_regulate_sets_throttle_and_attitude_hold() {
        let autopilot = Autopilot::default();
        let constants = PhysicalConstants::default();
        let environment = StubEnvironment {
            safe: Cell::new(false),
        };
        let mut state = descending(100.0, -300.0);
        autopilot.regulate(&mut state, &constants, &environment).unwrap();
        assert_eq!(state.throttle(), 1.0);
        assert!(state.stabilized_attitude);
        assert_eq!(state.parachute_status(), ParachuteStatus::NotDeployed);
    }

    #[test]
    fn test_parachute_not_deployed_above_threshold() {
        let autopilot = Autopilot::default();
        let constants = PhysicalConstants::default();
        let environment = StubEnvironment {
            safe: Cell::new(true),
        };
        let mut state = descending(150_001.0, -10.0);
        autopilot.regulate(&mut state, &constants, &environment).unwrap();
        assert_eq!(state.parachute_status(), ParachuteStatus::NotDeployed);
    }

    #[test]
    fn test_parachute_deploys_and_never_retracts() {
        let autopilot = Autopilot::default();
        let constants = PhysicalConstants::default();
        let environment = StubEnvironment {
            safe: Cell::new(true),
        };
        let mut state = descending(150_000.0, -10.0);
        autopilot.regulate(&mut state, &constants, &environment).unwrap();
        assert_eq!(state.parachute_status(), ParachuteStatus::Deployed);

        environment.safe.set(false);
        autopilot.regulate(&mut state, &constants, &environment).unwrap();
        assert_eq!(state.parachute_status(), ParachuteStatus::Deployed);
    }

    #[test]
    fn test_lost_parachute_is_not_redeployed() {
        let autopilot = Autopilot::default();
        let constants = PhysicalConstants::default();
        let environment = StubEnvironment {
            safe: Cell::new(true),
        };
        let mut state = descending(1_000.0, -10.0);
        state.deploy_parachute();
        state.lose_parachute();
        autopilot.regulate(&mut state, &constants, &environment).unwrap();
        assert_eq!(state.parachute_status(), ParachuteStatus::Lost);
    }
}
