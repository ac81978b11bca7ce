use crate::constants::PhysicalConstants;
use crate::control::autopilot::Autopilot;
use crate::control::environment::Environment;
use crate::control::lander::SimulationState;
use crate::errors::SimulationError;
use crate::telemetry_system::telemetry::{FlightSummary, Telemetry};
use crate::trajectory_system::dynamics::Integrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Flying,
    Touchdown,
}

/// Tick loop around the integrator: advances time, tears off an overloaded
/// parachute, records telemetry and stops at the surface.
pub struct Simulation<E: Environment> {
    pub state: SimulationState,
    pub integrator: Integrator,
    pub environment: E,
    pub telemetry: Telemetry,
}

impl<E: Environment> Simulation<E> {
    pub fn new(
        state: SimulationState,
        constants: PhysicalConstants,
        environment: E,
    ) -> Result<Self, SimulationError> {
        Self::with_autopilot(state, constants, Autopilot::default(), environment)
    }

    pub fn with_autopilot(
        state: SimulationState,
        constants: PhysicalConstants,
        autopilot: Autopilot,
        environment: E,
    ) -> Result<Self, SimulationError> {
        constants.validate()?;
        state.validate()?;

        let mut telemetry = Telemetry::default();
        telemetry.collect_data(&state, constants.planet_radius);

        Ok(Simulation {
            state,
            integrator: Integrator::new(constants, autopilot),
            environment,
            telemetry,
        })
    }

    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self.telemetry
            .collect_data(&self.state, self.integrator.constants.planet_radius);
        self
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.integrator.constants
    }

    pub fn altitude(&self) -> f64 {
        self.state.altitude(self.constants().planet_radius)
    }

    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        self.integrator.advance(&mut self.state, &self.environment)?;

        if !self.environment.safe_to_deploy_parachute(&self.state) && self.state.lose_parachute()
        {
            log::warn!(
                "Parachute lost at t={:.1}s, altitude {:.0} m",
                self.state.time + self.state.delta_t,
                self.altitude()
            );
        }

        self.state.time += self.state.delta_t;
        let planet_radius = self.constants().planet_radius;
        self.telemetry.collect_data(&self.state, planet_radius);

        if self.altitude() <= 0.0 {
            self.telemetry.mark_touchdown();
            log::info!(
                "Touchdown at t={:.1}s, speed {:.2} m/s",
                self.state.time,
                self.state.velocity.magnitude()
            );
            return Ok(StepOutcome::Touchdown);
        }
        Ok(StepOutcome::Flying)
    }

    /// Steps until touchdown or until `max_time` seconds have elapsed.
    pub fn run(&mut self, max_time: f64) -> Result<FlightSummary, SimulationError> {
        log::info!(
            "Running from altitude {:.0} m for up to {:.0} s (dt = {} s)",
            self.altitude(),
            max_time,
            self.state.delta_t
        );

        while self.state.time < max_time {
            if self.step()? == StepOutcome::Touchdown {
                break;
            }
        }

        let summary = self.telemetry.summary();
        log::info!(
            "Finished at t={:.1}s, altitude {:.0} m",
            summary.duration,
            self.altitude()
        );
        Ok(summary)
    }
}
