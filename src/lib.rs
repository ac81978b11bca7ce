pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::PhysicalConstants;
pub use control::autopilot::Autopilot;
pub use control::environment::{Environment, MarsEnvironment};
pub use control::lander::{ParachuteStatus, SimulationState};
pub use control::scenarios::{load_scenario, Scenario, SCENARIOS};
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::dynamics::{Accelerations, Integrator};
pub use trajectory_system::simulation::{Simulation, StepOutcome};

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightSummary, Telemetry};

// Re-export commonly used utilities
pub use utils::vector3d::Vector3;
