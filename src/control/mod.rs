pub mod attitude;
pub mod autopilot;
pub mod environment;
pub mod lander;
pub mod scenarios;
