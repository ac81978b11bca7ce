use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Degenerate geometry: {quantity} vector has zero or non-finite length")]
    DegenerateVector { quantity: &'static str },

    #[error("Invalid constant {name} = {value}")]
    InvalidConstant { name: &'static str, value: f64 },

    #[error("Invalid state: {field} {reason}")]
    InvalidState {
        field: &'static str,
        reason: String,
    },

    #[error("Unknown scenario {0}, expected an index in 0..10")]
    UnknownScenario(usize),

    #[error("Scenario {0} is reserved and has no initial conditions")]
    ReservedScenario(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimulationError {
    pub(crate) fn invalid_state(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidState {
            field,
            reason: reason.into(),
        }
    }
}
