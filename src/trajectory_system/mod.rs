pub mod dynamics;
pub mod simulation;
