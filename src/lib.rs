pub mod entity;
pub mod error;
pub mod gravity;
pub mod real;
pub mod report;
pub mod simulation;
pub mod utils;

pub use entity::Entity;
pub use error::SimulationError;
pub use real::Real;
pub use report::ReportSchedule;
pub use simulation::{RunSummary, Simulation, SimulationConfig};
