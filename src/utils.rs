use crate::entity::Entity;
use crate::error::SimulationError;
use crate::real::Real;

use ftlog::{LevelFilter, LoggerGuard};

/// `(mass, x, y)` of the bodies every run starts from.
const REFERENCE_BODIES: [(i64, i64, i64); 3] = [(1, -1, 0), (1, 1, 0), (2, 1, 1)];

/// Builds the reference three-body configuration: two unit masses on the
/// x-axis and a double mass above the second one, all at rest.
pub fn reference_entities() -> Result<Vec<Entity>, SimulationError> {
    REFERENCE_BODIES
        .iter()
        .map(|&(mass, x, y)| Entity::new(Real::from(mass), Real::from(x), Real::from(y)))
        .collect()
}

/// Configures the logger to write to stderr, keeping stdout for reports.
///
/// # Errors
///
/// - If a global logger was already installed.
pub fn configure_logger(level: LevelFilter) -> Result<LoggerGuard, String> {
    ftlog::Builder::new()
        .max_log_level(level)
        .try_init()
        .map_err(|e| e.to_string())
}
