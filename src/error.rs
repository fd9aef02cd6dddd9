use std::fmt;

/// Errors raised while building or advancing a simulation.
#[derive(Debug)]
pub enum SimulationError {
    /// An entity was constructed with a mass that is zero or negative.
    NonPositiveMass(String),
    /// Two entities occupy the same position, so the attraction between them is unbounded.
    CoincidentPositions,
    /// Two entities of a running simulation met at the same position.
    Collision {
        step: usize,
        first: usize,
        second: usize,
    },
    /// A configuration value is outside its allowed range.
    InvalidConfig(String),
    /// A decimal literal could not be parsed.
    InvalidNumber(String),
    /// Writing a report failed.
    Io(std::io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass(mass) => write!(f, "entity mass must be positive, got {mass}"),
            Self::CoincidentPositions => write!(f, "entities share a position, attraction is undefined"),
            Self::Collision { step, first, second } => {
                write!(f, "entities {first} and {second} coincide at step {step}")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            Self::InvalidNumber(literal) => write!(f, "not a decimal number: {literal:?}"),
            Self::Io(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
