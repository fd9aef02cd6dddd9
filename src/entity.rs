use std::fmt;

use crate::error::SimulationError;
use crate::real::Real;

/// A point mass moving in the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Mass, strictly positive and fixed at construction.
    mass: Real,
    /// Position along x.
    pub x: Real,
    /// Position along y.
    pub y: Real,
    /// Velocity along x.
    pub v_x: Real,
    /// Velocity along y.
    pub v_y: Real,
    /// Acceleration along x accumulated during the current step (reset by `update`).
    pub a_x: Real,
    /// Acceleration along y accumulated during the current step (reset by `update`).
    pub a_y: Real,
}

impl Entity {
    /// Creates an entity at rest at `(x, y)`.
    ///
    /// Fails when `mass` is zero or negative.
    pub fn new(mass: Real, x: Real, y: Real) -> Result<Self, SimulationError> {
        if !mass.is_positive() {
            return Err(SimulationError::NonPositiveMass(mass.to_string()));
        }

        Ok(Self {
            mass,
            x,
            y,
            v_x: Real::zero(),
            v_y: Real::zero(),
            a_x: Real::zero(),
            a_y: Real::zero(),
        })
    }

    pub fn mass(&self) -> &Real {
        &self.mass
    }

    /// Advances the entity by `dt` with semi-implicit Euler integration
    /// (velocity first, then position from the new velocity) and clears the
    /// accumulated acceleration.
    pub fn update(&mut self, dt: &Real) {
        self.v_x += &self.a_x * dt;
        self.v_y += &self.a_y * dt;
        self.x += &self.v_x * dt;
        self.y += &self.v_y * dt;

        self.a_x = Real::zero();
        self.a_y = Real::zero();
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> Real {
        (self.v_x.square() + self.v_y.square()).sqrt()
    }

    /// Direction of travel in degrees, counter-clockwise from the positive x-axis.
    pub fn heading_degrees(&self) -> Real {
        Real::atan2(&self.v_y, &self.v_x).to_degrees()
    }

    /// Linear momentum `m * v`.
    pub fn momentum(&self) -> (Real, Real) {
        (&self.mass * &self.v_x, &self.mass * &self.v_y)
    }
}

/// Renders `p<x>,<y>, v<speed>∠<angle>`; the precision flag picks the
/// significant digits (6 when absent).
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(crate::report::DEFAULT_DIGITS);
        f.write_str(&crate::report::format_entity(self, digits))
    }
}
