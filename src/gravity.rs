//! Newtonian gravity between pairs of entities.
//!
//! The attraction between two point masses has magnitude
//!
//! **F = G * (m₁ * m₂) / r²**
//!
//! and acts along the line joining them. [`attraction`] computes the scalar,
//! [`force_components`] resolves it along that line and [`accumulate`] turns
//! it into equal and opposite accelerations.

use crate::entity::Entity;
use crate::error::SimulationError;
use crate::real::Real;

/// Gravitational constant in SI units (m³/(kg⋅s²)), CODATA 2018: 6.67430e-11.
pub fn gravitational_constant() -> Real {
    Real::from_parts(667_430, -16)
}

/// Magnitude of the gravitational attraction between `a` and `b`.
///
/// The mass product is formed first so the result is the same for either
/// argument order. Fails when the entities share a position.
pub fn attraction(g: &Real, a: &Entity, b: &Entity) -> Result<Real, SimulationError> {
    let dx = &b.x - &a.x;
    let dy = &b.y - &a.y;
    let d_squared = dx.square() + dy.square();
    if d_squared.is_zero() {
        return Err(SimulationError::CoincidentPositions);
    }

    Ok(g * &(a.mass() * b.mass()) / d_squared)
}

/// Resolves `force` into `(f_x, f_y)` along the direction from `entity_2` to `entity_1`.
///
/// This is `force * (cos θ, sin θ)` with `θ = atan2(dy, dx)`, evaluated as
/// `force * (dx, dy) / d`.
pub fn force_components(
    entity_1: &Entity,
    entity_2: &Entity,
    force: &Real,
) -> Result<(Real, Real), SimulationError> {
    let dx = &entity_1.x - &entity_2.x;
    let dy = &entity_1.y - &entity_2.y;
    let distance = (dx.square() + dy.square()).sqrt();
    if distance.is_zero() {
        return Err(SimulationError::CoincidentPositions);
    }

    Ok((force * &dx / &distance, force * &dy / &distance))
}

/// Adds the acceleration produced by `(f_x, f_y)` to both entities:
/// `entity_1` is pulled toward `entity_2` and `entity_2` toward `entity_1`.
pub fn accumulate(entity_1: &mut Entity, entity_2: &mut Entity, (f_x, f_y): &(Real, Real)) {
    let (d1_x, d1_y) = (f_x / entity_1.mass(), f_y / entity_1.mass());
    let (d2_x, d2_y) = (f_x / entity_2.mass(), f_y / entity_2.mass());
    entity_1.a_x -= d1_x;
    entity_1.a_y -= d1_y;
    entity_2.a_x += d2_x;
    entity_2.a_y += d2_y;
}

/// Applies an attraction of magnitude `force` to both entities.
pub fn apply_force(entity_1: &mut Entity, entity_2: &mut Entity, force: &Real) -> Result<(), SimulationError> {
    let components = force_components(entity_1, entity_2, force)?;
    accumulate(entity_1, entity_2, &components);
    Ok(())
}
