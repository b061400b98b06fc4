//! Hyperbolic approach model: turns an excess-velocity vector, a periapsis radius, and a
//! B-plane targeting angle into a fully oriented arrival hyperbola.

pub mod bplane;
mod orbit;

pub use bplane::{BPlane, periapsis_unit_by_rotation, periapsis_unit_closed_form};
pub use orbit::{ApproachOrbit, ApproachTargeting};
