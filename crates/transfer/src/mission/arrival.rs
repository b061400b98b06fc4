//! Arrival asymptote geometry relative to the target body's equator.

use std::f64::consts::FRAC_PI_2;

use arrival_core::body::TargetBody;
use arrival_core::vector::{self, Vector3};
use arrival_orbits::{GeometryError, checked_acos};

/// Declination of the incoming asymptote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalDeclination {
    /// Body north pole in the inertial frame.
    pub north_pole: Vector3,
    /// Angle between the pole and the excess-velocity direction.
    pub pole_angle_rad: f64,
    /// Positive when v∞ points north of the body equator.
    pub declination_rad: f64,
}

impl ArrivalDeclination {
    pub fn declination_deg(&self) -> f64 {
        self.declination_rad.to_degrees()
    }
}

/// Declination of an inertial excess-velocity vector (any units) with respect to `body`'s equator.
pub fn arrival_declination(
    body: &TargetBody,
    v_inf: &Vector3,
) -> Result<ArrivalDeclination, GeometryError> {
    let direction = vector::unit(v_inf).ok_or(GeometryError::Degenerate {
        quantity: "excess velocity",
        magnitude: vector::norm(v_inf),
    })?;
    let north_pole = body.pole.north_pole();
    let pole_angle_rad = checked_acos("asymptote pole angle", vector::dot(&north_pole, &direction))?;
    Ok(ArrivalDeclination {
        north_pole,
        pole_angle_rad,
        declination_rad: FRAC_PI_2 - pole_angle_rad,
    })
}
