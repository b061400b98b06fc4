use std::f64::consts::TAU;

use crate::GeometryError;

/// Arguments this far past ±1 are treated as rounding noise and snapped.
const ROUNDING_ALLOWANCE: f64 = 1e-12;

fn unit_interval(quantity: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value.abs() <= 1.0 {
        Ok(value)
    } else if value.is_finite() && value.abs() <= 1.0 + ROUNDING_ALLOWANCE {
        Ok(value.signum())
    } else {
        Err(GeometryError::OutOfDomain { quantity, value })
    }
}

/// `acos` that refuses arguments outside [-1, 1] instead of returning NaN.
pub fn checked_acos(quantity: &'static str, value: f64) -> Result<f64, GeometryError> {
    unit_interval(quantity, value).map(f64::acos)
}

/// `asin` that refuses arguments outside [-1, 1] instead of returning NaN.
pub fn checked_asin(quantity: &'static str, value: f64) -> Result<f64, GeometryError> {
    unit_interval(quantity, value).map(f64::asin)
}

/// Recover an angle in [0, 2π) from its cosine and the sign of a companion component.
///
/// `acos` alone cannot tell θ from 2π − θ; a negative `sign_component`
/// selects the second half of the circle.
pub fn angle_from_cosine_and_sign(
    quantity: &'static str,
    cosine: f64,
    sign_component: f64,
) -> Result<f64, GeometryError> {
    let principal = checked_acos(quantity, cosine)?;
    if sign_component >= 0.0 {
        Ok(principal)
    } else {
        Ok((TAU - principal) % TAU)
    }
}
