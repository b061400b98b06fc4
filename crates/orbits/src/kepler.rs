//! Kepler's equation for elliptic and hyperbolic conics, solved with Newton's method.

use std::f64::consts::TAU;

use crate::GeometryError;

const TOLERANCE: f64 = 1e-13;
const MAX_ITERATIONS: usize = 60;

/// Solve `M = E − e·sin(E)` for the eccentric anomaly E.
///
/// The mean anomaly is reduced to [0, 2π) first; the result keeps the caller's
/// revolution count so `E − M` stays small.
pub fn solve_elliptic(mean_anomaly: f64, eccentricity: f64) -> Result<f64, GeometryError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(GeometryError::InvalidInput {
            quantity: "elliptic eccentricity",
            value: eccentricity,
        });
    }
    let revolutions = (mean_anomaly / TAU).floor();
    let m = mean_anomaly - revolutions * TAU;

    // E = M is fine for low e; π avoids the flat spot near periapsis for high e.
    let mut big_e = if eccentricity < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..MAX_ITERATIONS {
        let f = big_e - eccentricity * big_e.sin() - m;
        let f_prime = 1.0 - eccentricity * big_e.cos();
        let delta = f / f_prime;
        big_e -= delta;
        if delta.abs() < TOLERANCE {
            return Ok(big_e + revolutions * TAU);
        }
    }
    Err(GeometryError::NoConvergence {
        solver: "elliptic Kepler equation",
        iterations: MAX_ITERATIONS,
    })
}

/// Solve `M = e·sinh(H) − H` for the hyperbolic anomaly H.
pub fn solve_hyperbolic(mean_anomaly: f64, eccentricity: f64) -> Result<f64, GeometryError> {
    if !(eccentricity > 1.0) {
        return Err(GeometryError::NotHyperbolic { eccentricity });
    }
    let mut big_h = (mean_anomaly / eccentricity).asinh();
    for _ in 0..MAX_ITERATIONS {
        let f = eccentricity * big_h.sinh() - big_h - mean_anomaly;
        let f_prime = eccentricity * big_h.cosh() - 1.0;
        let delta = f / f_prime;
        big_h -= delta;
        if delta.abs() < TOLERANCE * (1.0 + big_h.abs()) {
            return Ok(big_h);
        }
    }
    Err(GeometryError::NoConvergence {
        solver: "hyperbolic Kepler equation",
        iterations: MAX_ITERATIONS,
    })
}

/// Eccentric anomaly for a true anomaly in (−π, π].
pub fn eccentric_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * ((1.0 - eccentricity).sqrt() * half.sin()).atan2((1.0 + eccentricity).sqrt() * half.cos())
}

pub fn true_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Hyperbolic anomaly, `H = 2·atanh(sqrt((e−1)/(e+1))·tan(θ/2))`.
pub fn hyperbolic_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    2.0 * (((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt() * (true_anomaly / 2.0).tan()).atanh()
}

pub fn true_from_hyperbolic(hyperbolic_anomaly: f64, eccentricity: f64) -> f64 {
    2.0 * (((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt() * (hyperbolic_anomaly / 2.0).tanh())
        .atan()
}
