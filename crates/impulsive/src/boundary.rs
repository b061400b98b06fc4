//! Two-point boundary-value solution on a conic of known semi-major axis.
//!
//! Given the radii of two points, the true-anomaly sweep between them, and the
//! conic's semi-major axis, Lambert's geometry fixes the semi-latus rectum, the
//! Lagrange coefficients, and the time of flight. Hyperbolic conics use the
//! `sinh` form of the auxiliary angles, elliptic conics the `sin` form on the
//! short-time branch.

use std::f64::consts::{PI, TAU};

use arrival_core::vector::Vector3;
use arrival_orbits::{GeometryError, checked_asin};

use crate::lagrange::LagrangeCoefficients;

/// Chords shorter than this fraction of r1 + r2 leave the geometry undefined.
const MIN_RELATIVE_CHORD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConicKind {
    Elliptic,
    Hyperbolic,
}

/// Inputs of one boundary-value solve. A negative semi-major axis selects a hyperbola.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryValueProblem {
    pub r1_m: f64,
    pub r2_m: f64,
    /// Sweep from the first point to the second, in [0, 2π).
    pub sweep_rad: f64,
    pub semi_major_axis_m: f64,
    pub mu_m3_s2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryValueSolution {
    pub kind: ConicKind,
    pub chord_m: f64,
    pub semi_perimeter_m: f64,
    /// α (elliptic) or α′ (hyperbolic).
    pub alpha_rad: f64,
    /// β (elliptic) or β′ (hyperbolic), negated for sweeps beyond π.
    pub beta_rad: f64,
    pub semi_latus_rectum_m: f64,
    pub lagrange: LagrangeCoefficients,
    pub time_of_flight_s: f64,
}

impl BoundaryValueSolution {
    /// Velocity at the first point that reaches `r2_m` after the solved sweep.
    pub fn departure_velocity(
        &self,
        r1_m: &Vector3,
        r2_m: &Vector3,
    ) -> Result<Vector3, GeometryError> {
        self.lagrange.initial_velocity(r1_m, r2_m)
    }
}

/// Solve the boundary-value problem described by `problem`.
pub fn solve(problem: &BoundaryValueProblem) -> Result<BoundaryValueSolution, GeometryError> {
    let BoundaryValueProblem {
        r1_m: r1,
        r2_m: r2,
        semi_major_axis_m: a,
        mu_m3_s2: mu,
        ..
    } = *problem;
    if !(r1 > 0.0) || !(r2 > 0.0) {
        return Err(GeometryError::InvalidInput {
            quantity: "boundary radius",
            value: r1.min(r2),
        });
    }
    if !(mu > 0.0) {
        return Err(GeometryError::InvalidInput {
            quantity: "gravitational parameter",
            value: mu,
        });
    }
    if a == 0.0 || !a.is_finite() {
        return Err(GeometryError::InvalidInput {
            quantity: "semi-major axis",
            value: a,
        });
    }

    let sweep = problem.sweep_rad.rem_euclid(TAU);
    let chord_m = (r1 * r1 + r2 * r2 - 2.0 * r1 * r2 * sweep.cos()).max(0.0).sqrt();
    if chord_m <= MIN_RELATIVE_CHORD * (r1 + r2) {
        return Err(GeometryError::Degenerate {
            quantity: "transfer chord",
            magnitude: chord_m,
        });
    }
    let s = 0.5 * (r1 + r2 + chord_m);
    let long_way = sweep > PI;
    let shape = 4.0 * a.abs() * (s - r1) * (s - r2) / (chord_m * chord_m);
    let time_scale = (a.abs().powi(3) / mu).sqrt();

    let (kind, alpha, beta, p, time_of_flight_s) = if a < 0.0 {
        let two_a = 2.0 * a.abs();
        let alpha = 2.0 * (s / two_a).sqrt().asinh();
        let mut beta = 2.0 * ((s - chord_m) / two_a).sqrt().asinh();
        if long_way {
            beta = -beta;
        }
        let p = shape * ((alpha + beta) / 2.0).sinh().powi(2);
        let tof = time_scale * ((alpha.sinh() - alpha) - (beta.sinh() - beta));
        (ConicKind::Hyperbolic, alpha, beta, p, tof)
    } else {
        let two_a = 2.0 * a;
        let alpha = 2.0 * checked_asin("boundary-value alpha", (s / two_a).sqrt())?;
        let mut beta = 2.0 * checked_asin("boundary-value beta", ((s - chord_m) / two_a).sqrt())?;
        if long_way {
            beta = -beta;
        }
        let p = shape * ((alpha + beta) / 2.0).sin().powi(2);
        let tof = time_scale * ((alpha - alpha.sin()) - (beta - beta.sin()));
        (ConicKind::Elliptic, alpha, beta, p, tof)
    };

    if !(p > 0.0) {
        return Err(GeometryError::Degenerate {
            quantity: "semi-latus rectum",
            magnitude: p,
        });
    }

    Ok(BoundaryValueSolution {
        kind,
        chord_m,
        semi_perimeter_m: s,
        alpha_rad: alpha,
        beta_rad: beta,
        semi_latus_rectum_m: p,
        lagrange: LagrangeCoefficients::from_conic(p, r1, r2, sweep, mu),
        time_of_flight_s,
    })
}
