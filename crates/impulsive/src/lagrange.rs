//! Lagrange f, g coefficients relating two points of the same conic.

use arrival_core::vector::{self, Vector3};
use arrival_orbits::GeometryError;

/// Below a microsecond the two points coincide along the conic.
const MIN_G_S: f64 = 1e-6;

/// `r2 = f·r1 + g·v1` and `v2 = ḟ·r1 + ġ·v1` for a sweep Δθ along one conic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangeCoefficients {
    pub f: f64,
    pub g: f64,
    pub f_dot: f64,
    pub g_dot: f64,
}

impl LagrangeCoefficients {
    /// Coefficients from the semi-latus rectum, both radii, and the true-anomaly sweep.
    ///
    /// A zero sweep (or a whole revolution) gives f = 1, g = 0.
    pub fn from_conic(
        semi_latus_rectum_m: f64,
        r1_m: f64,
        r2_m: f64,
        sweep_rad: f64,
        mu_m3_s2: f64,
    ) -> Self {
        let p = semi_latus_rectum_m;
        let (s, c) = sweep_rad.sin_cos();
        let one_minus_cos = 1.0 - c;
        let f = 1.0 - (r2_m / p) * one_minus_cos;
        let g = r1_m * r2_m * s / (mu_m3_s2 * p).sqrt();
        let f_dot = (mu_m3_s2 / p).sqrt() * (sweep_rad / 2.0).tan()
            * (one_minus_cos / p - 1.0 / r1_m - 1.0 / r2_m);
        let g_dot = 1.0 - (r1_m / p) * one_minus_cos;
        Self { f, g, f_dot, g_dot }
    }

    /// Velocity at the first point that carries it onto the second, `(r2 − f·r1)/g`.
    pub fn initial_velocity(
        &self,
        r1_m: &Vector3,
        r2_m: &Vector3,
    ) -> Result<Vector3, GeometryError> {
        if !(self.g.abs() > MIN_G_S) {
            return Err(GeometryError::Degenerate {
                quantity: "Lagrange g coefficient",
                magnitude: self.g,
            });
        }
        Ok(vector::scale(
            &vector::sub(r2_m, &vector::scale(r1_m, self.f)),
            1.0 / self.g,
        ))
    }

    /// Velocity at the second point, `ḟ·r1 + ġ·v1`.
    pub fn final_velocity(&self, r1_m: &Vector3, v1_m_s: &Vector3) -> Vector3 {
        vector::add(
            &vector::scale(r1_m, self.f_dot),
            &vector::scale(v1_m_s, self.g_dot),
        )
    }

    /// `f·ġ − ḟ·g`, which equals one for any consistent set.
    pub fn determinant(&self) -> f64 {
        self.f * self.g_dot - self.f_dot * self.g
    }
}
