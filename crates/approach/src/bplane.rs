//! B-plane basis and the periapsis direction it implies.

use arrival_core::frames::AsymptoteAngles;
use arrival_core::vector::{self, Vector3};
use arrival_orbits::GeometryError;

/// B-plane frame {S, T, R} and the aim-point vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BPlane {
    /// Incoming asymptote direction.
    pub s_hat: Vector3,
    /// In the body equator, `S × ẑ`.
    pub t_hat: Vector3,
    /// `S × T`.
    pub r_hat: Vector3,
    /// Aim-point direction, `S × ĥ`.
    pub b_hat: Vector3,
    /// Impact parameter |a|·sqrt(e² − 1).
    pub b_magnitude_m: f64,
    pub b_vector_m: Vector3,
    /// ψ + π/2.
    pub b_plane_angle_rad: f64,
}

impl BPlane {
    pub fn new(
        v_inf_body: &Vector3,
        angular_momentum_hat: &Vector3,
        semi_major_axis_m: f64,
        eccentricity: f64,
        psi_rad: f64,
    ) -> Result<Self, GeometryError> {
        let s_hat = unit_or_degenerate(v_inf_body, "excess velocity")?;
        let t_hat = unit_or_degenerate(&vector::cross(&s_hat, &[0.0, 0.0, 1.0]), "B-plane T axis")?;
        let r_hat = unit_or_degenerate(&vector::cross(&s_hat, &t_hat), "B-plane R axis")?;
        let b_hat = unit_or_degenerate(
            &vector::cross(&s_hat, angular_momentum_hat),
            "B-plane aim direction",
        )?;
        let b_magnitude_m = semi_major_axis_m.abs() * (eccentricity * eccentricity - 1.0).sqrt();
        Ok(Self {
            s_hat,
            t_hat,
            r_hat,
            b_hat,
            b_magnitude_m,
            b_vector_m: vector::scale(&b_hat, b_magnitude_m),
            b_plane_angle_rad: psi_rad + std::f64::consts::FRAC_PI_2,
        })
    }

    /// B·T.
    pub fn b_dot_t(&self) -> f64 {
        vector::dot(&self.b_vector_m, &self.t_hat)
    }

    /// B·R.
    pub fn b_dot_r(&self) -> f64 {
        vector::dot(&self.b_vector_m, &self.r_hat)
    }
}

fn unit_or_degenerate(v: &Vector3, quantity: &'static str) -> Result<Vector3, GeometryError> {
    vector::unit(v).ok_or(GeometryError::Degenerate {
        quantity,
        magnitude: vector::norm(v),
    })
}

/// Periapsis unit vector in the body-fixed frame, composed analytically from
/// (φ1, φ2, β, ψ).
pub fn periapsis_unit_closed_form(
    angles: &AsymptoteAngles,
    turn_half_angle_rad: f64,
    psi_rad: f64,
) -> Vector3 {
    let (s1, c1) = angles.phi_1_rad.sin_cos();
    let (s2, c2) = angles.phi_2_rad.sin_cos();
    let (sb, cb) = turn_half_angle_rad.sin_cos();
    let (sp, cp) = psi_rad.sin_cos();
    let in_plane = sb * cp * c2 + cb * s2;
    [
        c1 * in_plane - s1 * sb * sp,
        s1 * in_plane + c1 * sb * sp,
        cb * c2 - sb * cp * s2,
    ]
}

/// The same vector, built in the asymptote frame and rotated back through the DCM chain.
pub fn periapsis_unit_by_rotation(
    angles: &AsymptoteAngles,
    turn_half_angle_rad: f64,
    psi_rad: f64,
) -> Vector3 {
    let (sb, cb) = turn_half_angle_rad.sin_cos();
    let (sp, cp) = psi_rad.sin_cos();
    angles.from_asymptote_frame(&[sb * cp, sb * sp, cb])
}
