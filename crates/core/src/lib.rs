//! Core units, constants, frames, and shared primitives for the arrival targeting workspace.

/// Scale factors between the kilometre/day inputs and the SI values used internally.
pub mod constants {
    pub const METRES_PER_KM: f64 = 1_000.0;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Length and speed conversions; inputs arrive in km and km/s, models run in m and m/s.
pub mod units {
    use super::constants::METRES_PER_KM;

    #[inline]
    pub fn km_to_m(km: f64) -> f64 {
        km * METRES_PER_KM
    }

    #[inline]
    pub fn m_to_km(m: f64) -> f64 {
        m / METRES_PER_KM
    }

    #[inline]
    pub fn kms_to_ms(km_s: f64) -> f64 {
        km_s * METRES_PER_KM
    }

    #[inline]
    pub fn ms_to_kms(m_s: f64) -> f64 {
        m_s / METRES_PER_KM
    }
}

/// Durations for reporting; every model computes in seconds.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

    #[inline]
    pub fn seconds_to_hours(seconds: f64) -> f64 {
        seconds / SECONDS_PER_HOUR
    }

    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

/// Free functions over `[f64; 3]`; models keep positions in m and velocities in m/s.
pub mod vector {
    pub type Vector3 = [f64; 3];

    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Right-handed `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        std::array::from_fn(|k| a[k] + b[k])
    }

    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        std::array::from_fn(|k| a[k] - b[k])
    }

    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        v.map(|x| x * s)
    }

    /// Unit vector along `v`, or `None` when `v` has no usable direction.
    #[inline]
    pub fn unit(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        if n > f64::MIN_POSITIVE && n.is_finite() {
            Some(scale(v, 1.0 / n))
        } else {
            None
        }
    }
}

/// Direction-cosine matrices and the frame chain used for arrival geometry.
///
/// The rotations are passive: `rotation(axis, t) * v` expresses `v` in a frame
/// rotated by `t` about `axis`. Inertial vectors are first taken into the
/// body-fixed inertial frame (pole along +z), then into the asymptote frame
/// whose +z axis lies along the hyperbolic excess velocity.
pub mod frames {
    use super::vector::Vector3;

    /// Row-major 3×3 matrix.
    pub type Matrix3 = [[f64; 3]; 3];

    /// Principal axis of an elementary rotation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Axis {
        X,
        Y,
        Z,
    }

    /// Direction-cosine matrix for a right-handed rotation by `angle_rad` about `axis`.
    pub fn rotation(axis: Axis, angle_rad: f64) -> Matrix3 {
        let (s, c) = angle_rad.sin_cos();
        match axis {
            Axis::X => [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]],
            Axis::Y => [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]],
            Axis::Z => [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    #[inline]
    pub fn mat_vec(m: &Matrix3, v: &Vector3) -> Vector3 {
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn mat_mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        out
    }

    pub fn transpose(m: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in m.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                out[j][i] = *value;
            }
        }
        out
    }

    /// Orientation of a body's north pole in the inertial (ICRF) frame.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct PoleOrientation {
        pub right_ascension_rad: f64,
        pub declination_rad: f64,
    }

    impl PoleOrientation {
        pub fn from_degrees(right_ascension_deg: f64, declination_deg: f64) -> Self {
            Self {
                right_ascension_rad: right_ascension_deg.to_radians(),
                declination_rad: declination_deg.to_radians(),
            }
        }

        /// Inertial → body-fixed inertial DCM, `R_x(π/2 − d0) · R_z(π/2 + a0)`.
        pub fn inertial_to_body(&self) -> Matrix3 {
            mat_mul(
                &rotation(Axis::X, std::f64::consts::FRAC_PI_2 - self.declination_rad),
                &rotation(Axis::Z, std::f64::consts::FRAC_PI_2 + self.right_ascension_rad),
            )
        }

        /// Express an inertial vector in the body-fixed inertial frame.
        pub fn to_body_fixed(&self, v: &Vector3) -> Vector3 {
            mat_vec(&self.inertial_to_body(), v)
        }

        /// Unit vector of the north pole in inertial coordinates.
        pub fn north_pole(&self) -> Vector3 {
            let (sa, ca) = self.right_ascension_rad.sin_cos();
            let (sd, cd) = self.declination_rad.sin_cos();
            [cd * ca, cd * sa, sd]
        }
    }

    /// Angles that carry the body-fixed frame onto the asymptote frame.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct AsymptoteAngles {
        /// Rotation about body-fixed z that zeroes the y component of v∞.
        pub phi_1_rad: f64,
        /// Rotation about the intermediate y axis that aligns v∞ with +z.
        pub phi_2_rad: f64,
    }

    impl AsymptoteAngles {
        /// Derive the angles from a body-fixed excess-velocity vector (any non-zero magnitude).
        pub fn from_excess_velocity(v_inf_body: &Vector3) -> Self {
            let phi_1_rad = v_inf_body[1].atan2(v_inf_body[0]);
            let intermediate = mat_vec(&rotation(Axis::Z, phi_1_rad), v_inf_body);
            let phi_2_rad = intermediate[0].atan2(intermediate[2]);
            Self {
                phi_1_rad,
                phi_2_rad,
            }
        }

        /// Body-fixed → asymptote frame DCM, `R_y(φ2) · R_z(φ1)`.
        pub fn body_to_asymptote(&self) -> Matrix3 {
            mat_mul(
                &rotation(Axis::Y, self.phi_2_rad),
                &rotation(Axis::Z, self.phi_1_rad),
            )
        }

        pub fn to_asymptote_frame(&self, v: &Vector3) -> Vector3 {
            mat_vec(&self.body_to_asymptote(), v)
        }

        pub fn from_asymptote_frame(&self, v: &Vector3) -> Vector3 {
            mat_vec(&transpose(&self.body_to_asymptote()), v)
        }
    }

}

/// Target-body constants consumed by every orbit model.
pub mod body {
    use super::frames::PoleOrientation;

    /// Immutable physical constants of the body being approached.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct TargetBody {
        /// Gravitational parameter (m³/s²).
        pub mu_m3_s2: f64,
        /// Mean equatorial radius (m).
        pub radius_m: f64,
        /// Sidereal rotation rate about the pole (rad/s), negative for retrograde rotators.
        pub rotation_rate_rad_s: f64,
        pub pole: PoleOrientation,
        /// Altitude of the atmospheric entry interface (m).
        pub entry_interface_altitude_m: f64,
    }

    impl TargetBody {
        /// Radius of a point at `altitude_m` above the mean surface.
        #[inline]
        pub fn radius_at_altitude(&self, altitude_m: f64) -> f64 {
            self.radius_m + altitude_m
        }
    }
}
