use std::f64::consts::{PI, TAU};

use arrival_core::vector::{self, Vector3};

use crate::kepler;
use crate::{GeometryError, angle_from_cosine_and_sign, checked_acos};

/// Relative magnitude below which a vector or energy is considered degenerate.
const DEGENERATE_RELATIVE: f64 = 1e-12;
/// Eccentricity below which the apsidal line (and so ω) is undefined.
const CIRCULAR_ECCENTRICITY: f64 = 1e-10;

/// Which half of the conic a radius is crossed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Approaching periapsis, negative true anomaly.
    Inbound,
    /// Receding from periapsis, positive true anomaly.
    Outbound,
}

/// Classical elements of an elliptic or hyperbolic two-body conic.
///
/// Distances are metres, angles radians. `semi_major_axis_m` is negative for
/// hyperbolas. The gravitational parameter travels with the elements so every
/// orbit value can be propagated on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicElements {
    pub semi_major_axis_m: f64,
    pub eccentricity: f64,
    /// Specific angular momentum magnitude (m²/s).
    pub angular_momentum_m2_s: f64,
    pub inclination_rad: f64,
    /// Right ascension of the ascending node.
    pub raan_rad: f64,
    pub arg_periapsis_rad: f64,
    pub mu_m3_s2: f64,
}

/// Elements recovered from a state vector, plus where on the conic that state sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateElements {
    pub elements: ConicElements,
    /// [0, 2π) for ellipses, (−π, π) for hyperbolas.
    pub true_anomaly_rad: f64,
}

/// Position and velocity sampled at one true anomaly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSample {
    pub true_anomaly_rad: f64,
    pub position_m: Vector3,
    pub velocity_m_s: Vector3,
}

impl StateSample {
    pub fn radius_m(&self) -> f64 {
        vector::norm(&self.position_m)
    }

    pub fn speed_m_s(&self) -> f64 {
        vector::norm(&self.velocity_m_s)
    }
}

impl ConicElements {
    /// Build elements from shape and orientation; angular momentum follows from `a`, `e`, and μ.
    pub fn from_shape(
        mu_m3_s2: f64,
        semi_major_axis_m: f64,
        eccentricity: f64,
        inclination_rad: f64,
        raan_rad: f64,
        arg_periapsis_rad: f64,
    ) -> Result<Self, GeometryError> {
        if !(mu_m3_s2 > 0.0) {
            return Err(GeometryError::InvalidInput {
                quantity: "gravitational parameter",
                value: mu_m3_s2,
            });
        }
        if !(eccentricity >= 0.0) || (eccentricity - 1.0).abs() < DEGENERATE_RELATIVE {
            return Err(GeometryError::Degenerate {
                quantity: "eccentricity",
                magnitude: eccentricity,
            });
        }
        let consistent = if eccentricity < 1.0 {
            semi_major_axis_m > 0.0
        } else {
            semi_major_axis_m < 0.0
        };
        if !consistent || !semi_major_axis_m.is_finite() {
            return Err(GeometryError::InvalidInput {
                quantity: "semi-major axis",
                value: semi_major_axis_m,
            });
        }

        let angular_momentum_m2_s =
            (semi_major_axis_m * mu_m3_s2 * (1.0 - eccentricity * eccentricity)).sqrt();
        Ok(Self {
            semi_major_axis_m,
            eccentricity,
            angular_momentum_m2_s,
            inclination_rad,
            raan_rad,
            arg_periapsis_rad,
            mu_m3_s2,
        })
    }

    /// Recover elements from an inertial position/velocity pair.
    ///
    /// Inclination comes from the angular-momentum direction, Ω from the node
    /// vector, ω and θ from the eccentricity vector; each quadrant is resolved
    /// with [`angle_from_cosine_and_sign`]. Equatorial orbits report Ω = 0 and
    /// measure ω from the x axis.
    pub fn from_state(
        position_m: &Vector3,
        velocity_m_s: &Vector3,
        mu_m3_s2: f64,
    ) -> Result<StateElements, GeometryError> {
        let r = vector::norm(position_m);
        let v = vector::norm(velocity_m_s);
        if !(r > 0.0) || !r.is_finite() {
            return Err(GeometryError::Degenerate {
                quantity: "position",
                magnitude: r,
            });
        }

        let h_vec = vector::cross(position_m, velocity_m_s);
        let h = vector::norm(&h_vec);
        if !(h > DEGENERATE_RELATIVE * r * v) {
            return Err(GeometryError::Degenerate {
                quantity: "angular momentum",
                magnitude: h,
            });
        }
        let h_hat = vector::scale(&h_vec, 1.0 / h);
        let inclination_rad = checked_acos("inclination", h_hat[2])?;

        // Equatorial orbits have no node line: Ω is pinned to zero and the node
        // direction falls back to x̂.
        let node = vector::cross(&[0.0, 0.0, 1.0], &h_vec);
        let node_norm = vector::norm(&node);
        let equatorial = node_norm <= DEGENERATE_RELATIVE * h;
        let (node_hat, raan_rad) = if equatorial {
            ([1.0, 0.0, 0.0], 0.0)
        } else {
            let node_hat = vector::scale(&node, 1.0 / node_norm);
            let raan_rad = angle_from_cosine_and_sign(
                "right ascension of ascending node",
                node_hat[0],
                node_hat[1],
            )?;
            (node_hat, raan_rad)
        };

        let kinetic = 0.5 * v * v;
        let potential = mu_m3_s2 / r;
        let energy = kinetic - potential;
        if energy.abs() <= DEGENERATE_RELATIVE * (kinetic + potential) {
            return Err(GeometryError::Degenerate {
                quantity: "orbital energy",
                magnitude: energy,
            });
        }
        let semi_major_axis_m = -mu_m3_s2 / (2.0 * energy);

        let radial_rate = vector::dot(position_m, velocity_m_s);
        let e_vec = vector::scale(
            &vector::sub(
                &vector::scale(position_m, v * v - potential),
                &vector::scale(velocity_m_s, radial_rate),
            ),
            1.0 / mu_m3_s2,
        );
        let eccentricity = vector::norm(&e_vec);
        if eccentricity < CIRCULAR_ECCENTRICITY {
            return Err(GeometryError::Degenerate {
                quantity: "eccentricity vector",
                magnitude: eccentricity,
            });
        }
        let e_hat = vector::scale(&e_vec, 1.0 / eccentricity);
        // In the equatorial plane ω runs with the motion, so a retrograde orbit
        // measures it clockwise from x̂.
        let periapsis_sign = if equatorial {
            e_hat[1] * h_hat[2].signum()
        } else {
            e_hat[2]
        };
        let arg_periapsis_rad = angle_from_cosine_and_sign(
            "argument of periapsis",
            vector::dot(&node_hat, &e_hat),
            periapsis_sign,
        )?;

        let r_hat = vector::scale(position_m, 1.0 / r);
        let mut true_anomaly_rad =
            angle_from_cosine_and_sign("true anomaly", vector::dot(&e_hat, &r_hat), radial_rate)?;
        if eccentricity > 1.0 && true_anomaly_rad > PI {
            true_anomaly_rad -= TAU;
        }

        Ok(StateElements {
            elements: Self {
                semi_major_axis_m,
                eccentricity,
                angular_momentum_m2_s: h,
                inclination_rad,
                raan_rad,
                arg_periapsis_rad,
                mu_m3_s2,
            },
            true_anomaly_rad,
        })
    }

    pub fn is_hyperbolic(&self) -> bool {
        self.eccentricity > 1.0
    }

    /// p = h²/μ.
    pub fn semi_latus_rectum(&self) -> f64 {
        self.angular_momentum_m2_s * self.angular_momentum_m2_s / self.mu_m3_s2
    }

    pub fn periapsis_radius(&self) -> f64 {
        self.semi_major_axis_m * (1.0 - self.eccentricity)
    }

    /// `None` for open conics.
    pub fn apoapsis_radius(&self) -> Option<f64> {
        (!self.is_hyperbolic()).then(|| self.semi_major_axis_m * (1.0 + self.eccentricity))
    }

    pub fn period_s(&self) -> Option<f64> {
        (!self.is_hyperbolic())
            .then(|| TAU * (self.semi_major_axis_m.powi(3) / self.mu_m3_s2).sqrt())
    }

    /// Specific orbital energy (J/kg).
    pub fn specific_energy(&self) -> f64 {
        -self.mu_m3_s2 / (2.0 * self.semi_major_axis_m)
    }

    /// True anomaly of the outbound asymptote, for hyperbolas.
    pub fn asymptote_true_anomaly(&self) -> Option<f64> {
        self.is_hyperbolic()
            .then(|| (-1.0 / self.eccentricity).acos())
    }

    pub fn radius_at(&self, true_anomaly_rad: f64) -> f64 {
        self.semi_latus_rectum() / (1.0 + self.eccentricity * true_anomaly_rad.cos())
    }

    /// Unit radial vector at `true_anomaly_rad`, from (Ω, ω + θ, i).
    pub fn radial_unit_at(&self, true_anomaly_rad: f64) -> Vector3 {
        let (so, co) = self.raan_rad.sin_cos();
        let (si, ci) = self.inclination_rad.sin_cos();
        let (st, ct) = (self.arg_periapsis_rad + true_anomaly_rad).sin_cos();
        [
            co * ct - so * ci * st,
            so * ct + co * ci * st,
            si * st,
        ]
    }

    pub fn position_at(&self, true_anomaly_rad: f64) -> Vector3 {
        vector::scale(
            &self.radial_unit_at(true_anomaly_rad),
            self.radius_at(true_anomaly_rad),
        )
    }

    pub fn periapsis_position(&self) -> Vector3 {
        self.position_at(0.0)
    }

    pub fn periapsis_unit(&self) -> Vector3 {
        self.radial_unit_at(0.0)
    }

    /// Vis-viva speed at `true_anomaly_rad`.
    pub fn speed_at(&self, true_anomaly_rad: f64) -> f64 {
        let r = self.radius_at(true_anomaly_rad);
        (self.mu_m3_s2 * (2.0 / r - 1.0 / self.semi_major_axis_m)).sqrt()
    }

    /// Flight-path angle γ: negative inbound, positive outbound, zero at both apsides.
    pub fn flight_path_angle_at(&self, true_anomaly_rad: f64) -> f64 {
        let (s, c) = true_anomaly_rad.sin_cos();
        (self.eccentricity * s).atan2(1.0 + self.eccentricity * c)
    }

    /// Inertial velocity at `true_anomaly_rad`, split into radial and transverse parts by γ.
    pub fn velocity_at(&self, true_anomaly_rad: f64) -> Vector3 {
        let speed = self.speed_at(true_anomaly_rad);
        let (sg, cg) = self.flight_path_angle_at(true_anomaly_rad).sin_cos();
        let v_radial = speed * sg;
        let v_transverse = speed * cg;

        let (so, co) = self.raan_rad.sin_cos();
        let (si, ci) = self.inclination_rad.sin_cos();
        let (st, ct) = (self.arg_periapsis_rad + true_anomaly_rad).sin_cos();
        [
            v_radial * (ct * co - st * ci * so) + v_transverse * (-st * co - ct * ci * so),
            v_radial * (ct * so + st * ci * co) + v_transverse * (ct * ci * co - st * so),
            v_radial * st * si + v_transverse * ct * si,
        ]
    }

    /// True anomaly where the conic crosses `radius_m` on the requested branch.
    ///
    /// Fails with [`GeometryError::OutOfDomain`] when the radius is never reached.
    pub fn true_anomaly_at_radius(
        &self,
        radius_m: f64,
        branch: Branch,
    ) -> Result<f64, GeometryError> {
        if !(radius_m > 0.0) {
            return Err(GeometryError::InvalidInput {
                quantity: "radius",
                value: radius_m,
            });
        }
        if self.eccentricity < CIRCULAR_ECCENTRICITY {
            return Err(GeometryError::Degenerate {
                quantity: "eccentricity",
                magnitude: self.eccentricity,
            });
        }
        let cosine = (self.semi_latus_rectum() / radius_m - 1.0) / self.eccentricity;
        let theta = checked_acos("true anomaly at radius", cosine)?;
        Ok(match branch {
            Branch::Inbound => -theta,
            Branch::Outbound => theta,
        })
    }

    /// Position and velocity at one true anomaly, refusing points past a hyperbola's asymptote.
    pub fn state_at(&self, true_anomaly_rad: f64) -> Result<StateSample, GeometryError> {
        if 1.0 + self.eccentricity * true_anomaly_rad.cos() <= 0.0 {
            return Err(GeometryError::BeyondAsymptote { true_anomaly_rad });
        }
        Ok(StateSample {
            true_anomaly_rad,
            position_m: self.position_at(true_anomaly_rad),
            velocity_m_s: self.velocity_at(true_anomaly_rad),
        })
    }

    /// Sample the conic at caller-supplied true anomalies.
    pub fn sample(&self, true_anomalies_rad: &[f64]) -> Result<Vec<StateSample>, GeometryError> {
        true_anomalies_rad
            .iter()
            .map(|&theta| self.state_at(theta))
            .collect()
    }

    /// Signed time from periapsis to `true_anomaly_rad` (negative before periapsis).
    ///
    /// For ellipses the anomaly is taken modulo one revolution, so the result lies
    /// in (−T/2, T/2].
    pub fn time_since_periapsis(&self, true_anomaly_rad: f64) -> Result<f64, GeometryError> {
        let e = self.eccentricity;
        let a = self.semi_major_axis_m.abs();
        let time_scale = (a.powi(3) / self.mu_m3_s2).sqrt();
        if self.is_hyperbolic() {
            if 1.0 + e * true_anomaly_rad.cos() <= 0.0 {
                return Err(GeometryError::BeyondAsymptote { true_anomaly_rad });
            }
            let big_h = kepler::hyperbolic_from_true(true_anomaly_rad, e);
            Ok(time_scale * (e * big_h.sinh() - big_h))
        } else {
            let wrapped = (true_anomaly_rad + PI).rem_euclid(TAU) - PI;
            let big_e = kepler::eccentric_from_true(wrapped, e);
            Ok(time_scale * (big_e - e * big_e.sin()))
        }
    }

    /// Coast time from `from_rad` forward to `to_rad`.
    ///
    /// Ellipses wrap into one period; on a hyperbola the target must lie ahead.
    pub fn time_of_flight(&self, from_rad: f64, to_rad: f64) -> Result<f64, GeometryError> {
        let start = self.time_since_periapsis(from_rad)?;
        let end = self.time_since_periapsis(to_rad)?;
        match self.period_s() {
            Some(period) => Ok((end - start).rem_euclid(period)),
            None if end >= start => Ok(end - start),
            None => Err(GeometryError::InvalidInput {
                quantity: "hyperbolic time of flight",
                value: end - start,
            }),
        }
    }

    /// True anomaly reached `time_s` after periapsis passage.
    pub fn true_anomaly_at_time(&self, time_s: f64) -> Result<f64, GeometryError> {
        let e = self.eccentricity;
        let mean_motion = (self.mu_m3_s2 / self.semi_major_axis_m.abs().powi(3)).sqrt();
        let mean_anomaly = mean_motion * time_s;
        if self.is_hyperbolic() {
            let big_h = kepler::solve_hyperbolic(mean_anomaly, e)?;
            Ok(kepler::true_from_hyperbolic(big_h, e))
        } else {
            let big_e = kepler::solve_elliptic(mean_anomaly, e)?;
            Ok(kepler::true_from_eccentric(big_e, e).rem_euclid(TAU))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MU_EARTH: f64 = 3.986004e14;

    fn sample_ellipse() -> ConicElements {
        ConicElements::from_shape(MU_EARTH, 1.0e7, 0.3, 0.4, 1.1, 2.2).unwrap()
    }

    #[test]
    fn state_round_trips_through_elements() {
        let conic = sample_ellipse();
        let state = conic.state_at(2.5).unwrap();
        let recovered =
            ConicElements::from_state(&state.position_m, &state.velocity_m_s, MU_EARTH).unwrap();
        let el = recovered.elements;
        assert!((el.semi_major_axis_m - 1.0e7).abs() < 1e-3);
        assert!((el.eccentricity - 0.3).abs() < 1e-12);
        assert!((el.inclination_rad - 0.4).abs() < 1e-12);
        assert!((el.raan_rad - 1.1).abs() < 1e-12);
        assert!((el.arg_periapsis_rad - 2.2).abs() < 1e-10);
        assert!((recovered.true_anomaly_rad - 2.5).abs() < 1e-10);
    }

    #[test]
    fn apoapsis_has_zero_flight_path_angle() {
        let conic = sample_ellipse();
        assert!(conic.flight_path_angle_at(PI).abs() < 1e-15);
        assert!(conic.flight_path_angle_at(-0.5) < 0.0);
        assert!(conic.flight_path_angle_at(0.5) > 0.0);
    }

    #[test]
    fn unreachable_radius_is_an_error() {
        let conic = sample_ellipse();
        let err = conic
            .true_anomaly_at_radius(2.0e7, Branch::Outbound)
            .unwrap_err();
        assert!(matches!(err, GeometryError::OutOfDomain { .. }));
    }

    #[test]
    fn circular_state_is_degenerate() {
        let r = 7.0e6;
        let v = (MU_EARTH / r).sqrt();
        let err = ConicElements::from_state(&[r, 0.0, 0.0], &[0.0, v * 0.6, v * 0.8], MU_EARTH)
            .unwrap_err();
        assert!(matches!(
            err,
            GeometryError::Degenerate {
                quantity: "eccentricity vector",
                ..
            }
        ));
    }

    #[test]
    fn equatorial_states_pin_the_node() {
        for inclination in [0.0, PI] {
            let conic = ConicElements::from_shape(MU_EARTH, 1.0e7, 0.3, inclination, 0.0, 2.2).unwrap();
            let state = conic.state_at(-0.7).unwrap();
            let recovered =
                ConicElements::from_state(&state.position_m, &state.velocity_m_s, MU_EARTH).unwrap();
            let el = recovered.elements;
            assert!((el.inclination_rad - inclination).abs() < 1e-7);
            assert_eq!(el.raan_rad, 0.0);
            assert!((el.arg_periapsis_rad - 2.2).abs() < 1e-10);
            assert!((recovered.true_anomaly_rad - (TAU - 0.7)).abs() < 1e-10);

            let back = el.state_at(recovered.true_anomaly_rad).unwrap();
            assert!(vector::norm(&vector::sub(&back.position_m, &state.position_m)) < 1e-2);
            assert!(vector::norm(&vector::sub(&back.velocity_m_s, &state.velocity_m_s)) < 1e-6);
        }
    }

    #[test]
    fn time_round_trips_through_kepler() {
        let conic = sample_ellipse();
        let t = conic.time_since_periapsis(1.3).unwrap();
        assert!((conic.true_anomaly_at_time(t).unwrap() - 1.3).abs() < 1e-10);

        let hyperbola = ConicElements::from_shape(MU_EARTH, -2.0e7, 1.8, 0.2, 0.3, 0.4).unwrap();
        let t = hyperbola.time_since_periapsis(-1.2).unwrap();
        assert!(t < 0.0);
        assert!((hyperbola.true_anomaly_at_time(t).unwrap() + 1.2).abs() < 1e-10);
    }
}
