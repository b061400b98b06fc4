use std::f64::consts::TAU;

use arrival_core::body::TargetBody;
use arrival_core::frames::AsymptoteAngles;
use arrival_core::units::kms_to_ms;
use arrival_core::vector::{self, Vector3};
use arrival_orbits::{
    Branch, ConicElements, EntryInterface, GeometryError, StateSample, angle_from_cosine_and_sign,
    checked_acos,
};
use log::debug;

use crate::bplane::{BPlane, periapsis_unit_by_rotation, periapsis_unit_closed_form};

/// Eccentricities closer to one than this cannot be told apart from a parabola.
const MIN_HYPERBOLIC_EXCESS: f64 = 1e-12;
/// Node-vector length (of a unit normal) below which the orbit counts as equatorial.
const EQUATORIAL_NODE: f64 = 1e-12;

/// Caller-selected targeting for one approach hyperbola.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachTargeting {
    /// Excess velocity in the inertial (ICRF) frame, km/s.
    pub v_inf_km_s: Vector3,
    pub periapsis_radius_m: f64,
    /// B-plane targeting angle.
    pub psi_rad: f64,
    /// Entry-interface altitude; `Some` marks an atmospheric-entry system.
    pub entry_altitude_m: Option<f64>,
}

/// Fully oriented arrival hyperbola in the body-fixed inertial frame.
///
/// Built once by [`ApproachOrbit::new`]; entry conditions, when present, are
/// derived from the entry altitude during construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachOrbit {
    body: TargetBody,
    targeting: ApproachTargeting,
    v_inf_bi_km_s: Vector3,
    turn_half_angle_rad: f64,
    asymptote: AsymptoteAngles,
    periapsis_unit: Vector3,
    angular_momentum_m2_s: Vector3,
    conic: ConicElements,
    b_plane: BPlane,
    entry: Option<EntryInterface>,
}

impl ApproachOrbit {
    /// Build the approach hyperbola. The targeting angle is wrapped into [0, 2π).
    pub fn new(body: &TargetBody, targeting: &ApproachTargeting) -> Result<Self, GeometryError> {
        if !targeting.psi_rad.is_finite() {
            return Err(GeometryError::InvalidInput {
                quantity: "targeting angle",
                value: targeting.psi_rad,
            });
        }
        let wrapped = targeting.psi_rad.rem_euclid(TAU);
        let targeting = ApproachTargeting {
            psi_rad: if wrapped < TAU { wrapped } else { 0.0 },
            ..*targeting
        };
        let mu = body.mu_m3_s2;
        let rp = targeting.periapsis_radius_m;
        if !(rp > body.radius_m) {
            return Err(GeometryError::PeriapsisBelowSurface {
                periapsis_radius_m: rp,
                body_radius_m: body.radius_m,
            });
        }

        let v_inf_bi_km_s = body.pole.to_body_fixed(&targeting.v_inf_km_s);
        let v_inf_bi_m_s = vector::scale(&v_inf_bi_km_s, kms_to_ms(1.0));
        let v_inf = vector::norm(&v_inf_bi_m_s);
        if !(v_inf > 0.0) || !v_inf.is_finite() {
            return Err(GeometryError::Degenerate {
                quantity: "excess velocity",
                magnitude: v_inf,
            });
        }

        let semi_major_axis_m = -mu / (v_inf * v_inf);
        let eccentricity = 1.0 - rp / semi_major_axis_m;
        if !(eccentricity - 1.0 > MIN_HYPERBOLIC_EXCESS) {
            return Err(GeometryError::NotHyperbolic { eccentricity });
        }
        let turn_half_angle_rad = checked_acos("turn half-angle", 1.0 / eccentricity)?;

        let asymptote = AsymptoteAngles::from_excess_velocity(&v_inf_bi_km_s);
        let periapsis_unit =
            periapsis_unit_closed_form(&asymptote, turn_half_angle_rad, targeting.psi_rad);

        let normal = vector::cross(&periapsis_unit, &v_inf_bi_m_s);
        let h_hat = vector::unit(&normal).ok_or(GeometryError::Degenerate {
            quantity: "angular momentum",
            magnitude: vector::norm(&normal),
        })?;
        let inclination_rad = checked_acos("inclination", h_hat[2])?;

        // An equatorial approach has no node line; Ω is pinned to zero.
        let node = vector::cross(&[0.0, 0.0, 1.0], &h_hat);
        let (raan_rad, arg_periapsis_rad) = match vector::unit(&node) {
            Some(node_hat) if vector::norm(&node) > EQUATORIAL_NODE => (
                angle_from_cosine_and_sign(
                    "right ascension of ascending node",
                    node_hat[0],
                    node_hat[1],
                )?,
                angle_from_cosine_and_sign(
                    "argument of periapsis",
                    vector::dot(&node_hat, &periapsis_unit),
                    periapsis_unit[2],
                )?,
            ),
            _ => (
                0.0,
                angle_from_cosine_and_sign(
                    "argument of periapsis",
                    periapsis_unit[0],
                    periapsis_unit[1] * h_hat[2].signum(),
                )?,
            ),
        };

        let conic = ConicElements::from_shape(
            mu,
            semi_major_axis_m,
            eccentricity,
            inclination_rad,
            raan_rad,
            arg_periapsis_rad,
        )?;
        let angular_momentum_m2_s = vector::scale(&h_hat, conic.angular_momentum_m2_s);

        let b_plane = BPlane::new(
            &v_inf_bi_km_s,
            &h_hat,
            semi_major_axis_m,
            eccentricity,
            targeting.psi_rad,
        )?;

        let entry = targeting
            .entry_altitude_m
            .map(|altitude| EntryInterface::on_conic(&conic, body, altitude))
            .transpose()?;

        debug!(
            "approach: a={:.3} m e={:.6} i={:.6} deg raan={:.6} argp={:.6} entry={}",
            semi_major_axis_m,
            eccentricity,
            inclination_rad.to_degrees(),
            raan_rad,
            arg_periapsis_rad,
            entry.is_some()
        );

        Ok(Self {
            body: *body,
            targeting,
            v_inf_bi_km_s,
            turn_half_angle_rad,
            asymptote,
            periapsis_unit,
            angular_momentum_m2_s,
            conic,
            b_plane,
            entry,
        })
    }

    pub fn body(&self) -> &TargetBody {
        &self.body
    }

    pub fn targeting(&self) -> &ApproachTargeting {
        &self.targeting
    }

    pub fn psi_rad(&self) -> f64 {
        self.targeting.psi_rad
    }

    pub fn v_inf_icrf_km_s(&self) -> Vector3 {
        self.targeting.v_inf_km_s
    }

    pub fn v_inf_icrf_m_s(&self) -> Vector3 {
        vector::scale(&self.targeting.v_inf_km_s, kms_to_ms(1.0))
    }

    pub fn v_inf_bi_km_s(&self) -> Vector3 {
        self.v_inf_bi_km_s
    }

    pub fn v_inf_bi_m_s(&self) -> Vector3 {
        vector::scale(&self.v_inf_bi_km_s, kms_to_ms(1.0))
    }

    /// |v∞| in m/s.
    pub fn v_inf_m_s(&self) -> f64 {
        vector::norm(&self.v_inf_bi_m_s())
    }

    pub fn semi_major_axis_m(&self) -> f64 {
        self.conic.semi_major_axis_m
    }

    pub fn eccentricity(&self) -> f64 {
        self.conic.eccentricity
    }

    /// β = arccos(1/e).
    pub fn turn_half_angle_rad(&self) -> f64 {
        self.turn_half_angle_rad
    }

    pub fn asymptote_angles(&self) -> &AsymptoteAngles {
        &self.asymptote
    }

    pub fn periapsis_radius_m(&self) -> f64 {
        self.targeting.periapsis_radius_m
    }

    pub fn periapsis_unit(&self) -> Vector3 {
        self.periapsis_unit
    }

    /// The periapsis direction recomputed through the explicit rotation chain.
    pub fn periapsis_unit_by_rotation(&self) -> Vector3 {
        periapsis_unit_by_rotation(&self.asymptote, self.turn_half_angle_rad, self.psi_rad())
    }

    pub fn periapsis_position_m(&self) -> Vector3 {
        vector::scale(&self.periapsis_unit, self.periapsis_radius_m())
    }

    pub fn periapsis_velocity_m_s(&self) -> Vector3 {
        self.conic.velocity_at(0.0)
    }

    /// sqrt(μ(2/rp − 1/a)).
    pub fn periapsis_speed_m_s(&self) -> f64 {
        self.conic.speed_at(0.0)
    }

    pub fn angular_momentum_m2_s(&self) -> Vector3 {
        self.angular_momentum_m2_s
    }

    pub fn inclination_rad(&self) -> f64 {
        self.conic.inclination_rad
    }

    pub fn raan_rad(&self) -> f64 {
        self.conic.raan_rad
    }

    pub fn arg_periapsis_rad(&self) -> f64 {
        self.conic.arg_periapsis_rad
    }

    pub fn conic(&self) -> &ConicElements {
        &self.conic
    }

    pub fn b_plane(&self) -> &BPlane {
        &self.b_plane
    }

    pub fn entry(&self) -> Option<&EntryInterface> {
        self.entry.as_ref()
    }

    pub fn is_entry_system(&self) -> bool {
        self.entry.is_some()
    }

    pub fn position_at(&self, true_anomaly_rad: f64) -> Vector3 {
        self.conic.position_at(true_anomaly_rad)
    }

    pub fn velocity_at(&self, true_anomaly_rad: f64) -> Vector3 {
        self.conic.velocity_at(true_anomaly_rad)
    }

    /// Position/velocity at each requested true anomaly.
    pub fn sample(&self, true_anomalies_rad: &[f64]) -> Result<Vec<StateSample>, GeometryError> {
        self.conic.sample(true_anomalies_rad)
    }

    /// Inbound true anomaly at `radius_m`.
    pub fn inbound_true_anomaly_at(&self, radius_m: f64) -> Result<f64, GeometryError> {
        self.conic.true_anomaly_at_radius(radius_m, Branch::Inbound)
    }

    /// Coast time from `true_anomaly_rad` to periapsis.
    pub fn time_to_periapsis_s(&self, true_anomaly_rad: f64) -> Result<f64, GeometryError> {
        Ok(-self.conic.time_since_periapsis(true_anomaly_rad)?)
    }

    /// Coast time from `true_anomaly_rad` to the entry interface, for entry systems.
    pub fn time_to_entry_s(&self, true_anomaly_rad: f64) -> Result<Option<f64>, GeometryError> {
        self.entry
            .as_ref()
            .map(|entry| self.conic.time_of_flight(true_anomaly_rad, entry.true_anomaly_rad))
            .transpose()
    }
}
