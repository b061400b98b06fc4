use std::f64::consts::{FRAC_PI_2, TAU};

use arrival_core::body::TargetBody;
use arrival_core::vector::{self, Vector3};

use crate::{Branch, ConicElements, GeometryError, checked_acos, checked_asin};

/// Flight conditions where an inbound conic crosses the atmospheric interface.
///
/// Every field derives from the interface altitude and the parent conic, so the
/// struct is only ever produced by [`EntryInterface::on_conic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryInterface {
    pub altitude_m: f64,
    pub radius_m: f64,
    /// (−π, 0] on hyperbolas, [0, 2π) on ellipses.
    pub true_anomaly_rad: f64,
    pub position_m: Vector3,
    pub velocity_inertial_m_s: Vector3,
    pub speed_inertial_m_s: f64,
    pub flight_path_angle_inertial_rad: f64,
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    /// Velocity relative to an atmosphere co-rotating with the body.
    pub velocity_atm_m_s: Vector3,
    pub speed_atm_m_s: f64,
    pub flight_path_angle_atm_rad: f64,
    /// Measured from local east.
    pub heading_atm_rad: f64,
}

impl EntryInterface {
    /// Derive entry conditions on the inbound branch of `conic` at `altitude_m`.
    ///
    /// Fails when the interface radius is not crossed, which happens whenever the
    /// periapsis lies above it.
    pub fn on_conic(
        conic: &ConicElements,
        body: &TargetBody,
        altitude_m: f64,
    ) -> Result<Self, GeometryError> {
        let radius_m = body.radius_at_altitude(altitude_m);
        let inbound = conic.true_anomaly_at_radius(radius_m, Branch::Inbound)?;
        let true_anomaly_rad = if conic.is_hyperbolic() {
            inbound
        } else {
            inbound.rem_euclid(TAU)
        };

        let position_m = conic.position_at(true_anomaly_rad);
        let velocity_inertial_m_s = conic.velocity_at(true_anomaly_rad);
        let speed_inertial_m_s = vector::norm(&velocity_inertial_m_s);
        let flight_path_angle_inertial_rad = conic.flight_path_angle_at(true_anomaly_rad);

        let r_hat = vector::unit(&position_m).ok_or(GeometryError::Degenerate {
            quantity: "entry position",
            magnitude: radius_m,
        })?;
        let latitude_rad = checked_asin("entry latitude", r_hat[2])?;
        let longitude_rad = r_hat[1].atan2(r_hat[0]);

        let east = [-longitude_rad.sin(), longitude_rad.cos(), 0.0];
        let surface_speed = body.rotation_rate_rad_s * radius_m * latitude_rad.cos();
        let velocity_atm_m_s =
            vector::sub(&velocity_inertial_m_s, &vector::scale(&east, surface_speed));
        let speed_atm_m_s = vector::norm(&velocity_atm_m_s);
        let v_atm_hat = vector::unit(&velocity_atm_m_s).ok_or(GeometryError::Degenerate {
            quantity: "atmosphere-relative velocity",
            magnitude: speed_atm_m_s,
        })?;

        let flight_path_angle_atm_rad = FRAC_PI_2
            - checked_acos("atmosphere-relative flight-path angle", vector::dot(&r_hat, &v_atm_hat))?;

        // Horizontal component of the unit velocity, deliberately left unnormalised.
        let horizontal = vector::sub(
            &v_atm_hat,
            &vector::scale(&r_hat, vector::dot(&v_atm_hat, &r_hat)),
        );
        let heading_atm_rad = checked_acos("entry heading", vector::dot(&horizontal, &east))?;

        Ok(Self {
            altitude_m,
            radius_m,
            true_anomaly_rad,
            position_m,
            velocity_inertial_m_s,
            speed_inertial_m_s,
            flight_path_angle_inertial_rad,
            latitude_rad,
            longitude_rad,
            velocity_atm_m_s,
            speed_atm_m_s,
            flight_path_angle_atm_rad,
            heading_atm_rad,
        })
    }
}
