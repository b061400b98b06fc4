use arrival_core::body::TargetBody;
use arrival_core::vector::{self, Vector3};

use crate::orbit::CaptureOrbit;

/// Planet-relative state handed over by an atmospheric pass propagator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitState {
    pub radius_m: f64,
    pub longitude_rad: f64,
    pub latitude_rad: f64,
    /// Speed relative to the rotating atmosphere.
    pub speed_m_s: f64,
    pub flight_path_angle_rad: f64,
    /// Measured from local east towards north.
    pub heading_rad: f64,
}

impl ExitState {
    /// Up, east, and north unit vectors at the exit point.
    fn local_axes(&self) -> (Vector3, Vector3, Vector3) {
        let (slon, clon) = self.longitude_rad.sin_cos();
        let (slat, clat) = self.latitude_rad.sin_cos();
        (
            [clat * clon, clat * slon, slat],
            [-slon, clon, 0.0],
            [-slat * clon, -slat * slon, clat],
        )
    }

    pub fn position_m(&self) -> Vector3 {
        vector::scale(&self.local_axes().0, self.radius_m)
    }

    pub fn planet_relative_velocity_m_s(&self) -> Vector3 {
        let (up, east, north) = self.local_axes();
        let (sg, cg) = self.flight_path_angle_rad.sin_cos();
        let (sh, ch) = self.heading_rad.sin_cos();
        let vertical = vector::scale(&up, self.speed_m_s * sg);
        let horizontal = vector::add(
            &vector::scale(&east, self.speed_m_s * cg * ch),
            &vector::scale(&north, self.speed_m_s * cg * sh),
        );
        vector::add(&vertical, &horizontal)
    }

    /// Planet-relative velocity plus the co-rotation velocity `Ω × r`.
    pub fn inertial_velocity_m_s(&self, rotation_rate_rad_s: f64) -> Vector3 {
        let (_, east, _) = self.local_axes();
        let surface_speed = rotation_rate_rad_s * self.radius_m * self.latitude_rad.cos();
        vector::add(
            &self.planet_relative_velocity_m_s(),
            &vector::scale(&east, surface_speed),
        )
    }
}

/// Coast orbit reached at atmospheric exit.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphericExit {
    pub exit: ExitState,
    pub body: TargetBody,
    pub position_m: Vector3,
    pub velocity_inertial_m_s: Vector3,
    pub speed_inertial_m_s: f64,
    pub flight_path_angle_inertial_rad: f64,
    /// Where the exit point sits on the coast orbit.
    pub true_anomaly_rad: f64,
    pub coast: CaptureOrbit,
}
