//! Delivery planner that sequences the probe approach, the orbiter approach, the
//! separation maneuver, and the orbiter's insertion burn.

pub mod arrival;
pub mod deflection;

use self::arrival::{ArrivalDeclination, arrival_declination};
use self::deflection::{DeflectionError, DeflectionSolution, solve_deflection};
use arrival_approach::{ApproachOrbit, ApproachTargeting};
use arrival_capture::{CaptureError, CaptureOrbit, OrbitInsertion};
use arrival_core::body::TargetBody;
use arrival_core::vector::Vector3;
use arrival_orbits::GeometryError;

/// Entry probe targeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeTargeting {
    pub periapsis_radius_m: f64,
    pub psi_rad: f64,
    pub entry_altitude_m: f64,
}

/// Orbiter targeting and capture ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbiterTargeting {
    pub periapsis_radius_m: f64,
    pub psi_rad: f64,
    pub apoapsis_altitude_m: f64,
}

/// Inputs for a probe + orbiter delivery on one approach hyperbola.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryConfig {
    pub body: TargetBody,
    /// Inertial excess velocity (km/s).
    pub v_inf_km_s: Vector3,
    pub probe: ProbeTargeting,
    pub orbiter: OrbiterTargeting,
    pub maneuver_radius_body_radii: f64,
}

/// Everything derived for one delivery architecture.
#[derive(Debug, Clone)]
pub struct DeliveryProfile {
    pub arrival: ArrivalDeclination,
    pub probe: ApproachOrbit,
    pub orbiter: ApproachOrbit,
    /// Orbiter deflection away from the probe trajectory.
    pub deflection: DeflectionSolution,
    pub insertion: OrbitInsertion,
}

impl DeliveryProfile {
    /// Deflection plus insertion impulse magnitudes (m/s).
    pub fn total_delta_v_m_s(&self) -> f64 {
        self.deflection.delta_v_m_s + self.insertion.delta_v_m_s
    }
}

/// Top-level delivery planning error.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("approach geometry failed: {0}")]
    Approach(#[from] GeometryError),
    #[error("deflection failed: {0}")]
    Deflection(#[from] DeflectionError),
    #[error("orbit insertion failed: {0}")]
    Capture(#[from] CaptureError),
}

/// Run the delivery planner: both approaches, the probe → orbiter deflection, then orbiter insertion.
pub fn plan_delivery(config: &DeliveryConfig) -> Result<DeliveryProfile, MissionError> {
    let arrival = arrival_declination(&config.body, &config.v_inf_km_s)?;
    let probe = ApproachOrbit::new(
        &config.body,
        &ApproachTargeting {
            v_inf_km_s: config.v_inf_km_s,
            periapsis_radius_m: config.probe.periapsis_radius_m,
            psi_rad: config.probe.psi_rad,
            entry_altitude_m: Some(config.probe.entry_altitude_m),
        },
    )?;
    let orbiter = ApproachOrbit::new(
        &config.body,
        &ApproachTargeting {
            v_inf_km_s: config.v_inf_km_s,
            periapsis_radius_m: config.orbiter.periapsis_radius_m,
            psi_rad: config.orbiter.psi_rad,
            entry_altitude_m: None,
        },
    )?;
    let deflection = solve_deflection(&probe, &orbiter, config.maneuver_radius_body_radii)?;
    let insertion =
        CaptureOrbit::from_approach_periapsis(&orbiter, config.orbiter.apoapsis_altitude_m)?;

    Ok(DeliveryProfile {
        arrival,
        probe,
        orbiter,
        deflection,
        insertion,
    })
}
