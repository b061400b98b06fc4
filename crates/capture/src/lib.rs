//! Capture-orbit model: elliptic orbits entered from an atmospheric exit state or a propulsive
//! insertion at approach periapsis, with periapsis-raise and general impulsive maneuvers.
//! An impulsive maneuver may open the orbit; its outcome then carries hyperbolic elements.
//!
//! Every maneuver returns a new [`CaptureOrbit`] tagged with the [`CaptureStage`] that
//! produced it; the parent orbit is never modified.

mod exit;
mod maneuver;
mod orbit;

pub use exit::{AtmosphericExit, ExitState};
pub use maneuver::{ImpulsiveManeuver, ManeuverOutcome};
pub use orbit::{CaptureOrbit, CaptureStage, OrbitInsertion, PeriapsisRaise, TimedSample};

use arrival_orbits::GeometryError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("orbit with eccentricity {eccentricity} is not captured")]
    NotCaptured { eccentricity: f64 },
    #[error(
        "periapsis altitude {periapsis_altitude_m:.1} m lies outside the atmospheric interface at {interface_altitude_m:.1} m"
    )]
    OutsideAtmosphere {
        periapsis_altitude_m: f64,
        interface_altitude_m: f64,
    },
    #[error(
        "entry crossing at true anomaly {entry_true_anomaly_rad:.6} rad lies behind the maneuver point at {maneuver_true_anomaly_rad:.6} rad"
    )]
    EntryBehind {
        maneuver_true_anomaly_rad: f64,
        entry_true_anomaly_rad: f64,
    },
    #[error("target periapsis radius {target_m} m must lie in (0, {apoapsis_m}] m")]
    InvalidTarget { target_m: f64, apoapsis_m: f64 },
}
