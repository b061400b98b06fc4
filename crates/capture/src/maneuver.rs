use arrival_core::vector::{self, Vector3};
use arrival_orbits::{ConicElements, EntryInterface, GeometryError};
use log::{debug, warn};

use crate::CaptureError;
use crate::orbit::{CaptureOrbit, CaptureStage};

/// Impulse applied along the local velocity at one true anomaly of the parent orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulsiveManeuver {
    pub true_anomaly_rad: f64,
    pub position_m: Vector3,
    pub velocity_before_m_s: Vector3,
    pub velocity_after_m_s: Vector3,
    pub delta_v_vec_m_s: Vector3,
    /// Signed magnitude along the velocity; negative values brake.
    pub delta_v_m_s: f64,
}

/// Conic produced by an impulsive maneuver, plus its entry conditions when it dips
/// below the atmospheric interface.
///
/// The burn may leave the vehicle on an open conic; [`orbit`](Self::orbit) is
/// only available when the result is still captured.
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverOutcome {
    pub maneuver: ImpulsiveManeuver,
    pub elements: ConicElements,
    /// Position of the maneuver point on the new conic.
    pub true_anomaly_after_rad: f64,
    pub interface_altitude_m: f64,
    body_radius_m: f64,
    orbit: Option<CaptureOrbit>,
    entry: Result<EntryInterface, CaptureError>,
    time_to_entry_s: Option<f64>,
}

impl ManeuverOutcome {
    /// The new closed orbit, or [`CaptureError::NotCaptured`] when the burn opened it.
    pub fn orbit(&self) -> Result<&CaptureOrbit, CaptureError> {
        self.orbit.as_ref().ok_or(CaptureError::NotCaptured {
            eccentricity: self.elements.eccentricity,
        })
    }

    pub fn is_captured(&self) -> bool {
        self.orbit.is_some()
    }

    pub fn periapsis_altitude_m(&self) -> f64 {
        self.elements.periapsis_radius() - self.body_radius_m
    }

    /// Entry conditions, or why the interface is never reached.
    ///
    /// [`CaptureError::OutsideAtmosphere`] when periapsis stays above the interface,
    /// [`CaptureError::EntryBehind`] when an open conic crosses it only before the burn.
    pub fn entry(&self) -> Result<&EntryInterface, CaptureError> {
        self.entry.as_ref().map_err(Clone::clone)
    }

    /// Coast time from the maneuver to the entry interface.
    pub fn time_to_entry_s(&self) -> Option<f64> {
        self.time_to_entry_s
    }
}

impl CaptureOrbit {
    /// Apply `delta_v_m_s` along the velocity at `true_anomaly_rad` and derive the resulting conic.
    ///
    /// The parent orbit is left untouched. If the new periapsis falls below
    /// `interface_altitude_m` the entry conditions are derived as well; otherwise
    /// [`ManeuverOutcome::entry`] reports [`CaptureError::OutsideAtmosphere`].
    pub fn apply_impulsive_maneuver(
        &self,
        true_anomaly_rad: f64,
        delta_v_m_s: f64,
        interface_altitude_m: f64,
    ) -> Result<ManeuverOutcome, CaptureError> {
        let position_m = self.position_at(true_anomaly_rad);
        let velocity_before_m_s = self.velocity_at(true_anomaly_rad);
        let direction = vector::unit(&velocity_before_m_s).ok_or(GeometryError::Degenerate {
            quantity: "maneuver velocity",
            magnitude: vector::norm(&velocity_before_m_s),
        })?;
        let delta_v_vec_m_s = vector::scale(&direction, delta_v_m_s);
        let velocity_after_m_s = vector::add(&velocity_before_m_s, &delta_v_vec_m_s);

        let state = ConicElements::from_state(
            &position_m,
            &velocity_after_m_s,
            self.elements().mu_m3_s2,
        )?;
        let elements = state.elements;
        let orbit = if elements.is_hyperbolic() {
            debug!(
                "maneuver at theta={:.4} rad opens the orbit: e={:.6}",
                true_anomaly_rad, elements.eccentricity
            );
            None
        } else {
            Some(CaptureOrbit::new(self.body(), elements, CaptureStage::Maneuvered)?)
        };

        let body = self.body();
        let periapsis_altitude_m = elements.periapsis_radius() - body.radius_m;
        let (entry, time_to_entry_s) = if periapsis_altitude_m < interface_altitude_m {
            let entry = EntryInterface::on_conic(&elements, body, interface_altitude_m)?;
            if elements.is_hyperbolic() && entry.true_anomaly_rad < state.true_anomaly_rad {
                warn!(
                    "maneuver at theta={:.4} rad is past the entry crossing at {:.4} rad",
                    state.true_anomaly_rad, entry.true_anomaly_rad
                );
                (
                    Err(CaptureError::EntryBehind {
                        maneuver_true_anomaly_rad: state.true_anomaly_rad,
                        entry_true_anomaly_rad: entry.true_anomaly_rad,
                    }),
                    None,
                )
            } else {
                let coast = elements.time_of_flight(state.true_anomaly_rad, entry.true_anomaly_rad)?;
                debug!(
                    "maneuver at theta={:.4} rad: entry after {:.1} s at {:.1} m/s",
                    true_anomaly_rad, coast, entry.speed_inertial_m_s
                );
                (Ok(entry), Some(coast))
            }
        } else {
            warn!(
                "maneuver at theta={:.4} rad leaves periapsis at {:.1} m, above the {:.1} m interface",
                true_anomaly_rad, periapsis_altitude_m, interface_altitude_m
            );
            (
                Err(CaptureError::OutsideAtmosphere {
                    periapsis_altitude_m,
                    interface_altitude_m,
                }),
                None,
            )
        };

        Ok(ManeuverOutcome {
            maneuver: ImpulsiveManeuver {
                true_anomaly_rad,
                position_m,
                velocity_before_m_s,
                velocity_after_m_s,
                delta_v_vec_m_s,
                delta_v_m_s,
            },
            elements,
            true_anomaly_after_rad: state.true_anomaly_rad,
            interface_altitude_m,
            body_radius_m: body.radius_m,
            orbit,
            entry,
            time_to_entry_s,
        })
    }
}
