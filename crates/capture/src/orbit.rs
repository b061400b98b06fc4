use std::f64::consts::PI;

use arrival_approach::ApproachOrbit;
use arrival_core::body::TargetBody;
use arrival_core::vector::{self, Vector3};
use arrival_orbits::{ConicElements, GeometryError, StateSample, checked_asin};
use log::debug;

use crate::CaptureError;
use crate::exit::{AtmosphericExit, ExitState};

/// How a capture orbit came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    /// Coast ellipse right after an atmospheric pass.
    Coast,
    /// Ellipse entered by a propulsive burn at approach periapsis.
    Insertion,
    /// After a periapsis-raise burn at apoapsis.
    PeriapsisRaised,
    /// After an arbitrary impulsive maneuver (probe targeting, deflection).
    Maneuvered,
}

/// Closed elliptic orbit about the target body.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOrbit {
    body: TargetBody,
    elements: ConicElements,
    stage: CaptureStage,
}

/// Result of a periapsis-raise maneuver at apoapsis.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriapsisRaise {
    pub apoapsis_radius_m: f64,
    pub velocity_before_m_s: Vector3,
    pub velocity_after_m_s: Vector3,
    pub delta_v_vec_m_s: Vector3,
    pub delta_v_m_s: f64,
    pub orbit: CaptureOrbit,
}

/// Result of a propulsive insertion burn at approach periapsis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitInsertion {
    pub approach_periapsis_speed_m_s: f64,
    pub orbit_periapsis_speed_m_s: f64,
    /// Impulse applied to the approach velocity (points against the motion).
    pub delta_v_vec_m_s: Vector3,
    pub delta_v_m_s: f64,
    pub orbit: CaptureOrbit,
}

/// One point of a uniformly timed trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    pub time_s: f64,
    pub state: StateSample,
}

impl CaptureOrbit {
    /// Wrap elliptic elements; open conics are rejected.
    pub fn new(
        body: &TargetBody,
        elements: ConicElements,
        stage: CaptureStage,
    ) -> Result<Self, CaptureError> {
        if !(elements.eccentricity < 1.0) {
            return Err(CaptureError::NotCaptured {
                eccentricity: elements.eccentricity,
            });
        }
        Ok(Self {
            body: *body,
            elements,
            stage,
        })
    }

    /// Coast orbit implied by a planet-relative atmospheric exit state.
    pub fn from_exit_state(
        body: &TargetBody,
        exit: &ExitState,
    ) -> Result<AtmosphericExit, CaptureError> {
        let position_m = exit.position_m();
        let velocity_inertial_m_s = exit.inertial_velocity_m_s(body.rotation_rate_rad_s);
        let speed_inertial_m_s = vector::norm(&velocity_inertial_m_s);

        let state = ConicElements::from_state(&position_m, &velocity_inertial_m_s, body.mu_m3_s2)?;
        let coast = Self::new(body, state.elements, CaptureStage::Coast)?;

        let radial = vector::dot(&position_m, &velocity_inertial_m_s) / (exit.radius_m * speed_inertial_m_s);
        let flight_path_angle_inertial_rad = checked_asin("inertial exit flight-path angle", radial)?;

        debug!(
            "exit coast: a={:.1} m e={:.6} i={:.4} deg theta={:.4} deg",
            coast.elements.semi_major_axis_m,
            coast.elements.eccentricity,
            coast.elements.inclination_rad.to_degrees(),
            state.true_anomaly_rad.to_degrees()
        );

        Ok(AtmosphericExit {
            exit: *exit,
            body: *body,
            position_m,
            velocity_inertial_m_s,
            speed_inertial_m_s,
            flight_path_angle_inertial_rad,
            true_anomaly_rad: state.true_anomaly_rad,
            coast,
        })
    }

    /// Propulsive insertion at the approach periapsis into an ellipse with the given apoapsis altitude.
    ///
    /// The ellipse keeps the approach plane and apsidal line.
    pub fn from_approach_periapsis(
        approach: &ApproachOrbit,
        apoapsis_altitude_m: f64,
    ) -> Result<OrbitInsertion, CaptureError> {
        let body = approach.body();
        let periapsis_radius_m = approach.periapsis_radius_m();
        let apoapsis_radius_m = body.radius_at_altitude(apoapsis_altitude_m);
        if !(apoapsis_radius_m >= periapsis_radius_m) {
            return Err(CaptureError::InvalidTarget {
                target_m: periapsis_radius_m,
                apoapsis_m: apoapsis_radius_m,
            });
        }

        let approach_conic = approach.conic();
        let elements = ConicElements::from_shape(
            body.mu_m3_s2,
            0.5 * (periapsis_radius_m + apoapsis_radius_m),
            (apoapsis_radius_m - periapsis_radius_m) / (apoapsis_radius_m + periapsis_radius_m),
            approach_conic.inclination_rad,
            approach_conic.raan_rad,
            approach_conic.arg_periapsis_rad,
        )?;
        let orbit = Self::new(body, elements, CaptureStage::Insertion)?;

        let approach_velocity = approach.periapsis_velocity_m_s();
        let orbit_velocity = orbit.velocity_at(0.0);
        let delta_v_vec_m_s = vector::sub(&orbit_velocity, &approach_velocity);
        let delta_v_m_s = vector::norm(&delta_v_vec_m_s);
        debug!(
            "orbit insertion: rp={:.1} m ra={:.1} m dv={:.3} m/s",
            periapsis_radius_m, apoapsis_radius_m, delta_v_m_s
        );

        Ok(OrbitInsertion {
            approach_periapsis_speed_m_s: vector::norm(&approach_velocity),
            orbit_periapsis_speed_m_s: vector::norm(&orbit_velocity),
            delta_v_vec_m_s,
            delta_v_m_s,
            orbit,
        })
    }

    pub fn body(&self) -> &TargetBody {
        &self.body
    }

    pub fn elements(&self) -> &ConicElements {
        &self.elements
    }

    pub fn stage(&self) -> CaptureStage {
        self.stage
    }

    pub fn semi_major_axis_m(&self) -> f64 {
        self.elements.semi_major_axis_m
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn periapsis_radius_m(&self) -> f64 {
        self.elements.periapsis_radius()
    }

    // `new` only admits ellipses, so both apoapsis and period exist.
    pub fn apoapsis_radius_m(&self) -> f64 {
        self.elements.apoapsis_radius().unwrap_or(f64::INFINITY)
    }

    pub fn periapsis_altitude_m(&self) -> f64 {
        self.periapsis_radius_m() - self.body.radius_m
    }

    pub fn apoapsis_altitude_m(&self) -> f64 {
        self.apoapsis_radius_m() - self.body.radius_m
    }

    pub fn period_s(&self) -> f64 {
        self.elements.period_s().unwrap_or(f64::INFINITY)
    }

    pub fn position_at(&self, true_anomaly_rad: f64) -> Vector3 {
        self.elements.position_at(true_anomaly_rad)
    }

    pub fn velocity_at(&self, true_anomaly_rad: f64) -> Vector3 {
        self.elements.velocity_at(true_anomaly_rad)
    }

    pub fn sample(&self, true_anomalies_rad: &[f64]) -> Result<Vec<StateSample>, GeometryError> {
        self.elements.sample(true_anomalies_rad)
    }

    /// `steps + 1` states spaced uniformly in time from periapsis passage.
    pub fn timed_trajectory(
        &self,
        duration_s: f64,
        steps: usize,
    ) -> Result<Vec<TimedSample>, GeometryError> {
        if steps == 0 || !(duration_s >= 0.0) {
            return Err(GeometryError::InvalidInput {
                quantity: "timed trajectory span",
                value: duration_s,
            });
        }
        let dt = duration_s / steps as f64;
        (0..=steps)
            .map(|i| {
                let time_s = dt * i as f64;
                let theta = self.elements.true_anomaly_at_time(time_s)?;
                Ok(TimedSample {
                    time_s,
                    state: self.elements.state_at(theta)?,
                })
            })
            .collect()
    }

    /// Raise (or lower) periapsis to `target_periapsis_radius_m` with a burn at apoapsis.
    ///
    /// Apoapsis, plane, and apsidal line are kept; only `a` and `e` change, so
    /// the impulse is purely tangential.
    pub fn raise_periapsis(
        &self,
        target_periapsis_radius_m: f64,
    ) -> Result<PeriapsisRaise, CaptureError> {
        let apoapsis_radius_m = self.apoapsis_radius_m();
        if !(target_periapsis_radius_m > 0.0 && target_periapsis_radius_m <= apoapsis_radius_m) {
            return Err(CaptureError::InvalidTarget {
                target_m: target_periapsis_radius_m,
                apoapsis_m: apoapsis_radius_m,
            });
        }

        let eccentricity = (apoapsis_radius_m - target_periapsis_radius_m)
            / (apoapsis_radius_m + target_periapsis_radius_m);
        let elements = ConicElements::from_shape(
            self.elements.mu_m3_s2,
            apoapsis_radius_m / (1.0 + eccentricity),
            eccentricity,
            self.elements.inclination_rad,
            self.elements.raan_rad,
            self.elements.arg_periapsis_rad,
        )?;
        let orbit = Self::new(&self.body, elements, CaptureStage::PeriapsisRaised)?;

        let velocity_before_m_s = self.velocity_at(PI);
        let velocity_after_m_s = orbit.velocity_at(PI);
        let delta_v_vec_m_s = vector::sub(&velocity_after_m_s, &velocity_before_m_s);
        let delta_v_m_s = vector::norm(&delta_v_vec_m_s);
        debug!(
            "periapsis raise: ra={:.1} m rp {:.1} -> {:.1} m dv={:.4} m/s",
            apoapsis_radius_m,
            self.periapsis_radius_m(),
            target_periapsis_radius_m,
            delta_v_m_s
        );

        Ok(PeriapsisRaise {
            apoapsis_radius_m,
            velocity_before_m_s,
            velocity_after_m_s,
            delta_v_vec_m_s,
            delta_v_m_s,
            orbit,
        })
    }

    /// [`raise_periapsis`](Self::raise_periapsis) with the target given as an altitude.
    pub fn raise_periapsis_to_altitude(
        &self,
        target_altitude_m: f64,
    ) -> Result<PeriapsisRaise, CaptureError> {
        self.raise_periapsis(self.body.radius_at_altitude(target_altitude_m))
    }
}
