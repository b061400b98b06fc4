//! Separation maneuver between two approach hyperbolas that share an excess velocity.
//!
//! Both vehicles ride the first orbit's inbound branch until the shared maneuver
//! radius. At that point each leg's departure velocity is found from the
//! boundary-value problem between the maneuver point and the leg's own periapsis,
//! and the deflection impulse is the difference of the two.

use arrival_approach::ApproachOrbit;
use arrival_core::time::seconds_to_days;
use arrival_core::vector::{self, Vector3};
use arrival_impulsive::{BoundaryValueProblem, solve_boundary_value};
use arrival_orbits::{GeometryError, checked_acos};
use log::debug;

/// Excess velocities closer than this (km/s) count as the same arrival.
const EXCESS_VELOCITY_TOLERANCE_KM_S: f64 = 1e-9;

/// What the leg's vehicle does at periapsis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegKind {
    /// Atmospheric-entry system; its sweep is measured along its own conic.
    Entry,
    /// Flies through periapsis; its sweep is the angle between periapsis and the maneuver point.
    Orbiter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionLeg {
    pub kind: LegKind,
    pub psi_rad: f64,
    pub periapsis_radius_m: f64,
    /// Inbound anomaly of the maneuver radius on this leg's conic.
    pub true_anomaly_at_maneuver_rad: f64,
    /// Sweep from the maneuver point to periapsis.
    pub sweep_rad: f64,
    pub semi_latus_rectum_m: f64,
    pub velocity_at_maneuver_m_s: Vector3,
    /// Maneuver point to periapsis.
    pub time_of_flight_s: f64,
    /// Maneuver point to the entry interface, for entry legs.
    pub time_to_entry_s: Option<f64>,
}

impl DeflectionLeg {
    pub fn time_of_flight_days(&self) -> f64 {
        seconds_to_days(self.time_of_flight_s)
    }
}

/// Deflection impulse separating `second` from `first`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionSolution {
    pub maneuver_radius_m: f64,
    pub maneuver_position_m: Vector3,
    pub first: DeflectionLeg,
    pub second: DeflectionLeg,
    /// `v_second − v_first` at the maneuver point.
    pub delta_v_vec_m_s: Vector3,
    pub delta_v_m_s: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum DeflectionError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("approach orbits do not share an excess velocity (differ by {difference_km_s:e} km/s)")]
    MismatchedExcessVelocity { difference_km_s: f64 },
    #[error("approach orbits target different bodies")]
    MismatchedBody,
    #[error("maneuver radius must be a positive multiple of the body radius, got {0}")]
    InvalidManeuverRadius(f64),
}

/// Solve the deflection at `maneuver_radius_body_radii` body radii from the centre.
///
/// Works for any pairing of entry and orbiter approaches; the maneuver point is
/// taken on `first`'s inbound branch.
pub fn solve_deflection(
    first: &ApproachOrbit,
    second: &ApproachOrbit,
    maneuver_radius_body_radii: f64,
) -> Result<DeflectionSolution, DeflectionError> {
    if first.body() != second.body() {
        return Err(DeflectionError::MismatchedBody);
    }
    let difference_km_s = vector::norm(&vector::sub(
        &first.v_inf_icrf_km_s(),
        &second.v_inf_icrf_km_s(),
    ));
    if difference_km_s > EXCESS_VELOCITY_TOLERANCE_KM_S {
        return Err(DeflectionError::MismatchedExcessVelocity { difference_km_s });
    }
    if !(maneuver_radius_body_radii > 0.0) || !maneuver_radius_body_radii.is_finite() {
        return Err(DeflectionError::InvalidManeuverRadius(maneuver_radius_body_radii));
    }

    let maneuver_radius_m = maneuver_radius_body_radii * first.body().radius_m;
    let maneuver_position_m = first.position_at(first.inbound_true_anomaly_at(maneuver_radius_m)?);

    let first_leg = solve_leg(first, &maneuver_position_m, maneuver_radius_m)?;
    let second_leg = solve_leg(second, &maneuver_position_m, maneuver_radius_m)?;
    let delta_v_vec_m_s = vector::sub(
        &second_leg.velocity_at_maneuver_m_s,
        &first_leg.velocity_at_maneuver_m_s,
    );
    let delta_v_m_s = vector::norm(&delta_v_vec_m_s);
    debug!(
        "deflection at {:.1} body radii: dv={:.6} m/s tof={:.6}/{:.6} days",
        maneuver_radius_body_radii,
        delta_v_m_s,
        first_leg.time_of_flight_days(),
        second_leg.time_of_flight_days()
    );

    Ok(DeflectionSolution {
        maneuver_radius_m,
        maneuver_position_m,
        first: first_leg,
        second: second_leg,
        delta_v_vec_m_s,
        delta_v_m_s,
    })
}

fn solve_leg(
    approach: &ApproachOrbit,
    maneuver_position_m: &Vector3,
    maneuver_radius_m: f64,
) -> Result<DeflectionLeg, DeflectionError> {
    let conic = approach.conic();
    let true_anomaly_at_maneuver_rad = approach.inbound_true_anomaly_at(maneuver_radius_m)?;
    let kind = if approach.is_entry_system() {
        LegKind::Entry
    } else {
        LegKind::Orbiter
    };
    let sweep_rad = match kind {
        LegKind::Entry => true_anomaly_at_maneuver_rad.abs(),
        LegKind::Orbiter => {
            let direction = vector::scale(maneuver_position_m, 1.0 / maneuver_radius_m);
            checked_acos(
                "deflection sweep",
                vector::dot(&approach.periapsis_unit(), &direction),
            )?
        }
    };

    let problem = BoundaryValueProblem {
        r1_m: maneuver_radius_m,
        r2_m: approach.periapsis_radius_m(),
        sweep_rad,
        semi_major_axis_m: conic.semi_major_axis_m,
        mu_m3_s2: conic.mu_m3_s2,
    };
    let solution = solve_boundary_value(&problem)?;
    let velocity_at_maneuver_m_s =
        solution.departure_velocity(maneuver_position_m, &approach.periapsis_position_m())?;
    let time_to_entry_s = approach.time_to_entry_s(true_anomaly_at_maneuver_rad)?;

    debug!(
        "deflection leg {:?} psi={:.4}: theta={:.6} sweep={:.6} tof={:.1} s",
        kind, approach.psi_rad(), true_anomaly_at_maneuver_rad, sweep_rad, solution.time_of_flight_s
    );

    Ok(DeflectionLeg {
        kind,
        psi_rad: approach.psi_rad(),
        periapsis_radius_m: approach.periapsis_radius_m(),
        true_anomaly_at_maneuver_rad,
        sweep_rad,
        semi_latus_rectum_m: solution.semi_latus_rectum_m,
        velocity_at_maneuver_m_s,
        time_of_flight_s: solution.time_of_flight_s,
        time_to_entry_s,
    })
}
