//! Conversions from model values into export records.

use arrival_approach::ApproachOrbit;
use arrival_capture::{OrbitInsertion, TimedSample};
use arrival_core::body::TargetBody;
use arrival_core::time::{seconds_to_days, seconds_to_hours};
use arrival_core::units::{m_to_km, ms_to_kms};
use arrival_export::summary::{
    ApproachSummary, DeflectionSummary, DeliverySummary, EntrySummary, InsertionSummary,
    LegSummary,
};
use arrival_export::trajectory::Record;
use arrival_orbits::{EntryInterface, GeometryError, StateSample};
use arrival_transfer::{
    DeflectionLeg, DeflectionSolution, DeliveryProfile, LegKind, arrival_declination,
};

pub fn entry_summary(entry: &EntryInterface) -> EntrySummary {
    EntrySummary {
        altitude_km: m_to_km(entry.altitude_m),
        true_anomaly_deg: entry.true_anomaly_rad.to_degrees(),
        speed_inertial_m_s: entry.speed_inertial_m_s,
        flight_path_angle_inertial_deg: entry.flight_path_angle_inertial_rad.to_degrees(),
        latitude_deg: entry.latitude_rad.to_degrees(),
        longitude_deg: entry.longitude_rad.to_degrees(),
        speed_atm_m_s: entry.speed_atm_m_s,
        flight_path_angle_atm_deg: entry.flight_path_angle_atm_rad.to_degrees(),
        heading_atm_deg: entry.heading_atm_rad.to_degrees(),
    }
}

pub fn approach_summary(
    body_name: &str,
    approach: &ApproachOrbit,
) -> Result<ApproachSummary, GeometryError> {
    let declination = arrival_declination(approach.body(), &approach.v_inf_icrf_km_s())?;
    let b_plane = approach.b_plane();
    Ok(ApproachSummary {
        body: body_name.to_string(),
        v_inf_km_s: approach.v_inf_icrf_km_s(),
        v_inf_magnitude_km_s: ms_to_kms(approach.v_inf_m_s()),
        declination_deg: declination.declination_deg(),
        semi_major_axis_km: m_to_km(approach.semi_major_axis_m()),
        eccentricity: approach.eccentricity(),
        turn_half_angle_deg: approach.turn_half_angle_rad().to_degrees(),
        periapsis_radius_km: m_to_km(approach.periapsis_radius_m()),
        periapsis_speed_m_s: approach.periapsis_speed_m_s(),
        psi_deg: approach.psi_rad().to_degrees(),
        inclination_deg: approach.inclination_rad().to_degrees(),
        raan_deg: approach.raan_rad().to_degrees(),
        arg_periapsis_deg: approach.arg_periapsis_rad().to_degrees(),
        b_magnitude_km: m_to_km(b_plane.b_magnitude_m),
        b_dot_t_km: m_to_km(b_plane.b_dot_t()),
        b_dot_r_km: m_to_km(b_plane.b_dot_r()),
        entry: approach.entry().map(entry_summary),
    })
}

fn leg_summary(leg: &DeflectionLeg) -> LegSummary {
    LegSummary {
        kind: match leg.kind {
            LegKind::Entry => "entry".to_string(),
            LegKind::Orbiter => "orbiter".to_string(),
        },
        psi_deg: leg.psi_rad.to_degrees(),
        periapsis_radius_km: m_to_km(leg.periapsis_radius_m),
        true_anomaly_at_maneuver_deg: leg.true_anomaly_at_maneuver_rad.to_degrees(),
        sweep_deg: leg.sweep_rad.to_degrees(),
        velocity_at_maneuver_m_s: leg.velocity_at_maneuver_m_s,
        time_of_flight_days: leg.time_of_flight_days(),
        time_to_entry_days: leg.time_to_entry_s.map(seconds_to_days),
    }
}

pub fn deflection_summary(solution: &DeflectionSolution) -> DeflectionSummary {
    DeflectionSummary {
        maneuver_radius_km: m_to_km(solution.maneuver_radius_m),
        delta_v_vec_m_s: solution.delta_v_vec_m_s,
        delta_v_m_s: solution.delta_v_m_s,
        first: leg_summary(&solution.first),
        second: leg_summary(&solution.second),
    }
}

pub fn insertion_summary(insertion: &OrbitInsertion) -> InsertionSummary {
    InsertionSummary {
        periapsis_altitude_km: m_to_km(insertion.orbit.periapsis_altitude_m()),
        apoapsis_altitude_km: m_to_km(insertion.orbit.apoapsis_altitude_m()),
        period_hours: seconds_to_hours(insertion.orbit.period_s()),
        delta_v_m_s: insertion.delta_v_m_s,
    }
}

pub fn delivery_summary(
    scenario: &str,
    body_name: &str,
    profile: &DeliveryProfile,
) -> Result<DeliverySummary, GeometryError> {
    Ok(DeliverySummary {
        scenario: scenario.to_string(),
        probe: approach_summary(body_name, &profile.probe)?,
        orbiter: approach_summary(body_name, &profile.orbiter)?,
        deflection: deflection_summary(&profile.deflection),
        insertion: insertion_summary(&profile.insertion),
        total_delta_v_m_s: profile.total_delta_v_m_s(),
    })
}

/// `steps + 1` evenly spaced true anomalies from `start_rad` to `end_rad`.
pub fn anomaly_grid(start_rad: f64, end_rad: f64, steps: usize) -> Vec<f64> {
    let steps = steps.max(1);
    let step = (end_rad - start_rad) / steps as f64;
    (0..=steps).map(|i| start_rad + step * i as f64).collect()
}

pub fn trajectory_records(body: &TargetBody, samples: &[StateSample]) -> Vec<Record> {
    samples
        .iter()
        .map(|sample| state_record(body, sample, None))
        .collect()
}

pub fn timed_records(body: &TargetBody, samples: &[TimedSample]) -> Vec<Record> {
    samples
        .iter()
        .map(|sample| state_record(body, &sample.state, Some(sample.time_s)))
        .collect()
}

fn state_record(body: &TargetBody, sample: &StateSample, time_s: Option<f64>) -> Record {
    let radius_m = sample.radius_m();
    Record {
        true_anomaly_rad: sample.true_anomaly_rad,
        time_s,
        position_m: sample.position_m,
        velocity_m_s: sample.velocity_m_s,
        radius_m,
        altitude_m: radius_m - body.radius_m,
    }
}
