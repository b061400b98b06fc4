use std::f64::consts::{FRAC_PI_2, PI};

use arrival_targeting::approach::{ApproachOrbit, ApproachTargeting};
use arrival_targeting::body::TargetBody;
use arrival_targeting::frames::PoleOrientation;
use arrival_targeting::transfer::{DeflectionError, LegKind, solve_deflection};
use arrival_targeting::vector;

const V_INF_KM_S: [f64; 3] = [17.78952518, 8.62038536, 3.15801163];

fn neptune() -> TargetBody {
    TargetBody {
        mu_m3_s2: 6.8365299e15,
        radius_m: 24_622.0e3,
        rotation_rate_rad_s: 1.083385e-4,
        pole: PoleOrientation::from_degrees(299.36, 43.36),
        entry_interface_altitude_m: 1_000.0e3,
    }
}

fn approach(v_inf_km_s: [f64; 3], periapsis_km: f64, psi_rad: f64, entry: bool) -> ApproachOrbit {
    ApproachOrbit::new(
        &neptune(),
        &ApproachTargeting {
            v_inf_km_s,
            periapsis_radius_m: periapsis_km * 1e3,
            psi_rad,
            entry_altitude_m: entry.then_some(1_000.0e3),
        },
    )
    .expect("approach orbit")
}

#[test]
fn probe_to_probe_deflection() {
    let first = approach(V_INF_KM_S, 25_022.0, 1.5 * PI, true);
    let second = approach(V_INF_KM_S, 25_022.0, FRAC_PI_2, true);
    let solution = solve_deflection(&first, &second, 4_000.0).expect("deflection");

    assert_eq!(solution.first.kind, LegKind::Entry);
    assert_eq!(solution.second.kind, LegKind::Entry);
    assert!(
        (solution.delta_v_m_s - 15.6355338).abs() < 1e-5,
        "dv = {}",
        solution.delta_v_m_s
    );
    assert!((solution.first.time_of_flight_days() - 56.8684222).abs() < 1e-6);
    assert!((solution.second.time_of_flight_days() - 56.8684222).abs() < 1e-6);
    assert!(solution.first.time_to_entry_s.is_some());
}

#[test]
fn probe_to_orbiter_deflection() {
    let probe = approach(V_INF_KM_S, 25_022.0, 1.5 * PI, true);
    let orbiter = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    let solution = solve_deflection(&probe, &orbiter, 1_000.0).expect("deflection");

    assert_eq!(solution.second.kind, LegKind::Orbiter);
    assert!(solution.second.time_to_entry_s.is_none());
    assert!((solution.first.true_anomaly_at_maneuver_rad + 1.9866386).abs() < 1e-6);
    assert!(
        (solution.delta_v_m_s - 65.7302).abs() < 1e-3,
        "dv = {}",
        solution.delta_v_m_s
    );
    assert!((solution.first.time_of_flight_days() - 14.175634).abs() < 1e-5);
    assert!((solution.second.time_of_flight_days() - 14.176477).abs() < 1e-5);
}

#[test]
fn orbiter_to_orbiter_deflection() {
    let first = approach(V_INF_KM_S, 28_622.0, 1.5 * PI, false);
    let second = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    let solution = solve_deflection(&first, &second, 1_000.0).expect("deflection");

    assert!(
        (solution.delta_v_m_s - 68.9076850).abs() < 1e-5,
        "dv = {}",
        solution.delta_v_m_s
    );
    assert!((solution.first.time_of_flight_days() - 14.17643992231).abs() < 1e-7);
    assert!((solution.second.time_of_flight_days() - 14.17647834316).abs() < 1e-7);
}

#[test]
fn first_leg_velocity_matches_its_own_conic() {
    let first = approach(V_INF_KM_S, 25_022.0, 1.5 * PI, true);
    let second = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    let solution = solve_deflection(&first, &second, 1_000.0).expect("deflection");

    let on_conic = first.velocity_at(solution.first.true_anomaly_at_maneuver_rad);
    let solved = solution.first.velocity_at_maneuver_m_s;
    let residual = vector::norm(&vector::sub(&on_conic, &solved));
    assert!(residual < 1e-6 * vector::norm(&on_conic), "residual {}", residual);
    assert!((vector::norm(&solution.maneuver_position_m) - 1_000.0 * neptune().radius_m).abs() < 1e-3);
}

#[test]
fn identical_approaches_need_no_deflection() {
    let first = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    let second = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    let solution = solve_deflection(&first, &second, 1_000.0).expect("deflection");
    assert!(solution.delta_v_m_s < 1e-6, "dv = {}", solution.delta_v_m_s);
}

#[test]
fn mismatched_excess_velocity_is_rejected() {
    let first = approach(V_INF_KM_S, 25_022.0, 1.5 * PI, true);
    let shifted = [V_INF_KM_S[0] + 0.01, V_INF_KM_S[1], V_INF_KM_S[2]];
    let second = approach(shifted, 28_622.0, FRAC_PI_2, false);
    assert!(matches!(
        solve_deflection(&first, &second, 1_000.0),
        Err(DeflectionError::MismatchedExcessVelocity { .. })
    ));
}

#[test]
fn non_positive_maneuver_radius_is_rejected() {
    let first = approach(V_INF_KM_S, 25_022.0, 1.5 * PI, true);
    let second = approach(V_INF_KM_S, 28_622.0, FRAC_PI_2, false);
    assert!(matches!(
        solve_deflection(&first, &second, 0.0),
        Err(DeflectionError::InvalidManeuverRadius(_))
    ));
}
