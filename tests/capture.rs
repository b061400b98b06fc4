use std::f64::consts::{FRAC_PI_2, PI};

use arrival_targeting::approach::{ApproachOrbit, ApproachTargeting};
use arrival_targeting::body::TargetBody;
use arrival_targeting::capture::{
    AtmosphericExit, CaptureError, CaptureOrbit, CaptureStage, ExitState,
};
use arrival_targeting::frames::PoleOrientation;
use arrival_targeting::vector;

fn uranus() -> TargetBody {
    TargetBody {
        mu_m3_s2: 5.793939e15,
        radius_m: 25_559.0e3,
        rotation_rate_rad_s: -1.01237e-4,
        pole: PoleOrientation::from_degrees(257.311, -15.175),
        entry_interface_altitude_m: 1_500.0e3,
    }
}

fn neptune() -> TargetBody {
    TargetBody {
        mu_m3_s2: 6.8365299e15,
        radius_m: 24_622.0e3,
        rotation_rate_rad_s: 1.083385e-4,
        pole: PoleOrientation::from_degrees(299.36, 43.36),
        entry_interface_altitude_m: 1_000.0e3,
    }
}

fn aerocapture_exit() -> AtmosphericExit {
    let body = uranus();
    let exit = ExitState {
        radius_m: body.radius_m + 1_000.0e3,
        longitude_rad: (-190.81_f64).to_radians(),
        latitude_rad: 63.80_f64.to_radians(),
        speed_m_s: 20.41e3,
        flight_path_angle_rad: 8.78_f64.to_radians(),
        heading_rad: 273.297_f64.to_radians(),
    };
    CaptureOrbit::from_exit_state(&body, &exit).expect("captured coast orbit")
}

#[test]
fn exit_state_gives_inertial_conditions() {
    let exit = aerocapture_exit();
    assert!(
        (exit.speed_inertial_m_s - 20_377.0236).abs() < 1e-3,
        "v = {}",
        exit.speed_inertial_m_s
    );
    assert!((exit.flight_path_angle_inertial_rad.to_degrees() - 8.7943).abs() < 1e-3);
    assert!((vector::norm(&exit.position_m) - (uranus().radius_m + 1_000.0e3)).abs() < 1e-6);
}

#[test]
fn coast_orbit_elements_after_exit() {
    let exit = aerocapture_exit();
    let coast = &exit.coast;
    assert_eq!(coast.stage(), CaptureStage::Coast);
    assert!(
        (coast.semi_major_axis_m() - 274_803_661.42).abs() < 1.0,
        "a = {}",
        coast.semi_major_axis_m()
    );
    assert!((coast.eccentricity() - 0.9057296362).abs() < 1e-8);
    let el = coast.elements();
    assert!((el.inclination_rad.to_degrees() - 90.0339680).abs() < 1e-6);
    assert!((el.raan_rad - 6.0933104).abs() < 1e-6);
    assert!((el.arg_periapsis_rad - 1.7049695).abs() < 1e-6);
    assert!((exit.true_anomaly_rad.to_degrees() - 18.5124239).abs() < 1e-6);
    assert!((coast.apoapsis_radius_m() - 523_701_481.72).abs() < 1.0);
}

#[test]
fn coast_orbit_reproduces_exit_state() {
    let exit = aerocapture_exit();
    let position = exit.coast.position_at(exit.true_anomaly_rad);
    let velocity = exit.coast.velocity_at(exit.true_anomaly_rad);
    assert!(vector::norm(&vector::sub(&position, &exit.position_m)) < 1e-3);
    assert!(vector::norm(&vector::sub(&velocity, &exit.velocity_inertial_m_s)) < 1e-6);
}

#[test]
fn periapsis_raise_is_tangential_at_apoapsis() {
    let exit = aerocapture_exit();
    let raise = exit
        .coast
        .raise_periapsis_to_altitude(4_000.0e3)
        .expect("periapsis raise");
    assert!(
        (raise.delta_v_m_s - 66.0253814).abs() < 1e-5,
        "dv = {}",
        raise.delta_v_m_s
    );
    let tangential = vector::norm(&raise.velocity_after_m_s) - vector::norm(&raise.velocity_before_m_s);
    assert!((raise.delta_v_m_s - tangential).abs() < 1e-6);
    assert_eq!(raise.orbit.stage(), CaptureStage::PeriapsisRaised);
    assert!((raise.orbit.periapsis_altitude_m() - 4_000.0e3).abs() < 1e-3);
    assert!((raise.orbit.apoapsis_radius_m() - raise.apoapsis_radius_m).abs() < 1e-3);
    assert!((raise.orbit.elements().raan_rad - exit.coast.elements().raan_rad).abs() < 1e-12);
}

#[test]
fn repeated_periapsis_raise_is_free() {
    let exit = aerocapture_exit();
    let first = exit.coast.raise_periapsis_to_altitude(4_000.0e3).expect("first raise");
    let second = first.orbit.raise_periapsis_to_altitude(4_000.0e3).expect("second raise");
    assert!(second.delta_v_m_s < 1e-6, "dv = {}", second.delta_v_m_s);
}

#[test]
fn periapsis_raise_above_apoapsis_is_rejected() {
    let exit = aerocapture_exit();
    let too_high = exit.coast.apoapsis_radius_m() * 1.1;
    assert!(matches!(
        exit.coast.raise_periapsis(too_high),
        Err(CaptureError::InvalidTarget { .. })
    ));
}

#[test]
fn probe_targeting_burn_reaches_entry_interface() {
    let exit = aerocapture_exit();
    let raised = exit.coast.raise_periapsis_to_altitude(4_000.0e3).expect("raise");
    let outcome = raised
        .orbit
        .apply_impulsive_maneuver(178.0_f64.to_radians(), -90.0, 1_500.0e3)
        .expect("maneuver");

    let orbit = outcome.orbit().expect("still captured");
    assert_eq!(orbit.stage(), CaptureStage::Maneuvered);
    assert!((orbit.semi_major_axis_m() - 274_056_162.28).abs() < 1.0);
    assert!((orbit.eccentricity() - 0.9093033048).abs() < 1e-8);
    assert!((orbit.periapsis_altitude_m() / 1e3 + 703.01).abs() < 1e-2);
    assert!((outcome.periapsis_altitude_m() - orbit.periapsis_altitude_m()).abs() < 1e-6);
    assert!((outcome.true_anomaly_after_rad - 3.1125172).abs() < 1e-6);
    assert!((outcome.maneuver.delta_v_m_s + 90.0).abs() < 1e-12);

    let entry = outcome.entry().expect("entry conditions");
    assert!((entry.true_anomaly_rad - 5.6897941).abs() < 1e-6);
    assert!((entry.speed_inertial_m_s - 20_176.8046).abs() < 1e-3);
    assert!((entry.flight_path_angle_inertial_rad.to_degrees() + 16.16739).abs() < 1e-4);
    assert!((entry.speed_atm_m_s - 20_212.6138).abs() < 1e-3);
    assert!(outcome.time_to_entry_s().expect("coast time") > 0.0);

    assert_eq!(raised.orbit.stage(), CaptureStage::PeriapsisRaised);
    assert!((raised.orbit.periapsis_altitude_m() - 4_000.0e3).abs() < 1e-3);
}

#[test]
fn deflection_burn_away_from_atmosphere_reports_no_entry() {
    let exit = aerocapture_exit();
    let raised = exit.coast.raise_periapsis_to_altitude(4_000.0e3).expect("raise");
    let outcome = raised
        .orbit
        .apply_impulsive_maneuver(182.0_f64.to_radians(), 90.0, 1_500.0e3)
        .expect("maneuver");
    assert!(outcome.is_captured());
    assert!(outcome.periapsis_altitude_m() > 4_000.0e3);
    assert!(outcome.time_to_entry_s().is_none());
    assert!(matches!(
        outcome.entry(),
        Err(CaptureError::OutsideAtmosphere { .. })
    ));
}

#[test]
fn hyperbolic_elements_are_not_captured() {
    let approach = ApproachOrbit::new(
        &neptune(),
        &ApproachTargeting {
            v_inf_km_s: [17.78952518, 8.62038536, 3.15801163],
            periapsis_radius_m: 28_622.0e3,
            psi_rad: FRAC_PI_2,
            entry_altitude_m: None,
        },
    )
    .expect("approach");
    assert!(matches!(
        CaptureOrbit::new(&neptune(), *approach.conic(), CaptureStage::Coast),
        Err(CaptureError::NotCaptured { .. })
    ));
}

#[test]
fn insertion_keeps_plane_and_brakes_at_periapsis() {
    let approach = ApproachOrbit::new(
        &neptune(),
        &ApproachTargeting {
            v_inf_km_s: [17.78952518, 8.62038536, 3.15801163],
            periapsis_radius_m: 28_622.0e3,
            psi_rad: FRAC_PI_2,
            entry_altitude_m: None,
        },
    )
    .expect("approach");
    let insertion =
        CaptureOrbit::from_approach_periapsis(&approach, 500_000.0e3).expect("insertion");

    let orbit = &insertion.orbit;
    assert_eq!(orbit.stage(), CaptureStage::Insertion);
    assert!((orbit.periapsis_radius_m() - 28_622.0e3).abs() < 1e-3);
    assert!((orbit.apoapsis_altitude_m() - 500_000.0e3).abs() < 1e-3);
    assert!((orbit.elements().inclination_rad - approach.inclination_rad()).abs() < 1e-12);
    let expected = insertion.approach_periapsis_speed_m_s - insertion.orbit_periapsis_speed_m_s;
    assert!(expected > 0.0);
    assert!((insertion.delta_v_m_s - expected).abs() < 1e-6);

    let mu = neptune().mu_m3_s2;
    let vp = (mu * (2.0 / 28_622.0e3 - 1.0 / orbit.semi_major_axis_m())).sqrt();
    assert!((insertion.orbit_periapsis_speed_m_s - vp).abs() < 1e-6);
}

#[test]
fn timed_trajectory_spans_one_period() {
    let exit = aerocapture_exit();
    let orbit = &exit.coast;
    let samples = orbit.timed_trajectory(orbit.period_s(), 8).expect("trajectory");
    assert_eq!(samples.len(), 9);
    assert!(samples[0].state.true_anomaly_rad.abs() < 1e-9);
    assert!((samples[4].state.true_anomaly_rad - PI).abs() < 1e-6);
    let first = samples[0].state.position_m;
    let last = samples[8].state.position_m;
    assert!(vector::norm(&vector::sub(&first, &last)) < 1.0);
    assert!((samples[0].state.radius_m() - orbit.periapsis_radius_m()).abs() < 1e-3);
}

#[test]
fn timed_trajectory_needs_steps() {
    let exit = aerocapture_exit();
    assert!(exit.coast.timed_trajectory(1_000.0, 0).is_err());
}

#[test]
fn equatorial_exit_pins_the_node() {
    let body = uranus();
    let exit = ExitState {
        radius_m: body.radius_m + 1_000.0e3,
        longitude_rad: 0.3,
        latitude_rad: 0.0,
        speed_m_s: 20.41e3,
        flight_path_angle_rad: 8.78_f64.to_radians(),
        heading_rad: 0.0,
    };
    let exit = CaptureOrbit::from_exit_state(&body, &exit).expect("equatorial coast orbit");
    let el = exit.coast.elements();
    assert!(el.inclination_rad.abs() < 1e-7);
    assert_eq!(el.raan_rad, 0.0);
    assert!((el.semi_major_axis_m - 47_892_383.155).abs() < 1e-2, "a = {}", el.semi_major_axis_m);
    assert!((el.eccentricity - 0.4723270869).abs() < 1e-9);
    assert!((el.arg_periapsis_rad - 6.0262711954).abs() < 1e-8);
    assert!((exit.true_anomaly_rad - 0.5569141118).abs() < 1e-8);

    let position = exit.coast.position_at(exit.true_anomaly_rad);
    let velocity = exit.coast.velocity_at(exit.true_anomaly_rad);
    assert!(vector::norm(&vector::sub(&position, &exit.position_m)) < 1e-3);
    assert!(vector::norm(&vector::sub(&velocity, &exit.velocity_inertial_m_s)) < 1e-6);
}

#[test]
fn retrograde_equatorial_exit_is_recovered() {
    let body = uranus();
    let exit = ExitState {
        radius_m: body.radius_m + 1_000.0e3,
        longitude_rad: 0.3,
        latitude_rad: 0.0,
        speed_m_s: 16.0e3,
        flight_path_angle_rad: 8.78_f64.to_radians(),
        heading_rad: PI,
    };
    let exit = CaptureOrbit::from_exit_state(&body, &exit).expect("retrograde coast orbit");
    let el = exit.coast.elements();
    assert!((el.inclination_rad - PI).abs() < 1e-7);
    assert_eq!(el.raan_rad, 0.0);
    assert!((el.eccentricity - 0.6055850803).abs() < 1e-9);
    assert!((el.arg_periapsis_rad - 5.6341168622).abs() < 1e-8);
    assert!((exit.true_anomaly_rad - 0.3490684450).abs() < 1e-8);

    let position = exit.coast.position_at(exit.true_anomaly_rad);
    let velocity = exit.coast.velocity_at(exit.true_anomaly_rad);
    assert!(vector::norm(&vector::sub(&position, &exit.position_m)) < 1e-3);
    assert!(vector::norm(&vector::sub(&velocity, &exit.velocity_inertial_m_s)) < 1e-6);
}

#[test]
fn escape_burn_before_periapsis_still_enters() {
    let exit = aerocapture_exit();
    let outcome = exit
        .coast
        .apply_impulsive_maneuver(-0.8, 2_000.0, 1_500.0e3)
        .expect("maneuver");

    assert!(!outcome.is_captured());
    assert!(matches!(
        outcome.orbit(),
        Err(CaptureError::NotCaptured { eccentricity }) if eccentricity > 1.0
    ));
    assert!((outcome.elements.eccentricity - 1.2704190827).abs() < 1e-8);
    assert!((outcome.elements.semi_major_axis_m + 98_211_336.217).abs() < 1.0);
    assert!((outcome.true_anomaly_after_rad + 0.6746751757).abs() < 1e-8);
    assert!((outcome.periapsis_altitude_m() / 1e3 - 999.2194516).abs() < 1e-4);

    let entry = outcome.entry().expect("entry on the hyperbola");
    assert!((entry.true_anomaly_rad + 0.2579091186).abs() < 1e-8);
    assert!((entry.speed_inertial_m_s - 22_073.5017).abs() < 1e-3);
    let coast = outcome.time_to_entry_s().expect("coast time");
    assert!((coast - 568.6903).abs() < 1e-3, "coast = {coast}");
}

#[test]
fn escape_burn_at_periapsis_has_entry_behind() {
    let exit = aerocapture_exit();
    let outcome = exit
        .coast
        .apply_impulsive_maneuver(0.0, 20_000.0, 1_500.0e3)
        .expect("maneuver");

    assert!((outcome.elements.eccentricity - 6.386555468).abs() < 1e-8);
    assert!(outcome.true_anomaly_after_rad.abs() < 1e-6);
    assert!(outcome.periapsis_altitude_m() < 1_500.0e3);
    assert!(outcome.time_to_entry_s().is_none());
    match outcome.entry() {
        Err(CaptureError::EntryBehind {
            entry_true_anomaly_rad,
            ..
        }) => assert!((entry_true_anomaly_rad + 0.3152764406).abs() < 1e-8),
        other => panic!("unexpected entry result: {other:?}"),
    }
}

#[test]
fn capture_orbit_shape_matches_its_elements() {
    let exit = aerocapture_exit();
    let coast = &exit.coast;
    let el = coast.elements();
    assert_eq!(coast.periapsis_radius_m(), el.periapsis_radius());
    assert_eq!(Some(coast.apoapsis_radius_m()), el.apoapsis_radius());
    assert_eq!(Some(coast.period_s()), el.period_s());
    let kepler = 2.0 * PI * (el.semi_major_axis_m.powi(3) / el.mu_m3_s2).sqrt();
    assert!((coast.period_s() - kepler).abs() < 1e-6);
}
