use std::path::PathBuf;

use approx::assert_relative_eq;

use arrival_targeting::config::{load_bodies, load_scenario};
use arrival_targeting::report;
use arrival_targeting::transfer::{LegKind, MissionError, plan_delivery, scenario};

fn neptune_delivery() -> arrival_targeting::transfer::DeliveryConfig {
    let configs = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs");
    let bodies = load_bodies(configs.join("bodies")).expect("body catalog");
    let manifest =
        load_scenario(configs.join("scenarios/neptune-probe-orbiter.toml")).expect("scenario");
    scenario::from_config(&manifest, &bodies).expect("delivery config")
}

#[test]
fn neptune_probe_and_orbiter_delivery() {
    let profile = plan_delivery(&neptune_delivery()).expect("delivery profile");

    assert!(profile.probe.is_entry_system());
    assert!(!profile.orbiter.is_entry_system());
    assert_eq!(profile.deflection.first.kind, LegKind::Entry);
    assert_eq!(profile.deflection.second.kind, LegKind::Orbiter);
    assert_relative_eq!(profile.deflection.delta_v_m_s, 65.7302, epsilon = 1e-3);
    assert_relative_eq!(
        profile.deflection.first.time_of_flight_days(),
        14.175634,
        epsilon = 1e-5
    );
    assert_relative_eq!(profile.arrival.declination_deg(), 8.755479, epsilon = 1e-5);

    let entry = profile.probe.entry().expect("probe entry");
    assert_relative_eq!(entry.heading_atm_rad.to_degrees(), 14.910607, epsilon = 1e-5);

    let insertion = &profile.insertion;
    assert_relative_eq!(insertion.orbit.apoapsis_altitude_m(), 500_000.0e3, epsilon = 1e-3);
    assert!(insertion.delta_v_m_s > 0.0);
    assert_relative_eq!(
        profile.total_delta_v_m_s(),
        profile.deflection.delta_v_m_s + insertion.delta_v_m_s,
        epsilon = 1e-9
    );
}

#[test]
fn delivery_summary_carries_both_vehicles() {
    let profile = plan_delivery(&neptune_delivery()).expect("delivery profile");
    let summary = report::delivery_summary("neptune", "NEPTUNE", &profile).expect("summary");
    assert!(summary.probe.entry.is_some());
    assert!(summary.orbiter.entry.is_none());
    assert_eq!(summary.deflection.second.kind, "orbiter");
    assert_relative_eq!(summary.total_delta_v_m_s, profile.total_delta_v_m_s(), epsilon = 1e-12);
}

#[test]
fn apoapsis_below_periapsis_fails_insertion() {
    let mut config = neptune_delivery();
    config.orbiter.apoapsis_altitude_m = 1_000.0e3;
    assert!(matches!(
        plan_delivery(&config),
        Err(MissionError::Capture(_))
    ));
}

#[test]
fn probe_periapsis_above_interface_fails() {
    let mut config = neptune_delivery();
    config.probe.periapsis_radius_m = 28_622.0e3;
    assert!(matches!(
        plan_delivery(&config),
        Err(MissionError::Approach(_))
    ));
}
