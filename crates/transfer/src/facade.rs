//! Re-exported APIs for consumers of the transfer crate.

pub use crate::mission::arrival::{ArrivalDeclination, arrival_declination};
pub use crate::mission::deflection::{
    DeflectionError, DeflectionLeg, DeflectionSolution, LegKind, solve_deflection,
};
pub use crate::mission::{
    DeliveryConfig, DeliveryProfile, MissionError, OrbiterTargeting, ProbeTargeting, plan_delivery,
};

pub mod scenario {
    use arrival_config::{BodyConfig, ConfigError, ScenarioConfig, find_body};
    use arrival_core::units::km_to_m;

    use crate::mission::{DeliveryConfig, OrbiterTargeting, ProbeTargeting};

    /// Convert a scenario manifest into a runtime `DeliveryConfig`, resolving the body in `catalog`.
    pub fn from_config(
        scenario: &ScenarioConfig,
        catalog: &[BodyConfig],
    ) -> Result<DeliveryConfig, ConfigError> {
        let body = find_body(catalog, &scenario.body)?.target_body();
        let entry_altitude_m = scenario
            .probe
            .entry_altitude_km
            .map(km_to_m)
            .unwrap_or(body.entry_interface_altitude_m);

        Ok(DeliveryConfig {
            body,
            v_inf_km_s: scenario.v_inf_km_s,
            probe: ProbeTargeting {
                periapsis_radius_m: km_to_m(scenario.probe.periapsis_km),
                psi_rad: scenario.probe.psi_deg.to_radians(),
                entry_altitude_m,
            },
            orbiter: OrbiterTargeting {
                periapsis_radius_m: km_to_m(scenario.orbiter.periapsis_km),
                psi_rad: scenario.orbiter.psi_deg.to_radians(),
                apoapsis_altitude_m: km_to_m(scenario.orbiter.apoapsis_altitude_km),
            },
            maneuver_radius_body_radii: scenario.maneuver_radius_body_radii,
        })
    }
}
