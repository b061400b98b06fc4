use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use arrival_targeting::config::{find_body, load_bodies, load_scenario};
use arrival_targeting::export::{self, summary, trajectory};
use arrival_targeting::report;
use arrival_targeting::time::seconds_to_hours;
use arrival_targeting::transfer::{plan_delivery, scenario};
use arrival_targeting::units::m_to_km;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Probe + orbiter delivery planner on a shared approach hyperbola"
)]
struct Cli {
    /// Scenario manifest (TOML)
    #[arg(long)]
    scenario: PathBuf,

    /// Body catalog (directory of TOML files or a YAML list)
    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// Write the delivery summary as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write one timed revolution of the orbiter's capture ellipse to CSV
    #[arg(long)]
    orbit_csv: Option<PathBuf>,

    /// Number of time steps for the capture-orbit trajectory
    #[arg(long, default_value_t = 360)]
    orbit_steps: usize,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let catalog = load_bodies(&cli.bodies)?;
    let manifest = load_scenario(&cli.scenario)
        .with_context(|| format!("loading scenario {}", cli.scenario.display()))?;
    let body_name = find_body(&catalog, &manifest.body)?.name;
    let config = scenario::from_config(&manifest, &catalog)?;
    let profile = plan_delivery(&config)?;

    let entry = profile
        .probe
        .entry()
        .context("probe approach carries no entry interface")?;
    let deflection = &profile.deflection;
    let insertion = &profile.insertion;

    println!("=== Delivery: {} ===", manifest.name);
    println!(
        "Arrival        : {} declination = {:.4} deg",
        body_name,
        profile.arrival.declination_deg()
    );
    println!(
        "Probe entry    : v = {:.3} m/s, fpa = {:.4} deg, heading = {:.4} deg",
        entry.speed_atm_m_s,
        entry.flight_path_angle_atm_rad.to_degrees(),
        entry.heading_atm_rad.to_degrees()
    );
    println!(
        "Deflection     : dv = {:.6} m/s at {:.1} km, TOF probe = {:.6} days, orbiter = {:.6} days",
        deflection.delta_v_m_s,
        m_to_km(deflection.maneuver_radius_m),
        deflection.first.time_of_flight_days(),
        deflection.second.time_of_flight_days()
    );
    println!(
        "Orbit insertion: dv = {:.3} m/s into {:.1} x {:.1} km, period = {:.2} h",
        insertion.delta_v_m_s,
        m_to_km(insertion.orbit.periapsis_altitude_m()),
        m_to_km(insertion.orbit.apoapsis_altitude_m()),
        seconds_to_hours(insertion.orbit.period_s())
    );
    println!("Total impulse  : {:.3} m/s", profile.total_delta_v_m_s());

    if let Some(path) = &cli.orbit_csv {
        let samples = insertion
            .orbit
            .timed_trajectory(insertion.orbit.period_s(), cli.orbit_steps)?;
        let mut writer = export::writer_for_path(path)?;
        trajectory::write_header(writer.as_mut())?;
        for record in report::timed_records(insertion.orbit.body(), &samples) {
            record.write_to(writer.as_mut())?;
        }
        writer.flush()?;
        info!("wrote {} orbit samples to {}", samples.len(), path.display());
    }

    if let Some(path) = &cli.json {
        summary::write_json(
            path,
            &report::delivery_summary(&manifest.name, &body_name, &profile)?,
        )?;
    }

    Ok(())
}
