use std::path::PathBuf;

use clap::Parser;

use arrival_targeting::approach::{ApproachOrbit, ApproachTargeting};
use arrival_targeting::body::TargetBody;
use arrival_targeting::config::{find_body, load_bodies};
use arrival_targeting::export::summary;
use arrival_targeting::report;
use arrival_targeting::time::seconds_to_days;
use arrival_targeting::transfer::{DeflectionLeg, LegKind, solve_deflection};
use arrival_targeting::units::{km_to_m, m_to_km};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Separation delta-v between two approaches sharing one excess velocity"
)]
struct Cli {
    /// Target body name (case-insensitive)
    #[arg(long)]
    body: String,

    /// Inertial excess velocity components in km/s
    #[arg(long, num_args = 3, required = true, allow_negative_numbers = true, value_names = ["VX", "VY", "VZ"])]
    v_inf: Vec<f64>,

    /// Maneuver radius as a multiple of the body radius
    #[arg(long)]
    maneuver_radius: f64,

    /// Periapsis altitude of the first approach in km
    #[arg(long)]
    first_periapsis_altitude: f64,

    /// Targeting angle of the first approach in degrees
    #[arg(long)]
    first_psi: f64,

    /// Entry-interface altitude of the first approach in km (omit for an orbiter)
    #[arg(long)]
    first_entry_altitude: Option<f64>,

    /// Periapsis altitude of the second approach in km
    #[arg(long)]
    second_periapsis_altitude: f64,

    /// Targeting angle of the second approach in degrees
    #[arg(long)]
    second_psi: f64,

    /// Entry-interface altitude of the second approach in km (omit for an orbiter)
    #[arg(long)]
    second_entry_altitude: Option<f64>,

    /// Write the deflection summary as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Body catalog (directory of TOML files or a YAML list)
    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let catalog = load_bodies(&cli.bodies)?;
    let body = find_body(&catalog, &cli.body)?.target_body();
    let v_inf_km_s = [cli.v_inf[0], cli.v_inf[1], cli.v_inf[2]];

    let first = build_approach(
        &body,
        v_inf_km_s,
        cli.first_periapsis_altitude,
        cli.first_psi,
        cli.first_entry_altitude,
    )?;
    let second = build_approach(
        &body,
        v_inf_km_s,
        cli.second_periapsis_altitude,
        cli.second_psi,
        cli.second_entry_altitude,
    )?;
    let solution = solve_deflection(&first, &second, cli.maneuver_radius)?;

    println!("=== Deflection ===");
    println!(
        "Maneuver point : r = {:.1} km ({:.1} body radii)",
        m_to_km(solution.maneuver_radius_m),
        cli.maneuver_radius
    );
    print_leg("First leg ", &solution.first);
    print_leg("Second leg", &solution.second);
    println!(
        "Deflection     : dv = {:.6} m/s, vector = [{:.6}, {:.6}, {:.6}] m/s",
        solution.delta_v_m_s,
        solution.delta_v_vec_m_s[0],
        solution.delta_v_vec_m_s[1],
        solution.delta_v_vec_m_s[2]
    );

    if let Some(path) = &cli.json {
        summary::write_json(path, &report::deflection_summary(&solution))?;
    }

    Ok(())
}

fn build_approach(
    body: &TargetBody,
    v_inf_km_s: [f64; 3],
    periapsis_altitude_km: f64,
    psi_deg: f64,
    entry_altitude_km: Option<f64>,
) -> anyhow::Result<ApproachOrbit> {
    Ok(ApproachOrbit::new(
        body,
        &ApproachTargeting {
            v_inf_km_s,
            periapsis_radius_m: body.radius_at_altitude(km_to_m(periapsis_altitude_km)),
            psi_rad: psi_deg.to_radians(),
            entry_altitude_m: entry_altitude_km.map(km_to_m),
        },
    )?)
}

fn print_leg(label: &str, leg: &DeflectionLeg) {
    let kind = match leg.kind {
        LegKind::Entry => "entry",
        LegKind::Orbiter => "orbiter",
    };
    println!(
        "{}     : {} psi = {:.2} deg, theta = {:.6} rad, sweep = {:.6} rad, TOF = {:.6} days",
        label,
        kind,
        leg.psi_rad.to_degrees(),
        leg.true_anomaly_at_maneuver_rad,
        leg.sweep_rad,
        leg.time_of_flight_days()
    );
    if let Some(seconds) = leg.time_to_entry_s {
        println!(
            "                 time to entry interface = {:.6} days",
            seconds_to_days(seconds)
        );
    }
}
