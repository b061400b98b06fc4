use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use arrival_targeting::approach::{ApproachOrbit, ApproachTargeting};
use arrival_targeting::config::{find_body, load_bodies};
use arrival_targeting::export::{self, summary, trajectory};
use arrival_targeting::report;
use arrival_targeting::transfer::arrival_declination;
use arrival_targeting::units::{km_to_m, m_to_km, ms_to_kms};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Hyperbolic approach geometry and entry-interface conditions"
)]
struct Cli {
    /// Target body name (case-insensitive)
    #[arg(long)]
    body: String,

    /// Inertial excess velocity components in km/s
    #[arg(long, num_args = 3, required = true, allow_negative_numbers = true, value_names = ["VX", "VY", "VZ"])]
    v_inf: Vec<f64>,

    /// Periapsis altitude in km
    #[arg(long)]
    periapsis_altitude: f64,

    /// B-plane targeting angle psi in degrees
    #[arg(long, default_value_t = 0.0)]
    psi: f64,

    /// Entry-interface altitude in km; marks the approach as an entry system
    #[arg(long)]
    entry_altitude: Option<f64>,

    /// Treat the approach as an entry system at the catalog's interface altitude
    #[arg(long, default_value_t = false)]
    entry: bool,

    /// Write inbound-branch samples to this CSV path (`-` for stdout)
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Inbound sampling starts at this many body radii
    #[arg(long, default_value_t = 20.0)]
    sample_start_radii: f64,

    /// Number of sample intervals
    #[arg(long, default_value_t = 200)]
    sample_steps: usize,

    /// Write the approach summary as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Body catalog (directory of TOML files or a YAML list)
    #[arg(long, default_value = "configs/bodies")]
    bodies: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let catalog = load_bodies(&cli.bodies)
        .with_context(|| format!("loading body catalog {}", cli.bodies.display()))?;
    let body_config = find_body(&catalog, &cli.body)?;
    let body = body_config.target_body();
    let v_inf_km_s = [cli.v_inf[0], cli.v_inf[1], cli.v_inf[2]];

    let entry_altitude_m = match (cli.entry_altitude, cli.entry) {
        (Some(km), _) => Some(km_to_m(km)),
        (None, true) => Some(body.entry_interface_altitude_m),
        (None, false) => None,
    };
    let approach = ApproachOrbit::new(
        &body,
        &ApproachTargeting {
            v_inf_km_s,
            periapsis_radius_m: body.radius_at_altitude(km_to_m(cli.periapsis_altitude)),
            psi_rad: cli.psi.to_radians(),
            entry_altitude_m,
        },
    )?;
    let declination = arrival_declination(&body, &v_inf_km_s)?;
    let b_plane = approach.b_plane();

    println!("=== Approach: {} ===", body_config.name);
    println!(
        "Excess velocity : |v_inf| = {:.6} km/s, declination = {:.4} deg",
        ms_to_kms(approach.v_inf_m_s()),
        declination.declination_deg()
    );
    println!(
        "Hyperbola       : a = {:.3} km, e = {:.6}, beta = {:.6} rad",
        m_to_km(approach.semi_major_axis_m()),
        approach.eccentricity(),
        approach.turn_half_angle_rad()
    );
    println!(
        "Orientation     : i = {:.4} deg, RAAN = {:.4} deg, argp = {:.4} deg",
        approach.inclination_rad().to_degrees(),
        approach.raan_rad().to_degrees(),
        approach.arg_periapsis_rad().to_degrees()
    );
    println!(
        "Periapsis       : r = {:.1} km, v = {:.3} m/s",
        m_to_km(approach.periapsis_radius_m()),
        approach.periapsis_speed_m_s()
    );
    println!(
        "B-plane         : |B| = {:.1} km, B.T = {:.1} km, B.R = {:.1} km",
        m_to_km(b_plane.b_magnitude_m),
        m_to_km(b_plane.b_dot_t()),
        m_to_km(b_plane.b_dot_r())
    );
    if let Some(entry) = approach.entry() {
        println!(
            "Entry interface : h = {:.1} km, theta = {:.6} rad, lat = {:.4} deg, lon = {:.4} deg",
            m_to_km(entry.altitude_m),
            entry.true_anomaly_rad,
            entry.latitude_rad.to_degrees(),
            entry.longitude_rad.to_degrees()
        );
        println!(
            "Inertial        : v = {:.3} m/s, fpa = {:.4} deg",
            entry.speed_inertial_m_s,
            entry.flight_path_angle_inertial_rad.to_degrees()
        );
        println!(
            "Atm-relative    : v = {:.3} m/s, fpa = {:.4} deg, heading = {:.4} deg",
            entry.speed_atm_m_s,
            entry.flight_path_angle_atm_rad.to_degrees(),
            entry.heading_atm_rad.to_degrees()
        );
    }

    if let Some(path) = &cli.samples {
        let start = approach.inbound_true_anomaly_at(cli.sample_start_radii * body.radius_m)?;
        let end = approach.entry().map(|e| e.true_anomaly_rad).unwrap_or(0.0);
        let states = approach.sample(&report::anomaly_grid(start, end, cli.sample_steps))?;
        let mut writer = export::writer_for_path(path)?;
        trajectory::write_header(writer.as_mut())?;
        for record in report::trajectory_records(&body, &states) {
            record.write_to(writer.as_mut())?;
        }
        writer.flush()?;
        info!("wrote {} samples to {}", states.len(), path.display());
    }

    if let Some(path) = &cli.json {
        summary::write_json(path, &report::approach_summary(&body_config.name, &approach)?)?;
    }

    Ok(())
}
