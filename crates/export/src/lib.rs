//! Export helpers for CSV trajectory samples and JSON summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Buffered writer for an export target. `-` selects stdout; missing parent
/// directories are created.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
        _ => {}
    }
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

pub mod trajectory {
    use std::io::{self, Write};

    const HEADER: &str = "true_anomaly_rad,time_s,x_m,y_m,z_m,vx_m_s,vy_m_s,vz_m_s,radius_m,altitude_m";

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sampled state along a conic.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub true_anomaly_rad: f64,
        /// Empty when the sample was taken by anomaly rather than time.
        pub time_s: Option<f64>,
        pub position_m: [f64; 3],
        pub velocity_m_s: [f64; 3],
        pub radius_m: f64,
        pub altitude_m: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let time = self.time_s.map(|t| format!("{t:.3}")).unwrap_or_default();
            writeln!(
                writer,
                "{:.9},{},{:.3},{:.3},{:.3},{:.6},{:.6},{:.6},{:.3},{:.3}",
                self.true_anomaly_rad,
                time,
                self.position_m[0],
                self.position_m[1],
                self.position_m[2],
                self.velocity_m_s[0],
                self.velocity_m_s[1],
                self.velocity_m_s[2],
                self.radius_m,
                self.altitude_m,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};
    use std::path::Path;

    use super::writer_for_path;

    /// Entry-interface flight conditions.
    #[derive(Debug, Clone, Serialize)]
    pub struct EntrySummary {
        pub altitude_km: f64,
        pub true_anomaly_deg: f64,
        pub speed_inertial_m_s: f64,
        pub flight_path_angle_inertial_deg: f64,
        pub latitude_deg: f64,
        pub longitude_deg: f64,
        pub speed_atm_m_s: f64,
        pub flight_path_angle_atm_deg: f64,
        pub heading_atm_deg: f64,
    }

    /// Approach hyperbola elements and B-plane targeting.
    #[derive(Debug, Clone, Serialize)]
    pub struct ApproachSummary {
        pub body: String,
        pub v_inf_km_s: [f64; 3],
        pub v_inf_magnitude_km_s: f64,
        pub declination_deg: f64,
        pub semi_major_axis_km: f64,
        pub eccentricity: f64,
        pub turn_half_angle_deg: f64,
        pub periapsis_radius_km: f64,
        pub periapsis_speed_m_s: f64,
        pub psi_deg: f64,
        pub inclination_deg: f64,
        pub raan_deg: f64,
        pub arg_periapsis_deg: f64,
        pub b_magnitude_km: f64,
        pub b_dot_t_km: f64,
        pub b_dot_r_km: f64,
        pub entry: Option<EntrySummary>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct LegSummary {
        pub kind: String,
        pub psi_deg: f64,
        pub periapsis_radius_km: f64,
        pub true_anomaly_at_maneuver_deg: f64,
        pub sweep_deg: f64,
        pub velocity_at_maneuver_m_s: [f64; 3],
        pub time_of_flight_days: f64,
        pub time_to_entry_days: Option<f64>,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct DeflectionSummary {
        pub maneuver_radius_km: f64,
        pub delta_v_vec_m_s: [f64; 3],
        pub delta_v_m_s: f64,
        pub first: LegSummary,
        pub second: LegSummary,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct InsertionSummary {
        pub periapsis_altitude_km: f64,
        pub apoapsis_altitude_km: f64,
        pub period_hours: f64,
        pub delta_v_m_s: f64,
    }

    /// Envelope for a complete probe + orbiter delivery.
    #[derive(Debug, Clone, Serialize)]
    pub struct DeliverySummary {
        pub scenario: String,
        pub probe: ApproachSummary,
        pub orbiter: ApproachSummary,
        pub deflection: DeflectionSummary,
        pub insertion: InsertionSummary,
        pub total_delta_v_m_s: f64,
    }

    /// Write any summary as pretty JSON to `path` (`-` for stdout).
    pub fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}
