//! Configuration models and loaders for body catalogs and delivery scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrival_core::body::TargetBody;
use arrival_core::frames::PoleOrientation;
use arrival_core::units::km_to_m;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

/// Target-body constants parsed from the body catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mu_m3_s2: f64,
    pub radius_km: f64,
    pub rotation_rate_rad_s: f64,
    pub pole_ra_deg: f64,
    pub pole_dec_deg: f64,
    /// Altitude of the atmospheric entry interface.
    pub entry_interface_altitude_km: f64,
}

impl BodyConfig {
    /// Runtime constants in SI units.
    pub fn target_body(&self) -> TargetBody {
        TargetBody {
            mu_m3_s2: self.mu_m3_s2,
            radius_m: km_to_m(self.radius_km),
            rotation_rate_rad_s: self.rotation_rate_rad_s,
            pole: PoleOrientation::from_degrees(self.pole_ra_deg, self.pole_dec_deg),
            entry_interface_altitude_m: km_to_m(self.entry_interface_altitude_km),
        }
    }
}

/// Probe leg of a delivery scenario.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProbeConfig {
    pub periapsis_km: f64,
    pub psi_deg: f64,
    /// Defaults to the body's entry interface.
    #[serde(default)]
    pub entry_altitude_km: Option<f64>,
}

/// Orbiter leg of a delivery scenario.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OrbiterConfig {
    pub periapsis_km: f64,
    pub psi_deg: f64,
    pub apoapsis_altitude_km: f64,
}

/// Probe/orbiter delivery scenario manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub body: String,
    /// Inertial excess velocity (km/s).
    pub v_inf_km_s: [f64; 3],
    pub probe: ProbeConfig,
    pub orbiter: OrbiterConfig,
    /// Separation radius as a multiple of the body radius.
    pub maneuver_radius_body_radii: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("body catalog is empty")]
    EmptyCatalog,
}

/// Load body constants from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    let bodies: Vec<BodyConfig> = load_records(path.as_ref())?;
    debug!("loaded {} bodies from {}", bodies.len(), path.as_ref().display());
    Ok(bodies)
}

/// Load a single delivery scenario from TOML.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Case-insensitive lookup by body name.
pub fn find_body(catalog: &[BodyConfig], name: &str) -> Result<BodyConfig, ConfigError> {
    if catalog.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    let upper = name.to_uppercase();
    catalog
        .iter()
        .find(|body| body.name.to_uppercase() == upper)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownBody(name.to_string()))
}

fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
