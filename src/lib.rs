//! Hyperbolic-arrival targeting and two-point transfer engine.
//!
//! The models live in the workspace crates under `crates/`; this library re-exports
//! them so front-ends (CLI, integration tests) share one entry point, and hosts the
//! glue that turns model values into export records.

pub mod report;

pub use arrival_approach as approach;
pub use arrival_capture as capture;
pub use arrival_config as config;
pub use arrival_core::{body, constants, frames, time, units, vector};
pub use arrival_export as export;
pub use arrival_impulsive as impulsive;
pub use arrival_orbits as orbits;
pub use arrival_transfer as transfer;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
