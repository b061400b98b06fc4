//! Transfer façade crate consolidating deflection solving and delivery planning, and exposing
//! the supporting model crates.

pub mod mission;

pub use arrival_approach as approach;
pub use arrival_capture as capture;
pub use arrival_impulsive as impulsive;
pub use facade::*;

mod facade;
