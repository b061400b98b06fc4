//! Conic-section orbit helpers: element recovery, state propagation along a conic,
//! Kepler timing, and atmospheric entry-interface conditions.

mod conic;
mod entry;
mod error;
pub mod kepler;
mod trig;

pub use conic::{Branch, ConicElements, StateElements, StateSample};
pub use entry::EntryInterface;
pub use error::GeometryError;
pub use trig::{angle_from_cosine_and_sign, checked_acos, checked_asin};
