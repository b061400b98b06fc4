use thiserror::Error;

/// Raised whenever a requested geometry cannot exist on the given conic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{quantity}: inverse-trig argument {value} lies outside [-1, 1]")]
    OutOfDomain { quantity: &'static str, value: f64 },
    #[error("{quantity} is degenerate (magnitude {magnitude:e})")]
    Degenerate { quantity: &'static str, magnitude: f64 },
    #[error("eccentricity {eccentricity} does not describe a hyperbola")]
    NotHyperbolic { eccentricity: f64 },
    #[error("periapsis radius {periapsis_radius_m} m lies inside the body radius {body_radius_m} m")]
    PeriapsisBelowSurface {
        periapsis_radius_m: f64,
        body_radius_m: f64,
    },
    #[error("true anomaly {true_anomaly_rad} rad lies beyond the hyperbolic asymptote")]
    BeyondAsymptote { true_anomaly_rad: f64 },
    #[error("{solver} did not converge after {iterations} iterations")]
    NoConvergence {
        solver: &'static str,
        iterations: usize,
    },
    #[error("invalid {quantity}: {value}")]
    InvalidInput { quantity: &'static str, value: f64 },
}
