//! Impulsive transfer utilities: two-point conic boundary-value solutions and Lagrange coefficients.

pub mod boundary;
pub mod lagrange;

pub use boundary::{BoundaryValueProblem, BoundaryValueSolution, ConicKind, solve as solve_boundary_value};
pub use lagrange::LagrangeCoefficients;
