//! Radar beam geometry under the standard-atmosphere (4/3 Earth radius) model.

pub mod beam;
pub mod grid;

pub use beam::{
    radar_to_cartesian, radar_to_cartesian_with_tolerance, CartesianOffset,
    DEFAULT_ARCSIN_TOLERANCE, EARTH_RADIUS_M, EFFECTIVE_EARTH_RADIUS_M,
};
pub use grid::{height_field, height_field_with_tolerance, radar_to_cartesian_grid, CartesianGrid};

/// Failures raised by the geometry kernel. All of them are caller input
/// contract violations; nothing here is retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{quantity} out of domain: {value}")]
    Domain { quantity: String, value: f64 },
    #[error("arcsine argument {value} lies outside [-1, 1]")]
    ArcsinDomain { value: f64 },
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
