//! Remapping of geostationary imagery onto a regular lat/lon grid.
//!
//! Source rasters are addressed in geostationary projection metres (scan
//! angle times perspective height), targets in degrees.

pub mod geostationary;
pub mod geotransform;
pub mod nearest;

pub use geostationary::GeosProjection;
pub use geotransform::{target_dimensions, Extent, GeoTransform};
pub use nearest::{remap_nearest, Calibration, RemappedGrid, RAW_FILL};

/// Kilometres spanned by one degree, used to size target grids.
pub const KM_PER_DEGREE: f64 = 111.32;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RemapError {
    #[error("extent is empty or inverted: {0:?}")]
    BadExtent(Extent),
    #[error("resolution must be positive, got {0} km")]
    BadResolution(f64),
    #[error("target grid would be empty ({rows} x {cols})")]
    EmptyGrid { rows: usize, cols: usize },
}
