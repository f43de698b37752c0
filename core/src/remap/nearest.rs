use super::geostationary::GeosProjection;
use super::geotransform::{target_dimensions, Extent, GeoTransform};
use super::RemapError;
use log::info;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Raw count marking pixels without data.
pub const RAW_FILL: f32 = -1.0;

/// Linear count-to-physical conversion stored alongside the raw raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub scale: f32,
    pub offset: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemappedGrid {
    /// Calibrated values; `NaN` where no source pixel applies.
    pub data: Array2<f32>,
    pub transform: GeoTransform,
}

impl RemappedGrid {
    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_finite()).count()
    }
}

/// Nearest-neighbour resampling of a geostationary raster onto a lat/lon grid.
///
/// `source_extent_m` locates the raw raster in projection metres. Target
/// pixels whose centre is hidden from the satellite, falls outside the
/// source, or lands on a [`RAW_FILL`] count come out as `NaN`.
pub fn remap_nearest(
    raw: ArrayView2<f32>,
    source_extent_m: Extent,
    projection: &GeosProjection,
    target_extent_deg: Extent,
    resolution_km: f64,
    calibration: Calibration,
) -> Result<RemappedGrid, RemapError> {
    let started = Instant::now();
    let (src_rows, src_cols) = raw.dim();
    let source = GeoTransform::from_extent(source_extent_m, src_rows, src_cols)?;
    let (rows, cols) = target_dimensions(target_extent_deg, resolution_km)?;
    let transform = GeoTransform::from_extent(target_extent_deg, rows, cols)?;

    let data = Array2::from_shape_fn((rows, cols), |(row, col)| {
        let (lon, lat) = transform.pixel_centre(col, row);
        projection
            .forward(lon, lat)
            .and_then(|(x, y)| source.pixel_of(x, y))
            .map(|(src_col, src_row)| raw[[src_row, src_col]])
            .filter(|&count| count != RAW_FILL && count.is_finite())
            .map_or(f32::NAN, |count| count * calibration.scale + calibration.offset)
    });

    info!(
        "remapped {}x{} raster to {}x{} grid in {:.3}s",
        src_rows,
        src_cols,
        rows,
        cols,
        started.elapsed().as_secs_f64()
    );
    Ok(RemappedGrid { data, transform })
}
