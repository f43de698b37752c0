use super::{RemapError, KM_PER_DEGREE};
use serde::{Deserialize, Serialize};

/// Bounding box `[min_x, min_y, max_x, max_y]` (lower-left, upper-right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn check(self) -> Result<Self, RemapError> {
        let finite = [self.min_x, self.min_y, self.max_x, self.max_y, self.width(), self.height()]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.width() > 0.0 && self.height() > 0.0 {
            Ok(self)
        } else {
            Err(RemapError::BadExtent(self))
        }
    }
}

/// North-up affine transform anchored at the upper-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub origin_y: f64,
    /// Negative: rows advance southwards.
    pub pixel_height: f64,
    pub rows: usize,
    pub cols: usize,
}

impl GeoTransform {
    pub fn from_extent(extent: Extent, rows: usize, cols: usize) -> Result<Self, RemapError> {
        let extent = extent.check()?;
        if rows == 0 || cols == 0 {
            return Err(RemapError::EmptyGrid { rows, cols });
        }
        Ok(Self {
            origin_x: extent.min_x,
            pixel_width: extent.width() / cols as f64,
            origin_y: extent.max_y,
            pixel_height: -extent.height() / rows as f64,
            rows,
            cols,
        })
    }

    /// The six GDAL coefficients.
    pub fn coefficients(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            0.0,
            self.origin_y,
            0.0,
            self.pixel_height,
        ]
    }

    pub fn pixel_centre(&self, col: usize, row: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y + (row as f64 + 0.5) * self.pixel_height,
        )
    }

    /// Pixel containing `(x, y)`, if inside the grid.
    pub fn pixel_of(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let col = ((x - self.origin_x) / self.pixel_width).floor();
        let row = ((y - self.origin_y) / self.pixel_height).floor();
        if !(col >= 0.0 && row >= 0.0) || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }
}

/// Rows and columns of a lat/lon grid covering `extent_deg` at roughly
/// `resolution_km` per pixel.
pub fn target_dimensions(
    extent_deg: Extent,
    resolution_km: f64,
) -> Result<(usize, usize), RemapError> {
    if !(resolution_km > 0.0) {
        return Err(RemapError::BadResolution(resolution_km));
    }
    let extent = extent_deg.check()?;
    let cols = extent.width() * KM_PER_DEGREE / resolution_km;
    let rows = extent.height() * KM_PER_DEGREE / resolution_km;
    if !(cols.is_finite() && rows.is_finite()) {
        return Err(RemapError::BadExtent(extent));
    }
    let (rows, cols) = (rows as usize, cols as usize);
    if rows == 0 || cols == 0 {
        return Err(RemapError::EmptyGrid { rows, cols });
    }
    Ok((rows, cols))
}
