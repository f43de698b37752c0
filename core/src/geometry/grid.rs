use super::beam::{radar_to_cartesian_with_tolerance, DEFAULT_ARCSIN_TOLERANCE};
use super::GeometryError;
use crate::math::broadcast::{broadcast_gates, broadcast_rays};
use ndarray::{Array2, ArrayView2};

/// Cartesian coordinates of every gate in an (azimuth x range) grid.
#[derive(Debug, Clone)]
pub struct CartesianGrid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub z: Array2<f64>,
}

/// Applies the beam geometry elementwise over equally shaped arrays.
///
/// Stops at the first gate that violates the geometry domain; no partial
/// result is returned.
pub fn radar_to_cartesian_grid(
    ranges_km: ArrayView2<f64>,
    azimuths_deg: ArrayView2<f64>,
    elevations_deg: ArrayView2<f64>,
    tolerance: f64,
) -> Result<CartesianGrid, GeometryError> {
    for found in [azimuths_deg.shape(), elevations_deg.shape()] {
        if found != ranges_km.shape() {
            return Err(GeometryError::ShapeMismatch {
                expected: ranges_km.shape().to_vec(),
                found: found.to_vec(),
            });
        }
    }

    let dim = ranges_km.raw_dim();
    let mut x = Array2::zeros(dim);
    let mut y = Array2::zeros(dim);
    let mut z = Array2::zeros(dim);

    for ((row, col), &range) in ranges_km.indexed_iter() {
        let offset = radar_to_cartesian_with_tolerance(
            range,
            azimuths_deg[[row, col]],
            elevations_deg[[row, col]],
            tolerance,
        )
        .map_err(|err| match err {
            GeometryError::Domain { quantity, value } => GeometryError::Domain {
                quantity: format!("{quantity} at ray {row} gate {col}"),
                value,
            },
            other => other,
        })?;
        x[[row, col]] = offset.x_m;
        y[[row, col]] = offset.y_m;
        z[[row, col]] = offset.z_m;
    }

    Ok(CartesianGrid { x, y, z })
}

/// Height above sea level of every gate of a PPI-style volume.
///
/// `elevations_deg` holds one value per ray and must be as long as
/// `azimuths_deg`. The result is shaped `(azimuths.len(), ranges.len())`.
pub fn height_field(
    ranges_km: &[f64],
    azimuths_deg: &[f64],
    elevations_deg: &[f64],
    antenna_altitude_m: f64,
) -> Result<Array2<f64>, GeometryError> {
    height_field_with_tolerance(
        ranges_km,
        azimuths_deg,
        elevations_deg,
        antenna_altitude_m,
        DEFAULT_ARCSIN_TOLERANCE,
    )
}

pub fn height_field_with_tolerance(
    ranges_km: &[f64],
    azimuths_deg: &[f64],
    elevations_deg: &[f64],
    antenna_altitude_m: f64,
    tolerance: f64,
) -> Result<Array2<f64>, GeometryError> {
    if azimuths_deg.len() != elevations_deg.len() {
        return Err(GeometryError::InvalidInput(format!(
            "{} azimuths but {} elevations",
            azimuths_deg.len(),
            elevations_deg.len()
        )));
    }
    if !antenna_altitude_m.is_finite() {
        return Err(GeometryError::Domain {
            quantity: "antenna altitude (m)".into(),
            value: antenna_altitude_m,
        });
    }
    if let Some((gate, &value)) = ranges_km
        .iter()
        .enumerate()
        .find(|(_, r)| !r.is_finite() || **r < 0.0)
    {
        return Err(GeometryError::Domain {
            quantity: format!("slant range (km) at gate {gate}"),
            value,
        });
    }

    let ranges = broadcast_gates(ranges_km, azimuths_deg.len());
    let azimuths = broadcast_rays(azimuths_deg, ranges_km.len());
    let elevations = broadcast_rays(elevations_deg, ranges_km.len());

    let grid = radar_to_cartesian_grid(
        ranges.view(),
        azimuths.view(),
        elevations.view(),
        tolerance,
    )?;
    Ok(grid.z + antenna_altitude_m)
}
