use super::field::{FieldMeta, FieldRecord, FILL_VALUE};
use super::VolumeError;
use crate::geometry::{height_field_with_tolerance, GeometryError};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// A radar volume in native (ray, gate) coordinates.
///
/// Rays from all sweeps are stacked; `sweep_start_ray_index` marks where
/// each sweep begins. Gate ranges are stored in metres as written by the
/// radar file readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarVolume {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub ranges_m: Vec<f64>,
    pub azimuths_deg: Vec<f64>,
    pub elevations_deg: Vec<f64>,
    #[serde(default)]
    pub sweep_start_ray_index: Vec<usize>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldRecord>,
}

impl RadarVolume {
    pub fn new(
        name: &str,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
        ranges_m: Vec<f64>,
    ) -> Self {
        Self {
            name: name.to_string(),
            latitude_deg,
            longitude_deg,
            altitude_m,
            ranges_m,
            azimuths_deg: Vec::new(),
            elevations_deg: Vec::new(),
            sweep_start_ray_index: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Appends a PPI sweep at a fixed elevation.
    pub fn push_sweep(&mut self, elevation_deg: f64, azimuths_deg: &[f64]) {
        self.sweep_start_ray_index.push(self.azimuths_deg.len());
        self.azimuths_deg.extend_from_slice(azimuths_deg);
        self.elevations_deg
            .extend(std::iter::repeat(elevation_deg).take(azimuths_deg.len()));
    }

    pub fn rays(&self) -> usize {
        self.azimuths_deg.len()
    }

    pub fn gates(&self) -> usize {
        self.ranges_m.len()
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.rays(), self.gates())
    }

    pub fn sweeps(&self) -> usize {
        self.sweep_start_ray_index.len().max(1)
    }

    pub fn validate(&self) -> Result<(), VolumeError> {
        if self.ranges_m.is_empty() {
            return Err(VolumeError::Empty("gates"));
        }
        if self.azimuths_deg.is_empty() {
            return Err(VolumeError::Empty("rays"));
        }
        if self.azimuths_deg.len() != self.elevations_deg.len() {
            return Err(VolumeError::RayMismatch {
                rays: self.azimuths_deg.len(),
                elevations: self.elevations_deg.len(),
            });
        }
        if let Some(&first) = self.sweep_start_ray_index.first() {
            if first != 0 {
                return Err(VolumeError::SweepLayout(format!(
                    "first sweep starts at ray {first}"
                )));
            }
        }
        if self.sweep_start_ray_index.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VolumeError::SweepLayout(
                "sweep start indices must increase".into(),
            ));
        }
        if let Some(&last) = self.sweep_start_ray_index.last() {
            if last >= self.rays() {
                return Err(VolumeError::SweepLayout(format!(
                    "sweep starts at ray {last} but volume has {} rays",
                    self.rays()
                )));
            }
        }
        for (name, field) in &self.fields {
            if field.mask.dim() != field.dim() {
                return Err(VolumeError::MaskShape {
                    name: name.clone(),
                    expected: field.dim(),
                    found: field.mask.dim(),
                });
            }
            if field.dim() != self.dim() {
                return Err(VolumeError::FieldShape {
                    name: name.clone(),
                    expected: self.dim(),
                    found: field.dim(),
                });
            }
        }
        Ok(())
    }

    /// Ray indices belonging to `sweep`.
    pub fn sweep_rays(&self, sweep: usize) -> Option<Range<usize>> {
        if self.sweep_start_ray_index.is_empty() {
            return (sweep == 0).then(|| 0..self.rays());
        }
        let start = *self.sweep_start_ray_index.get(sweep)?;
        let end = self
            .sweep_start_ray_index
            .get(sweep + 1)
            .copied()
            .unwrap_or(self.rays());
        Some(start..end)
    }

    pub fn ranges_km(&self) -> Vec<f64> {
        self.ranges_m.iter().map(|r| r / 1000.0).collect()
    }

    /// Height above sea level of every gate.
    pub fn height_field(
        &self,
        antenna_altitude_m: Option<f64>,
        tolerance: f64,
    ) -> Result<Array2<f64>, GeometryError> {
        height_field_with_tolerance(
            &self.ranges_km(),
            &self.azimuths_deg,
            &self.elevations_deg,
            antenna_altitude_m.unwrap_or(self.altitude_m),
            tolerance,
        )
    }

    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.get(name)
    }

    /// Attaches a derived field, replacing any field of the same name.
    ///
    /// Gates holding [`FILL_VALUE`] are masked. When a `reference` field is
    /// named and present (usually [`super::REFERENCE_FIELD`]) its mask is merged in
    /// and its fill value adopted.
    pub fn add_field(
        &mut self,
        name: &str,
        data: Array2<f64>,
        mut meta: FieldMeta,
        reference: Option<&str>,
    ) -> Result<(), VolumeError> {
        if data.dim() != self.dim() {
            return Err(VolumeError::FieldShape {
                name: name.to_string(),
                expected: self.dim(),
                found: data.dim(),
            });
        }

        let mut mask = data.mapv(|v| v == FILL_VALUE);
        meta.fill_value = FILL_VALUE;
        let base = reference.and_then(|name| self.fields.get_key_value(name));
        if let Some((base_name, base)) = base {
            if base.mask.dim() != mask.dim() {
                return Err(VolumeError::MaskShape {
                    name: base_name.clone(),
                    expected: mask.dim(),
                    found: base.mask.dim(),
                });
            }
            mask.zip_mut_with(&base.mask, |m, &b| *m |= b);
            meta.fill_value = base.meta.fill_value;
        }

        self.fields
            .insert(name.to_string(), FieldRecord { data, mask, meta });
        Ok(())
    }
}
