use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Sentinel written by the classification and mass retrievals for no data.
pub const FILL_VALUE: f64 = -32768.0;

/// Field whose mask new derived fields inherit.
pub const REFERENCE_FIELD: &str = "corrected_reflectivity";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub units: String,
    pub long_name: String,
    pub standard_name: String,
    #[serde(default = "default_fill")]
    pub fill_value: f64,
}

fn default_fill() -> f64 {
    FILL_VALUE
}

impl FieldMeta {
    pub fn new(units: &str, long_name: &str, standard_name: &str) -> Self {
        Self {
            units: units.to_string(),
            long_name: long_name.to_string(),
            standard_name: standard_name.to_string(),
            fill_value: FILL_VALUE,
        }
    }
}

/// Gate data for one named moment, shaped (rays, gates). Masked gates carry
/// no valid value regardless of what `data` holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    pub data: Array2<f64>,
    pub mask: Array2<bool>,
    pub meta: FieldMeta,
}

impl FieldRecord {
    /// Wraps raw data, masking gates equal to the fill value.
    pub fn from_data(data: Array2<f64>, meta: FieldMeta) -> Self {
        let mask = data.mapv(|v| v == meta.fill_value || v.is_nan());
        Self { data, mask, meta }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn valid_count(&self) -> usize {
        self.mask.iter().filter(|masked| !**masked).count()
    }

    /// Data with masked gates replaced by `NaN`.
    pub fn filled_nan(&self) -> Array2<f64> {
        let mut out = self.data.clone();
        out.zip_mut_with(&self.mask, |v, &masked| {
            if masked {
                *v = f64::NAN;
            }
        });
        out
    }
}
