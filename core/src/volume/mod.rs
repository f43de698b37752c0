pub mod field;
pub mod radar;

pub use field::{FieldMeta, FieldRecord, FILL_VALUE, REFERENCE_FIELD};
pub use radar::RadarVolume;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    #[error("volume has no {0}")]
    Empty(&'static str),
    #[error("{rays} azimuths but {elevations} elevations")]
    RayMismatch { rays: usize, elevations: usize },
    #[error("invalid sweep layout: {0}")]
    SweepLayout(String),
    #[error("mask of field '{name}' is {found:?}, data is {expected:?}")]
    MaskShape {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("field '{name}' is {found:?}, volume is {expected:?}")]
    FieldShape {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },
}
