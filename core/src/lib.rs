//! Core geometry and derived-field processing for polarimetric radar volumes.
//!
//! The modules cover beam geometry under the 4/3-Earth-radius model, sounding
//! interpolation onto radar gates, the volume/field model that derived fields
//! are attached to, and the geostationary remap helpers used for satellite
//! context imagery.

pub mod geometry;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod remap;
pub mod sounding;
pub mod telemetry;
pub mod volume;

pub use geometry::{height_field, radar_to_cartesian, CartesianOffset, GeometryError};
pub use prelude::{ProcessingStage, StageConfig, StageInput, StageOutput};
