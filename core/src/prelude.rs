use crate::geometry::{GeometryError, DEFAULT_ARCSIN_TOLERANCE};
use crate::sounding::SoundingError;
use crate::volume::RadarVolume;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Shared configuration for each processing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Overrides the antenna altitude recorded in the volume.
    #[serde(default)]
    pub antenna_altitude_m: Option<f64>,
    #[serde(default = "default_tolerance")]
    pub arcsin_tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_ARCSIN_TOLERANCE
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            antenna_altitude_m: None,
            arcsin_tolerance: DEFAULT_ARCSIN_TOLERANCE,
        }
    }
}

impl StageConfig {
    pub fn validate(&self) -> StageResult<()> {
        if !(self.arcsin_tolerance >= 0.0) {
            return Err(StageError::InvalidInput(format!(
                "arcsin tolerance must be non-negative, got {}",
                self.arcsin_tolerance
            )));
        }
        if let Some(altitude) = self.antenna_altitude_m {
            if !altitude.is_finite() {
                return Err(StageError::InvalidInput(format!(
                    "antenna altitude override must be finite, got {altitude}"
                )));
            }
        }
        Ok(())
    }
}

/// Input payload for a processing stage.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    pub volume: &'a RadarVolume,
}

/// Output produced by each stage, shaped (rays, gates).
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub field: Array2<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub value_range: Option<(f64, f64)>,
    pub cells: usize,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Sounding(#[from] SoundingError),
    #[error("internal failure: {0}")]
    Internal(String),
}

impl StageError {
    /// True when the failure came from out-of-domain beam geometry.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            StageError::Geometry(GeometryError::Domain { .. })
                | StageError::Geometry(GeometryError::ArcsinDomain { .. })
        )
    }
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing derived-field stages run over a radar volume.
pub trait ProcessingStage {
    fn name(&self) -> &'static str;
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput<'_>) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
