use crate::generator::volume::GeneratorConfig;
use anyhow::Context;
use radarcore::geometry::DEFAULT_ARCSIN_TOLERANCE;
use radarcore::prelude::StageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line values that take precedence over the YAML config.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub gates: Option<usize>,
    pub gate_spacing_m: Option<f64>,
    pub rays: Option<usize>,
    pub antenna_altitude_m: Option<f64>,
    pub sounding: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub name: String,
    pub gates: usize,
    pub gate_spacing_m: f64,
    pub rays: usize,
    pub elevations_deg: Vec<f64>,
    /// Overrides the altitude stored in the volume.
    pub antenna_altitude_m: Option<f64>,
    pub arcsin_tolerance: f64,
    pub sounding: Option<PathBuf>,
    pub seed: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            name: "synthetic".into(),
            gates: 480,
            gate_spacing_m: 500.0,
            rays: 360,
            elevations_deg: vec![0.5, 1.5, 2.4, 3.4, 4.3, 6.0, 9.9, 14.6, 19.5],
            antenna_altitude_m: None,
            arcsin_tolerance: DEFAULT_ARCSIN_TOLERANCE,
            sounding: None,
            seed: 0,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_overrides(overrides: Overrides) -> Self {
        let mut config = Self::default();
        config.apply_overrides(overrides);
        config
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(gates) = overrides.gates {
            self.gates = gates;
        }
        if let Some(spacing) = overrides.gate_spacing_m {
            self.gate_spacing_m = spacing;
        }
        if let Some(rays) = overrides.rays {
            self.rays = rays;
        }
        if overrides.antenna_altitude_m.is_some() {
            self.antenna_altitude_m = overrides.antenna_altitude_m;
        }
        if overrides.sounding.is_some() {
            self.sounding = overrides.sounding;
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            antenna_altitude_m: self.antenna_altitude_m,
            arcsin_tolerance: self.arcsin_tolerance,
        }
    }

    pub fn to_generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            name: self.name.clone(),
            gates: self.gates,
            gate_spacing_m: self.gate_spacing_m,
            rays: self.rays,
            elevations_deg: self.elevations_deg.clone(),
            altitude_m: self.antenna_altitude_m.unwrap_or(GeneratorConfig::default().altitude_m),
            seed: self.seed,
            ..Default::default()
        }
    }
}
