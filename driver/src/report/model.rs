use crate::workflow::runner::WorkflowResult;
use radarcore::math::StatsHelper;
use radarcore::telemetry::MetricsSnapshot;
use radarcore::volume::RadarVolume;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub units: String,
    pub valid_gates: usize,
    pub value_range: Option<(f64, f64)>,
    pub mean: Option<f64>,
}

/// Summary written after an offline run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VolumeReport {
    pub volume: String,
    pub rays: usize,
    pub gates: usize,
    pub sweeps: usize,
    pub fields: Vec<FieldSummary>,
    pub height_range_m: Option<(f64, f64)>,
    pub temperature_range_c: Option<(f64, f64)>,
    pub notes: Vec<String>,
    pub metrics: MetricsSnapshot,
}

impl VolumeReport {
    pub fn from_result(volume: &RadarVolume, result: &WorkflowResult) -> Self {
        let fields = volume
            .fields
            .iter()
            .map(|(name, field)| {
                let valid = field.filled_nan();
                FieldSummary {
                    name: name.clone(),
                    units: field.meta.units.clone(),
                    valid_gates: field.valid_count(),
                    value_range: StatsHelper::finite_range(valid.iter()),
                    mean: StatsHelper::finite_mean(valid.iter()),
                }
            })
            .collect();

        Self {
            volume: volume.name.clone(),
            rays: volume.rays(),
            gates: volume.gates(),
            sweeps: volume.sweeps(),
            fields,
            height_range_m: result.height_range_m,
            temperature_range_c: result.temperature_range_c,
            notes: result.notes.clone(),
            metrics: result.metrics,
        }
    }
}
