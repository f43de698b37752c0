use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use radarcore::prelude::{ProcessingStage, StageConfig, StageInput, StageOutput};
use radarcore::processing::{HeightStage, TemperatureStage};
use radarcore::sounding::Sounding;
use radarcore::telemetry::{MetricsRecorder, MetricsSnapshot};
use radarcore::volume::{FieldMeta, RadarVolume};

pub const HEIGHT_FIELD: &str = "height";
pub const TEMPERATURE_FIELD: &str = "temperature";

#[derive(Debug)]
pub struct WorkflowResult {
    pub height_range_m: Option<(f64, f64)>,
    pub temperature_range_c: Option<(f64, f64)>,
    pub notes: Vec<String>,
    pub metrics: MetricsSnapshot,
}

pub struct Runner {
    config: WorkflowConfig,
    metrics: MetricsRecorder,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            metrics: MetricsRecorder::new(),
        }
    }

    /// Derives height (and temperature, when a sounding is given) for every
    /// gate and attaches them to the volume as fields.
    pub fn execute(
        &self,
        volume: &mut RadarVolume,
        sounding: Option<&Sounding>,
    ) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();
        let mut notes = Vec::new();

        let mut height_stage = HeightStage::new();
        let height = self.run_stage(&mut height_stage, &stage_config, volume)?;
        notes.extend(height.metadata.notes);
        volume
            .add_field(
                HEIGHT_FIELD,
                height.field,
                FieldMeta::new("m", "Height above mean sea level", "height"),
                None,
            )
            .context("attaching height field")?;

        let mut temperature_range_c = None;
        if let Some(sounding) = sounding {
            let mut temperature_stage = TemperatureStage::new(sounding.clone());
            let temperature = self.run_stage(&mut temperature_stage, &stage_config, volume)?;
            notes.extend(temperature.metadata.notes);
            temperature_range_c = temperature.metadata.value_range;
            volume
                .add_field(
                    TEMPERATURE_FIELD,
                    temperature.field,
                    FieldMeta::new("degC", "Air temperature from sounding", "air_temperature"),
                    None,
                )
                .context("attaching temperature field")?;
        }

        Ok(WorkflowResult {
            height_range_m: height.metadata.value_range,
            temperature_range_c,
            notes,
            metrics: self.metrics.snapshot(),
        })
    }

    fn run_stage(
        &self,
        stage: &mut dyn ProcessingStage,
        config: &StageConfig,
        volume: &RadarVolume,
    ) -> anyhow::Result<StageOutput> {
        let name = stage.name();
        let outcome = stage
            .initialize(config)
            .and_then(|_| stage.execute(StageInput { volume }));
        stage.cleanup();

        match outcome {
            Ok(output) => {
                self.metrics.record_stage(output.metadata.cells);
                Ok(output)
            }
            Err(err) => {
                self.metrics.record_error(err.is_domain());
                Err(err).with_context(|| format!("running {name} stage on {}", volume.name))
            }
        }
    }
}
