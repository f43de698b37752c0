use crate::math::stats::StatsHelper;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Derives gate heights above sea level from the volume's beam geometry.
pub struct HeightStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl HeightStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("height"),
        }
    }
}

impl Default for HeightStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for HeightStage {
    fn name(&self) -> &'static str {
        "height"
    }

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        config.validate()?;
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput<'_>) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let volume = input.volume;
        volume
            .validate()
            .map_err(|err| StageError::InvalidInput(err.to_string()))?;

        let field = volume.height_field(config.antenna_altitude_m, config.arcsin_tolerance)?;
        let value_range = StatsHelper::finite_range(field.iter());
        let (rays, gates) = field.dim();
        self.logger.record(&format!(
            "{}: {} rays x {} gates, height span {:?}",
            volume.name, rays, gates, value_range
        ));

        let metadata = StageMetadata {
            value_range,
            cells: field.len(),
            notes: vec![format!(
                "antenna altitude {:.1} m",
                config.antenna_altitude_m.unwrap_or(volume.altitude_m)
            )],
        };
        Ok(StageOutput { field, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::RadarVolume;

    fn volume() -> RadarVolume {
        let mut volume =
            RadarVolume::new("FCTH", -22.96, -47.05, 735.0, vec![0.0, 50_000.0, 100_000.0]);
        volume.push_sweep(0.5, &[0.0, 90.0, 180.0]);
        volume
    }

    #[test]
    fn height_stage_produces_gate_heights() {
        let mut stage = HeightStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        let volume = volume();
        let output = stage.execute(StageInput { volume: &volume }).unwrap();
        assert_eq!(output.field.dim(), (3, 3));
        assert_eq!(output.metadata.cells, 9);
        let (low, high) = output.metadata.value_range.unwrap();
        assert_eq!(low, 735.0);
        assert!((high - (1461.13 + 735.0)).abs() < 1.0);
        stage.cleanup();
    }

    #[test]
    fn uninitialized_stage_is_an_internal_error() {
        let mut stage = HeightStage::new();
        let volume = volume();
        let err = stage.execute(StageInput { volume: &volume }).unwrap_err();
        assert!(matches!(err, StageError::Internal(_)));
    }

    #[test]
    fn negative_gate_surfaces_as_domain_error() {
        let mut stage = HeightStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        let mut volume = volume();
        volume.ranges_m[1] = -250.0;
        let err = stage.execute(StageInput { volume: &volume }).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut stage = HeightStage::new();
        let config = StageConfig {
            antenna_altitude_m: None,
            arcsin_tolerance: -1.0,
        };
        assert!(matches!(
            stage.initialize(&config),
            Err(StageError::InvalidInput(_))
        ));
    }
}
