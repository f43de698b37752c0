use crate::math::stats::StatsHelper;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::sounding::{MonotonicProfile, Sounding};
use crate::telemetry::log::LogManager;

/// Interpolates a sounding's temperature onto every gate of the volume.
pub struct TemperatureStage {
    sounding: Sounding,
    profile: Option<MonotonicProfile>,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl TemperatureStage {
    pub fn new(sounding: Sounding) -> Self {
        Self {
            sounding,
            profile: None,
            config: None,
            logger: LogManager::new("temperature"),
        }
    }
}

impl ProcessingStage for TemperatureStage {
    fn name(&self) -> &'static str {
        "temperature"
    }

    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        config.validate()?;
        let profile = self.sounding.monotonic()?;
        let dropped = self.sounding.levels.len() - profile.levels();
        if dropped > 0 {
            self.logger.warn(&format!(
                "dropped {} non-monotonic sounding levels",
                dropped
            ));
        }
        self.profile = Some(profile);
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput<'_>) -> StageResult<StageOutput> {
        let (config, profile) = self
            .config
            .as_ref()
            .zip(self.profile.as_ref())
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let volume = input.volume;
        volume
            .validate()
            .map_err(|err| StageError::InvalidInput(err.to_string()))?;

        let heights = volume.height_field(config.antenna_altitude_m, config.arcsin_tolerance)?;
        let field = profile.interpolate_field(heights.view());

        let mut notes = Vec::new();
        let (bottom, top) = profile.span();
        if let Some((low, high)) = StatsHelper::finite_range(heights.iter()) {
            if low < bottom || high > top {
                let note = format!(
                    "gate heights {:.0}..{:.0} m exceed sounding {:.0}..{:.0} m; edges held",
                    low, high, bottom, top
                );
                self.logger.warn(&note);
                notes.push(note);
            }
        }

        let value_range = StatsHelper::finite_range(field.iter());
        self.logger.record(&format!(
            "{}: temperature span {:?} from {} levels",
            volume.name,
            value_range,
            profile.levels()
        ));

        Ok(StageOutput {
            metadata: StageMetadata {
                value_range,
                cells: field.len(),
                notes,
            },
            field,
        })
    }

    fn cleanup(&mut self) {
        self.profile = None;
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sounding::SoundingLevel;
    use crate::volume::RadarVolume;

    fn sounding() -> Sounding {
        Sounding::new(vec![
            SoundingLevel { height_m: 0.0, temperature_c: 30.0 },
            SoundingLevel { height_m: 1000.0, temperature_c: 24.0 },
            SoundingLevel { height_m: 800.0, temperature_c: 25.0 },
            SoundingLevel { height_m: 10_000.0, temperature_c: -36.0 },
        ])
    }

    #[test]
    fn temperature_follows_gate_height() {
        let mut volume = RadarVolume::new("SR", -23.6, -45.97, 916.0, vec![0.0, 100_000.0]);
        volume.push_sweep(0.5, &[0.0, 180.0]);

        let mut stage = TemperatureStage::new(sounding());
        stage.initialize(&StageConfig::default()).unwrap();
        let output = stage.execute(StageInput { volume: &volume }).unwrap();

        assert_eq!(output.field.dim(), (2, 2));
        // Antenna gate sits at 916 m: 30 - 6 * 0.916.
        assert!((output.field[[0, 0]] - 24.504).abs() < 1e-9);
        assert!(output.field[[1, 1]] < output.field[[1, 0]]);
        assert!(output.metadata.notes.is_empty());
    }

    #[test]
    fn heights_beyond_the_sounding_are_noted() {
        let mut volume = RadarVolume::new("SR", 0.0, 0.0, 0.0, vec![0.0, 200_000.0]);
        volume.push_sweep(10.0, &[0.0]);

        let mut stage = TemperatureStage::new(sounding());
        stage.initialize(&StageConfig::default()).unwrap();
        let output = stage.execute(StageInput { volume: &volume }).unwrap();
        assert_eq!(output.field[[0, 1]], -36.0);
        assert_eq!(output.metadata.notes.len(), 1);
    }

    #[test]
    fn bad_tolerance_fails_initialization() {
        for tolerance in [-0.5, f64::NAN] {
            let mut stage = TemperatureStage::new(sounding());
            let config = StageConfig {
                antenna_altitude_m: None,
                arcsin_tolerance: tolerance,
            };
            assert!(matches!(
                stage.initialize(&config),
                Err(StageError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn unusable_sounding_fails_initialization() {
        let mut stage = TemperatureStage::new(Sounding::new(vec![SoundingLevel {
            height_m: 0.0,
            temperature_c: 20.0,
        }]));
        let err = stage.initialize(&StageConfig::default()).unwrap_err();
        assert!(matches!(err, StageError::Sounding(_)));
    }
}
