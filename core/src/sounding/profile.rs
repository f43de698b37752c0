use super::SoundingError;
use crate::math::interp::LinearInterpolator;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

/// One observed level of a sounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundingLevel {
    pub height_m: f64,
    pub temperature_c: f64,
}

/// Levels as reported by the sonde, possibly noisy or non-monotonic in height.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sounding {
    #[serde(default)]
    pub station: Option<String>,
    pub levels: Vec<SoundingLevel>,
}

impl Sounding {
    pub fn new(levels: Vec<SoundingLevel>) -> Self {
        Self {
            station: None,
            levels,
        }
    }

    /// Parses two whitespace separated columns, height (m) then temperature
    /// (deg C). Blank lines and `#` comments are skipped; extra columns are
    /// ignored.
    pub fn parse_text(text: &str) -> Result<Self, SoundingError> {
        let mut levels = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut columns = line.split_whitespace();
            let height_m = parse_column(columns.next(), index + 1, "height")?;
            let temperature_c = parse_column(columns.next(), index + 1, "temperature")?;
            levels.push(SoundingLevel {
                height_m,
                temperature_c,
            });
        }
        Ok(Self::new(levels))
    }

    /// Keeps only finite levels whose height rises strictly above the last
    /// level kept.
    pub fn monotonic(&self) -> Result<MonotonicProfile, SoundingError> {
        let mut heights: Vec<f64> = Vec::with_capacity(self.levels.len());
        let mut temperatures = Vec::with_capacity(self.levels.len());
        for level in &self.levels {
            if !level.height_m.is_finite() || !level.temperature_c.is_finite() {
                continue;
            }
            if heights.last().map_or(true, |&top| level.height_m > top) {
                heights.push(level.height_m);
                temperatures.push(level.temperature_c);
            }
        }

        let found = heights.len();
        let interpolator = LinearInterpolator::new(heights, temperatures)
            .ok_or(SoundingError::TooFewLevels { found })?;
        Ok(MonotonicProfile {
            interpolator,
            levels: found,
        })
    }
}

fn parse_column(column: Option<&str>, line: usize, name: &str) -> Result<f64, SoundingError> {
    let text = column.ok_or_else(|| SoundingError::Parse {
        line,
        reason: format!("missing {name} column"),
    })?;
    text.parse::<f64>().map_err(|err| SoundingError::Parse {
        line,
        reason: format!("bad {name} '{text}': {err}"),
    })
}

/// Temperature profile with strictly increasing heights.
#[derive(Debug, Clone)]
pub struct MonotonicProfile {
    interpolator: LinearInterpolator,
    levels: usize,
}

impl MonotonicProfile {
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Height span (m) covered by observations.
    pub fn span(&self) -> (f64, f64) {
        self.interpolator.span()
    }

    /// Temperature at `height_m`; heights beyond the profile take the
    /// nearest observed temperature.
    pub fn interpolate(&self, height_m: f64) -> f64 {
        self.interpolator.eval(height_m)
    }

    pub fn interpolate_field(&self, heights: ArrayView2<f64>) -> Array2<f64> {
        heights.mapv(|h| self.interpolate(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const SAMPLE: &str = "\
# SBMT 2017-03-14 12Z
  700.0   24.0
 1500.0   18.0
 1450.0   18.5   # sonde dipped
 3000.0    9.0
 3000.0    8.0
 5000.0   -3.0
";

    #[test]
    fn parses_columns_and_skips_comments() {
        let sounding = Sounding::parse_text(SAMPLE).unwrap();
        assert_eq!(sounding.levels.len(), 6);
        assert_eq!(sounding.levels[2].height_m, 1450.0);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = Sounding::parse_text("100 20\n200 abc\n").unwrap_err();
        assert!(matches!(err, SoundingError::Parse { line: 2, .. }));
        let err = Sounding::parse_text("100\n").unwrap_err();
        assert!(matches!(err, SoundingError::Parse { line: 1, .. }));
    }

    #[test]
    fn monotonic_profile_drops_dips_and_repeats() {
        let profile = Sounding::parse_text(SAMPLE).unwrap().monotonic().unwrap();
        assert_eq!(profile.levels(), 4);
        assert_eq!(profile.span(), (700.0, 5000.0));
        assert_eq!(profile.interpolate(3000.0), 9.0);
    }

    #[test]
    fn interpolation_clamps_to_observed_levels() {
        let profile = Sounding::parse_text(SAMPLE).unwrap().monotonic().unwrap();
        assert_eq!(profile.interpolate(0.0), 24.0);
        assert_eq!(profile.interpolate(12_000.0), -3.0);
        assert_eq!(profile.interpolate(1100.0), 21.0);
    }

    #[test]
    fn interpolated_field_keeps_shape() {
        let profile = Sounding::new(vec![
            SoundingLevel { height_m: 0.0, temperature_c: 30.0 },
            SoundingLevel { height_m: 10_000.0, temperature_c: -40.0 },
        ])
        .monotonic()
        .unwrap();
        let heights = array![[0.0, 5000.0, 10_000.0], [1000.0, 2000.0, 20_000.0]];
        let field = profile.interpolate_field(heights.view());
        assert_eq!(field.dim(), (2, 3));
        assert_eq!(field[[0, 1]], -5.0);
        assert_eq!(field[[1, 2]], -40.0);
    }

    #[test]
    fn single_usable_level_is_rejected() {
        let sounding = Sounding::new(vec![
            SoundingLevel { height_m: 100.0, temperature_c: 20.0 },
            SoundingLevel { height_m: f64::NAN, temperature_c: 18.0 },
            SoundingLevel { height_m: 50.0, temperature_c: 21.0 },
        ]);
        assert_eq!(
            sounding.monotonic().unwrap_err(),
            SoundingError::TooFewLevels { found: 1 }
        );
    }
}
