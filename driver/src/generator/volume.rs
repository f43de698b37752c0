use anyhow::{ensure, Context};
use ndarray::Array2;
use radarcore::volume::{FieldMeta, FieldRecord, RadarVolume, FILL_VALUE, REFERENCE_FIELD};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic PPI volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    pub gates: usize,
    pub gate_spacing_m: f64,
    pub rays: usize,
    pub elevations_deg: Vec<f64>,
    /// Storm cell centre as (azimuth deg, range m).
    pub cell_centre: (f64, f64),
    pub cell_peak_dbz: f64,
    pub noise_dbz: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: "synthetic".into(),
            latitude_deg: -22.96,
            longitude_deg: -47.05,
            altitude_m: 735.0,
            gates: 480,
            gate_spacing_m: 500.0,
            rays: 360,
            elevations_deg: vec![0.5, 1.5, 2.4],
            cell_centre: (45.0, 60_000.0),
            cell_peak_dbz: 60.0,
            noise_dbz: 2.0,
            seed: 0,
        }
    }
}

fn synthetic_reflectivity(volume: &RadarVolume, config: &GeneratorConfig) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (cell_az, cell_range) = config.cell_centre;
    let mut dbz = Array2::zeros(volume.dim());

    for ((ray, gate), value) in dbz.indexed_iter_mut() {
        let az_offset = (volume.azimuths_deg[ray] - cell_az + 180.0).rem_euclid(360.0) - 180.0;
        let range_offset = (volume.ranges_m[gate] - cell_range) / 10_000.0;
        let tilt_decay = volume.elevations_deg[ray] / 10.0;
        let distance2 = (az_offset / 10.0).powi(2) + range_offset.powi(2) + tilt_decay.powi(2);
        let jitter = if config.noise_dbz > 0.0 {
            rng.gen_range(-config.noise_dbz..config.noise_dbz)
        } else {
            0.0
        };
        let echo = config.cell_peak_dbz * (-distance2).exp() + jitter;
        // Below-threshold echo is written out as missing.
        *value = if echo < 5.0 { FILL_VALUE } else { echo };
    }
    dbz
}

pub fn build_ppi_volume(config: &GeneratorConfig) -> anyhow::Result<RadarVolume> {
    ensure!(config.gates > 0, "generator needs at least one gate");
    ensure!(config.rays > 0, "generator needs at least one ray per sweep");
    ensure!(
        !config.elevations_deg.is_empty(),
        "generator needs at least one elevation"
    );
    ensure!(
        config.gate_spacing_m > 0.0,
        "gate spacing must be positive, got {}",
        config.gate_spacing_m
    );

    let ranges_m = (0..config.gates)
        .map(|gate| (gate as f64 + 0.5) * config.gate_spacing_m)
        .collect();
    let mut volume = RadarVolume::new(
        &config.name,
        config.latitude_deg,
        config.longitude_deg,
        config.altitude_m,
        ranges_m,
    );

    let step = 360.0 / config.rays as f64;
    let azimuths: Vec<f64> = (0..config.rays).map(|ray| ray as f64 * step).collect();
    for &elevation in &config.elevations_deg {
        volume.push_sweep(elevation, &azimuths);
    }

    let dbz = synthetic_reflectivity(&volume, config);
    volume.fields.insert(
        REFERENCE_FIELD.to_string(),
        FieldRecord::from_data(
            dbz,
            FieldMeta::new(
                "dBZ",
                "Corrected Reflectivity",
                "corrected_equivalent_reflectivity_factor",
            ),
        ),
    );
    volume
        .validate()
        .context("synthetic volume failed validation")?;
    Ok(volume)
}
