use crate::report::model::VolumeReport;
use anyhow::Context;
use log::info;
use radarcore::volume::RadarVolume;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes run artefacts as pretty-printed JSON under fixed paths.
pub struct ReportWriter {
    report_path: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(report_path: P) -> Self {
        Self {
            report_path: report_path.into(),
        }
    }

    pub fn publish(&self, report: &VolumeReport) -> anyhow::Result<()> {
        write_json(&self.report_path, report)?;
        info!(
            "report for {} written to {}",
            report.volume,
            self.report_path.display()
        );
        Ok(())
    }

    pub fn publish_volume(&self, path: &Path, volume: &RadarVolume) -> anyhow::Result<()> {
        write_json(path, volume)?;
        info!("volume {} written to {}", volume.name, path.display());
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        info!("{}", message);
        println!("{}", message);
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::volume::{build_ppi_volume, GeneratorConfig};
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;

    #[test]
    fn report_is_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut volume = build_ppi_volume(&GeneratorConfig {
            gates: 20,
            rays: 18,
            elevations_deg: vec![0.5],
            ..Default::default()
        })
        .unwrap();
        let result = Runner::new(WorkflowConfig::default())
            .execute(&mut volume, None)
            .unwrap();
        let report = VolumeReport::from_result(&volume, &result);

        let path = dir.path().join("reports/run.json");
        ReportWriter::new(&path).publish(&report).unwrap();

        let written: VolumeReport =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.rays, 18);
        assert_eq!(written.gates, 20);
        let names: Vec<_> = written.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["corrected_reflectivity", "height"]);
        assert_eq!(written.fields[1].valid_gates, 18 * 20);
    }

    #[test]
    fn volume_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let volume = build_ppi_volume(&GeneratorConfig {
            gates: 4,
            rays: 4,
            elevations_deg: vec![0.5, 1.5],
            ..Default::default()
        })
        .unwrap();
        let path = dir.path().join("volume.json");
        ReportWriter::new(dir.path().join("unused.json"))
            .publish_volume(&path, &volume)
            .unwrap();
        let loaded = crate::workflow::inputs::load_volume(&path).unwrap();
        assert_eq!(loaded.dim(), (8, 4));
        assert_eq!(loaded.sweep_start_ray_index, vec![0, 4]);
    }
}
