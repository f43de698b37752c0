use anyhow::Context;
use clap::Parser;
use generator::volume::build_ppi_volume;
use report::model::VolumeReport;
use report::writer::ReportWriter;
use std::path::PathBuf;
use workflow::config::{Overrides, WorkflowConfig};
use workflow::inputs::{load_sounding, load_volume};
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Derives gate height and temperature fields for radar volumes")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Radar volume as JSON; a synthetic PPI volume is generated when absent
    #[arg(long)]
    volume: Option<PathBuf>,
    /// Sounding text file (height m, temperature degC per line)
    #[arg(long)]
    sounding: Option<PathBuf>,
    #[arg(long, default_value = "tools/data/volume_report.json")]
    report: PathBuf,
    /// Also write the volume with its derived fields
    #[arg(long)]
    output_volume: Option<PathBuf>,
    /// Gates per ray for the synthetic volume [default: 480]
    #[arg(long)]
    gates: Option<usize>,
    /// Gate spacing in metres [default: 500]
    #[arg(long)]
    gate_spacing: Option<f64>,
    /// Rays per sweep [default: 360]
    #[arg(long)]
    rays: Option<usize>,
    /// Antenna altitude override in metres
    #[arg(long)]
    altitude: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let overrides = Overrides {
        gates: args.gates,
        gate_spacing_m: args.gate_spacing,
        rays: args.rays,
        antenna_altitude_m: args.altitude,
        sounding: args.sounding.clone(),
    };
    let workflow_config = if let Some(path) = &args.workflow {
        let mut config = WorkflowConfig::load(path)?;
        config.apply_overrides(overrides);
        config
    } else {
        WorkflowConfig::from_overrides(overrides)
    };

    let mut volume = match &args.volume {
        Some(path) => load_volume(path)?,
        None => build_ppi_volume(&workflow_config.to_generator_config())
            .context("generating synthetic volume")?,
    };
    let sounding = workflow_config
        .sounding
        .as_ref()
        .map(load_sounding)
        .transpose()?;

    let runner = Runner::new(workflow_config);
    let result = runner.execute(&mut volume, sounding.as_ref())?;
    let report = VolumeReport::from_result(&volume, &result);

    let writer = ReportWriter::new(&args.report);
    writer.publish_status(&format!(
        "{} -> {} sweeps, {} rays x {} gates, height {:?} m, temperature {:?} degC",
        report.volume,
        report.sweeps,
        report.rays,
        report.gates,
        report.height_range_m,
        report.temperature_range_c
    ));
    for note in &report.notes {
        writer.publish_status(note);
    }
    writer.publish(&report)?;
    if let Some(path) = &args.output_volume {
        writer.publish_volume(path, &volume)?;
    }

    Ok(())
}
