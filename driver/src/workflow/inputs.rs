use anyhow::Context;
use radarcore::sounding::Sounding;
use radarcore::volume::RadarVolume;
use std::fs;
use std::path::Path;

/// Reads a volume serialized as JSON by an upstream format converter.
pub fn load_volume<P: AsRef<Path>>(path: P) -> anyhow::Result<RadarVolume> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading radar volume {}", path_ref.display()))?;
    let volume: RadarVolume = serde_json::from_str(&contents)
        .with_context(|| format!("parsing radar volume {}", path_ref.display()))?;
    volume
        .validate()
        .with_context(|| format!("validating radar volume {}", path_ref.display()))?;
    Ok(volume)
}

pub fn load_sounding<P: AsRef<Path>>(path: P) -> anyhow::Result<Sounding> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading sounding {}", path_ref.display()))?;
    let mut sounding = Sounding::parse_text(&contents)
        .with_context(|| format!("parsing sounding {}", path_ref.display()))?;
    sounding.station = path_ref
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    Ok(sounding)
}
