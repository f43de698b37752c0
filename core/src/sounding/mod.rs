//! Radiosonde profiles and their interpolation onto radar gates.

pub mod profile;

pub use profile::{MonotonicProfile, Sounding, SoundingLevel};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SoundingError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("sounding needs at least two monotonic levels, found {found}")]
    TooFewLevels { found: usize },
}
