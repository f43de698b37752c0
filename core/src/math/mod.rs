pub mod broadcast;
pub mod interp;
pub mod stats;

pub use interp::LinearInterpolator;
pub use stats::StatsHelper;
