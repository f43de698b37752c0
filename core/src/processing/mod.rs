pub mod height;
pub mod temperature;

pub use height::HeightStage;
pub use temperature::TemperatureStage;
