//! Natal chart engine.
//!
//! Turns birth data into body longitudes, equal-house cusps and aspects,
//! and projects the result onto a wheel for an external renderer.

pub mod angle;
pub mod aspects;
pub mod birth;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod settings;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectSettings};
pub use birth::{BirthData, BirthMoment};
pub use chart::{CelestialBody, ChartData, ChartEngine, WheelLayout, WheelPoints};
pub use ephemeris::{Body, Fixture, PositionSource, RetrogradeMode};
pub use error::ChartError;
pub use houses::House;
pub use settings::{EngineSettings, PositionSourceKind};
pub use zodiac::Sign;

/// Chart with the default orbital positions.
pub fn generate_natal_chart(birth: &BirthData) -> Result<ChartData, ChartError> {
    ChartEngine::default().generate(birth)
}
