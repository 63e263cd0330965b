use crate::aspects::AspectSettings;
use crate::ephemeris::{Fixture, OrbitalApproximation, PositionSource, RetrogradeMode, SeededMock};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which longitude provider a chart uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSourceKind {
    #[default]
    Orbital,
    SeededMock,
    Fixture,
}

impl FromStr for PositionSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "orbital" => Ok(Self::Orbital),
            "seeded_mock" | "mock" => Ok(Self::SeededMock),
            "fixture" => Ok(Self::Fixture),
            other => Err(format!(
                "Unknown position source: {}. Valid sources: orbital, seeded_mock, fixture",
                other
            )),
        }
    }
}

impl FromStr for RetrogradeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "never" => Ok(Self::Never),
            "motion_sign" | "motion" => Ok(Self::MotionSign),
            "seeded" => Ok(Self::Seeded),
            other => Err(format!(
                "Unknown retrograde mode: {}. Valid modes: never, motion_sign, seeded",
                other
            )),
        }
    }
}

/// Everything that shapes a chart besides the birth data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub position_source: PositionSourceKind,
    pub retrograde: RetrogradeMode,
    pub aspects: AspectSettings,
    /// Only read when `position_source` is `Fixture`.
    pub fixture: Fixture,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            position_source: PositionSourceKind::Orbital,
            retrograde: RetrogradeMode::MotionSign,
            aspects: AspectSettings::default(),
            fixture: Fixture::sample(),
        }
    }
}

impl EngineSettings {
    /// Deterministic settings over a fixed set of longitudes.
    pub fn fixture(fixture: Fixture) -> Self {
        Self {
            position_source: PositionSourceKind::Fixture,
            fixture,
            ..Self::default()
        }
    }

    pub fn build_source(&self) -> Box<dyn PositionSource> {
        match self.position_source {
            PositionSourceKind::Orbital => Box::new(OrbitalApproximation),
            PositionSourceKind::SeededMock => Box::new(SeededMock),
            PositionSourceKind::Fixture => Box::new(self.fixture.clone()),
        }
    }
}
