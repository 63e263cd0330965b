pub mod retrograde;
pub mod source;
pub mod types;

pub use retrograde::{retrograde_flags, RetrogradeMode};
pub use source::{
    days_since_epoch, Fixture, FixturePoint, OrbitalApproximation, PositionSource, SeededMock,
};
pub use types::{Body, BodyPosition, BodyState, PositionSet};

use crate::angle::normalize;
use crate::birth::BirthMoment;
use crate::error::ChartError;

/// Simplified rising degree: local time of day swept once around the
/// circle, nudged by half the latitude. Deterministic, not astronomical.
pub fn ascendant(moment: &BirthMoment) -> f64 {
    normalize(moment.day_fraction() * 360.0 + moment.latitude * 0.5)
}

pub fn midheaven(ascendant: f64) -> f64 {
    normalize(ascendant + 90.0)
}

/// Body longitudes and chart angles for a birth moment.
pub struct PositionEngine {
    source: Box<dyn PositionSource>,
    retrograde: RetrogradeMode,
}

impl PositionEngine {
    pub fn new(source: Box<dyn PositionSource>, retrograde: RetrogradeMode) -> Self {
        Self { source, retrograde }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn compute(&self, moment: &BirthMoment) -> Result<PositionSet, ChartError> {
        log::trace!(
            "Computing {} positions, seed {}",
            self.source.name(),
            hex::encode(&moment.seed[..8])
        );
        let positions = self.source.positions(moment)?;
        let flags = retrograde_flags(self.retrograde, &positions, moment.seed);

        let bodies = positions
            .into_iter()
            .zip(flags)
            .map(|(position, retrograde)| BodyState {
                position,
                retrograde,
            })
            .collect();

        let asc = ascendant(moment);
        Ok(PositionSet {
            bodies,
            ascendant: asc,
            midheaven: midheaven(asc),
        })
    }
}
