pub mod data;
pub mod projection;

pub use data::{CelestialBody, ChartData};
pub use projection::{
    AspectLine, BodyPoint, CuspSpoke, Orientation, Point, SignSegment, WheelLayout, WheelPoints,
};

use crate::aspects::AspectCalculator;
use crate::birth::BirthData;
use crate::ephemeris::{BodyPosition, PositionEngine};
use crate::error::ChartError;
use crate::houses::{equal_houses, house_of};
use crate::settings::EngineSettings;
use crate::zodiac::sign_of;

/// Birth data in, chart out.
///
/// Holds no per-chart state, so one engine can serve many callers.
pub struct ChartEngine {
    positions: PositionEngine,
    aspects: AspectCalculator,
}

impl ChartEngine {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            positions: PositionEngine::new(settings.build_source(), settings.retrograde),
            aspects: AspectCalculator::new(settings.aspects.clone()),
        }
    }

    pub fn generate(&self, birth: &BirthData) -> Result<ChartData, ChartError> {
        let moment = birth.moment()?;
        let set = self.positions.compute(&moment)?;
        let houses = equal_houses(set.ascendant);

        let mut bodies = Vec::with_capacity(set.bodies.len());
        for state in &set.bodies {
            let p = state.position;
            let house = house_of(p.longitude, &houses).ok_or(ChartError::HouseInvariant {
                longitude: p.longitude,
                ascendant: set.ascendant,
            })?;
            bodies.push(CelestialBody {
                name: p.body,
                display_symbol: p.body.symbol().to_string(),
                longitude: p.longitude,
                sign: sign_of(p.longitude),
                house,
                retrograde: state.retrograde,
                speed: p.speed,
            });
        }

        let positions: Vec<BodyPosition> = set.bodies.iter().map(|s| s.position).collect();
        let aspects = self.aspects.compute_aspects(&positions);

        log::debug!(
            "Chart for {} {} ({}): asc {:.2}, mc {:.2}, {} aspects via {} positions",
            birth.date,
            birth.time,
            birth.timezone,
            set.ascendant,
            set.midheaven,
            aspects.len(),
            self.positions.source_name()
        );

        Ok(ChartData {
            birth_data: birth.clone(),
            bodies,
            houses,
            aspects,
            ascendant: set.ascendant,
            midheaven: set.midheaven,
        })
    }
}

impl Default for ChartEngine {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
