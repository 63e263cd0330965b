use crate::aspects::Aspect;
use crate::birth::BirthData;
use crate::ephemeris::Body;
use crate::houses::House;
use crate::zodiac::Sign;
use serde::{Deserialize, Serialize};

/// A tracked body as placed in a finished chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub name: Body,
    pub display_symbol: String,
    /// Ecliptic longitude, `[0, 360)`
    pub longitude: f64,
    pub sign: Sign,
    pub house: u8,
    pub retrograde: bool,
    /// Degrees per day
    pub speed: f64,
}

/// Read-only snapshot handed to renderers and exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub birth_data: BirthData,
    pub bodies: Vec<CelestialBody>,
    pub houses: Vec<House>,
    pub aspects: Vec<Aspect>,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl ChartData {
    pub fn body(&self, body: Body) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == body)
    }

    /// Aspects involving `body`, on either side of the pair.
    pub fn aspects_for(&self, body: Body) -> impl Iterator<Item = &Aspect> {
        self.aspects
            .iter()
            .filter(move |a| a.body_a == body || a.body_b == body)
    }

    /// The aspect between two bodies, whichever order they were paired in.
    pub fn aspect_between(&self, a: Body, b: Body) -> Option<&Aspect> {
        self.aspects
            .iter()
            .find(|x| (x.body_a == a && x.body_b == b) || (x.body_a == b && x.body_b == a))
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
