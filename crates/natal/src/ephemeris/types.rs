use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Unix timestamp (ms) of the reference epoch 2000-01-01T12:00:00Z.
pub const EPOCH_UNIX_MS: i64 = 946_728_000_000;
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Tracked bodies, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// (name, symbol, mean period in days, longitude at epoch)
const BODY_TABLE: [(&str, &str, f64, f64); 10] = [
    ("Sun", "☉", 365.25, 280.0),
    ("Moon", "☽", 27.32, 120.0),
    ("Mercury", "☿", 87.97, 300.0),
    ("Venus", "♀", 224.7, 50.0),
    ("Mars", "♂", 686.98, 180.0),
    ("Jupiter", "♃", 4332.6, 90.0),
    ("Saturn", "♄", 10759.2, 210.0),
    ("Uranus", "♅", 30688.5, 330.0),
    ("Neptune", "♆", 60182.0, 15.0),
    ("Pluto", "♇", 90560.0, 240.0),
];

lazy_static::lazy_static! {
    static ref BODY_LOOKUP: HashMap<String, Body> = Body::ALL
        .iter()
        .map(|body| (body.name().to_lowercase(), *body))
        .collect();
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        BODY_TABLE[self as usize].0
    }

    pub fn symbol(self) -> &'static str {
        BODY_TABLE[self as usize].1
    }

    /// Mean orbital (or synodic, for the Sun) period in days.
    pub fn period_days(self) -> f64 {
        BODY_TABLE[self as usize].2
    }

    /// Longitude at the reference epoch.
    pub fn base_longitude(self) -> f64 {
        BODY_TABLE[self as usize].3
    }

    /// Mean motion in degrees per day.
    pub fn daily_motion(self) -> f64 {
        360.0 / self.period_days()
    }

    /// Luminaries never station.
    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = ChartError;

    /// Case-insensitive match on the body name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BODY_LOOKUP
            .get(&s.trim().to_lowercase())
            .copied()
            .ok_or_else(|| ChartError::UnknownBody(s.to_string()))
    }
}

/// Raw output of a position source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude, `[0, 360)`
    pub longitude: f64,
    /// Degrees per day; negative while retrograde
    pub speed: f64,
}

/// Positions plus chart angles for one birth moment.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSet {
    pub bodies: Vec<BodyState>,
    pub ascendant: f64,
    pub midheaven: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: BodyPosition,
    pub retrograde: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_from_str() {
        assert_eq!("Sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("  pluto ".parse::<Body>().unwrap(), Body::Pluto);
        assert!(matches!("Chiron".parse::<Body>(), Err(ChartError::UnknownBody(_))));
    }

    #[test]
    fn test_table_order_matches_enum() {
        for body in Body::ALL {
            assert_eq!(body.name().parse::<Body>().unwrap(), body);
        }
        assert_eq!(Body::Moon.base_longitude(), 120.0);
        assert!((Body::Sun.daily_motion() - 0.985_626_283).abs() < 1e-6);
    }
}
