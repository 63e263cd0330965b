//! Interchangeable longitude providers.
//!
//! None of these are ephemeris grade. `OrbitalApproximation` advances each
//! body at its mean rate from a fixed epoch, `SeededMock` scatters bodies
//! pseudo-randomly but reproducibly per birth, and `Fixture` returns fixed
//! values for tests and demos.

use crate::angle::normalize;
use crate::birth::BirthMoment;
use crate::ephemeris::types::{Body, BodyPosition, EPOCH_UNIX_MS, MS_PER_DAY};
use crate::error::ChartError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Produces one position per tracked body.
pub trait PositionSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn positions(&self, moment: &BirthMoment) -> Result<Vec<BodyPosition>, ChartError>;
}

/// Days between the reference epoch and `moment`, fractional.
pub fn days_since_epoch(moment: &BirthMoment) -> f64 {
    (moment.utc.timestamp_millis() - EPOCH_UNIX_MS) as f64 / MS_PER_DAY
}

/// Mean-motion model: `base + 360 / period * days`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrbitalApproximation;

impl OrbitalApproximation {
    pub fn longitude_at(body: Body, days: f64) -> f64 {
        normalize(body.base_longitude() + body.daily_motion() * days)
    }
}

impl PositionSource for OrbitalApproximation {
    fn name(&self) -> &'static str {
        "orbital"
    }

    fn positions(&self, moment: &BirthMoment) -> Result<Vec<BodyPosition>, ChartError> {
        let days = days_since_epoch(moment);
        Ok(Body::ALL
            .iter()
            .map(|&body| BodyPosition {
                body,
                longitude: Self::longitude_at(body, days),
                speed: body.daily_motion(),
            })
            .collect())
    }
}

/// Random-looking chart that is stable for a given birth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededMock;

impl PositionSource for SeededMock {
    fn name(&self) -> &'static str {
        "seeded_mock"
    }

    fn positions(&self, moment: &BirthMoment) -> Result<Vec<BodyPosition>, ChartError> {
        let mut rng = ChaCha20Rng::from_seed(moment.seed);
        Ok(Body::ALL
            .iter()
            .map(|&body| {
                let longitude = rng.gen_range(0.0..360.0);
                // planets may run backwards, luminaries never do
                let factor = if body.is_luminary() {
                    1.0
                } else {
                    rng.gen_range(-0.5..1.5)
                };
                BodyPosition {
                    body,
                    longitude,
                    speed: body.daily_motion() * factor,
                }
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixturePoint {
    pub longitude: f64,
    /// Defaults to the body's mean daily motion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Fixed longitudes, one per body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    points: BTreeMap<Body, FixturePoint>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, body: Body, longitude: f64) -> Self {
        self.points.insert(body, FixturePoint { longitude, speed: None });
        self
    }

    pub fn with_speed(mut self, body: Body, longitude: f64, speed: f64) -> Self {
        self.points.insert(
            body,
            FixturePoint {
                longitude,
                speed: Some(speed),
            },
        );
        self
    }

    /// Every body at the same longitude, useful as a base for overrides.
    pub fn uniform(longitude: f64) -> Self {
        Body::ALL
            .iter()
            .fold(Self::new(), |fixture, &body| fixture.with(body, longitude))
    }

    /// The demonstration chart: Aries rising, Sun in Aries.
    pub fn sample() -> Self {
        Self::new()
            .with(Body::Sun, 15.0)
            .with(Body::Moon, 120.0)
            .with(Body::Mercury, 25.0)
            .with(Body::Venus, 350.0)
            .with(Body::Mars, 180.0)
            .with(Body::Jupiter, 240.0)
            .with(Body::Saturn, 300.0)
            .with(Body::Uranus, 45.0)
            .with(Body::Neptune, 330.0)
            .with(Body::Pluto, 270.0)
    }

    pub fn get(&self, body: Body) -> Option<&FixturePoint> {
        self.points.get(&body)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PositionSource for Fixture {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn positions(&self, _moment: &BirthMoment) -> Result<Vec<BodyPosition>, ChartError> {
        Body::ALL
            .iter()
            .map(|&body| {
                let point = self.get(body).ok_or_else(|| ChartError::FixtureMissing {
                    body: body.name().to_string(),
                })?;
                if !point.longitude.is_finite() {
                    return Err(ChartError::NumericInput {
                        field: "fixture longitude",
                        value: point.longitude,
                    });
                }
                Ok(BodyPosition {
                    body,
                    longitude: normalize(point.longitude),
                    speed: point.speed.unwrap_or_else(|| body.daily_motion()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birth::BirthData;

    fn moment(date: &str, time: &str) -> BirthMoment {
        BirthData::new(date, time, 40.7128, -74.0060, "UTC")
            .moment()
            .unwrap()
    }

    #[test]
    fn test_orbital_at_epoch_returns_base() {
        let m = moment("2000-01-01", "12:00");
        assert_eq!(days_since_epoch(&m), 0.0);
        let positions = OrbitalApproximation.positions(&m).unwrap();
        assert_eq!(positions.len(), 10);
        for p in positions {
            assert_eq!(p.longitude, p.body.base_longitude());
        }
    }

    #[test]
    fn test_orbital_moon_advances_one_day() {
        let m = moment("2000-01-02", "12:00");
        assert_eq!(days_since_epoch(&m), 1.0);
        let moon = OrbitalApproximation::longitude_at(Body::Moon, 1.0);
        assert!((moon - (120.0 + 360.0 / 27.32)).abs() < 1e-9);
    }

    #[test]
    fn test_orbital_before_epoch_is_normalized() {
        let m = moment("1950-03-10", "06:15");
        for p in OrbitalApproximation.positions(&m).unwrap() {
            assert!((0.0..360.0).contains(&p.longitude));
        }
    }

    #[test]
    fn test_seeded_mock_is_reproducible() {
        let m = moment("1987-07-04", "21:45");
        let a = SeededMock.positions(&m).unwrap();
        let b = SeededMock.positions(&m).unwrap();
        assert_eq!(a, b);

        let other = SeededMock.positions(&moment("1987-07-04", "21:46")).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_fixture_missing_body() {
        let fixture = Fixture::new().with(Body::Sun, 10.0);
        let err = fixture.positions(&moment("2000-01-01", "12:00")).unwrap_err();
        assert_eq!(
            err,
            ChartError::FixtureMissing {
                body: "Moon".to_string()
            }
        );
    }

    #[test]
    fn test_fixture_normalizes_and_defaults_speed() {
        let fixture = Fixture::uniform(0.0)
            .with(Body::Mars, -30.0)
            .with_speed(Body::Saturn, 100.0, -0.02);
        let positions = fixture.positions(&moment("2000-01-01", "12:00")).unwrap();
        let mars = positions.iter().find(|p| p.body == Body::Mars).unwrap();
        assert_eq!(mars.longitude, 330.0);
        assert_eq!(mars.speed, Body::Mars.daily_motion());
        let saturn = positions.iter().find(|p| p.body == Body::Saturn).unwrap();
        assert_eq!(saturn.speed, -0.02);
    }
}
