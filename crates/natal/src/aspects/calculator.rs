use crate::angle::{circular_distance, signed_delta};
use crate::aspects::types::{Aspect, AspectMatch, AspectSettings};
use crate::ephemeris::BodyPosition;

/// Look-ahead used to decide applying vs separating (days)
const APPLYING_TIME_STEP: f64 = 0.1;
/// Relative speeds below this are treated as stationary (degrees/day)
const STATIONARY_RELATIVE_SPEED: f64 = 0.01;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    pub fn new(settings: AspectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Aspects between every unordered pair, at most one per pair.
    ///
    /// Pairs are visited in input order (`i < j`), so the output order is
    /// stable for a stable input.
    pub fn compute_aspects(&self, positions: &[BodyPosition]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let a = &positions[i];
                let b = &positions[j];
                if a.body == b.body {
                    continue;
                }

                if let Some(found) = self.calculate_aspect(a.longitude, b.longitude, a.speed, b.speed) {
                    aspects.push(Aspect {
                        body_a: a.body,
                        body_b: b.body,
                        aspect_kind: found.kind,
                        exact_angle: found.kind.angle(),
                        orb: found.orb,
                        is_exact: found.is_exact,
                        applying: found.applying,
                    });
                }
            }
        }
        aspects
    }

    /// First kind in priority order whose orb admits the separation.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64, speed1: f64, speed2: f64) -> Option<AspectMatch> {
        let separation = circular_distance(lon1, lon2);

        for kind in self.settings.active_kinds() {
            let deviation = (separation - kind.angle()).abs();
            if deviation <= self.settings.orb_for(kind) {
                return Some(AspectMatch {
                    kind,
                    orb: deviation,
                    is_exact: deviation < self.settings.exact_threshold,
                    applying: is_aspect_applying(lon1, lon2, speed1, speed2, kind.angle()),
                });
            }
        }

        None
    }
}

/// Whether the pair is moving towards the exact angle.
fn is_aspect_applying(lon1: f64, lon2: f64, speed1: f64, speed2: f64, aspect_angle: f64) -> bool {
    let relative_speed = speed1 - speed2;
    if relative_speed.abs() < STATIONARY_RELATIVE_SPEED {
        return false;
    }

    let signed_diff = signed_delta(lon2, lon1);
    let current_distance = (signed_diff.abs() - aspect_angle).abs();

    // project forward a little and see whether we got closer
    let future_diff = signed_delta(0.0, signed_diff + relative_speed * APPLYING_TIME_STEP);
    let future_distance = (future_diff.abs() - aspect_angle).abs();

    future_distance < current_distance
}
