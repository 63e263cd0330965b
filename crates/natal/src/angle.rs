//! Angle helpers shared by every engine stage.
//!
//! All longitudes in the crate are degrees on the ecliptic circle. The
//! functions here are pure and never fail: non-finite input propagates as
//! NaN, which is why `BirthData` is validated before it reaches them.

pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

/// Reduce any angle into `[0, 360)`.
///
/// Values already in range are returned unchanged.
pub fn normalize(angle: f64) -> f64 {
    let mut reduced = angle % FULL_CIRCLE;
    if reduced < 0.0 {
        reduced += FULL_CIRCLE;
    }
    // -1e-20 + 360 rounds to exactly 360
    if reduced >= FULL_CIRCLE {
        reduced -= FULL_CIRCLE;
    }
    // fold -0.0 into 0.0
    reduced + 0.0
}

/// Shortest separation between two longitudes, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let raw_diff = (a - b).abs() % FULL_CIRCLE;
    if raw_diff > HALF_CIRCLE {
        FULL_CIRCLE - raw_diff
    } else {
        raw_diff
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
///
/// Positive means `to` lies ahead of `from` in zodiacal order.
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let forward = normalize(to - from);
    if forward > HALF_CIRCLE {
        forward - FULL_CIRCLE
    } else {
        forward
    }
}

/// Midpoint of the forward arc that starts at `start` and ends at `end`.
pub fn circular_midpoint(start: f64, end: f64) -> f64 {
    normalize(start + normalize(end - start) / 2.0)
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}
