//! Equal-house division anchored at the ascendant.

use crate::angle::normalize;
use crate::zodiac::{sign_of, Sign};
use serde::{Deserialize, Serialize};

pub const HOUSE_COUNT: usize = 12;
pub const HOUSE_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    /// 1..=12
    pub number: u8,
    pub cusp_longitude: f64,
    pub sign: Sign,
}

/// Twelve 30° houses, house 1 starting exactly at the ascendant.
pub fn equal_houses(ascendant: f64) -> Vec<House> {
    let mut houses = Vec::with_capacity(HOUSE_COUNT);
    let mut cusp = normalize(ascendant);
    for number in 1..=HOUSE_COUNT as u8 {
        houses.push(House {
            number,
            cusp_longitude: cusp,
            sign: sign_of(cusp),
        });
        cusp = normalize(cusp + HOUSE_SPAN);
    }
    houses
}

/// House whose `[cusp, next cusp)` sector contains `longitude`.
///
/// `None` only for non-finite input or a malformed house list; callers
/// treat it as a broken invariant.
pub fn house_of(longitude: f64, houses: &[House]) -> Option<u8> {
    let n = houses.len();
    (0..n)
        .find(|&i| in_sector(longitude, houses, i))
        .map(|i| houses[i].number)
}

fn in_sector(longitude: f64, houses: &[House], i: usize) -> bool {
    let current = houses[i].cusp_longitude;
    let next = houses[(i + 1) % houses.len()].cusp_longitude;
    if next < current {
        // sector crosses 0°
        longitude >= current || longitude < next
    } else {
        longitude >= current && longitude < next
    }
}

/// Equal-house lookup from the ascendant alone.
///
/// The arithmetic estimate can land one house off right at a cusp, where
/// the accumulated cusps of [`equal_houses`] differ in the last bits, so
/// the estimate is checked against those cusps and its neighbours.
pub fn house_from_ascendant(longitude: f64, ascendant: f64) -> u8 {
    let lon = normalize(longitude);
    let estimate = (normalize(lon - ascendant) / HOUSE_SPAN) as usize % HOUSE_COUNT;
    let houses = equal_houses(ascendant);
    [estimate, (estimate + HOUSE_COUNT - 1) % HOUSE_COUNT, (estimate + 1) % HOUSE_COUNT]
        .into_iter()
        .find(|&i| in_sector(lon, &houses, i))
        .unwrap_or(estimate) as u8
        + 1
}
