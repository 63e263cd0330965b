//! Polar projection of ecliptic longitudes onto a square wheel.
//!
//! Screen coordinates have the origin top-left with y growing downwards.
//! Nothing here draws; renderers consume [`WheelPoints`].

use crate::angle::{circular_midpoint, normalize, to_radians};
use crate::aspects::AspectKind;
use crate::chart::data::ChartData;
use crate::ephemeris::Body;
use crate::zodiac::{Sign, SIGN_SPAN};
use serde::{Deserialize, Serialize};

/// Point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Where 0° sits and which way the zodiac runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Orientation {
    /// 0° Aries at 12 o'clock, increasing clockwise.
    TopClockwise,
    /// Ascendant at 9 o'clock, increasing counter-clockwise.
    AscendantLeft { ascendant: f64 },
}

/// Ring radii for a wheel of a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelLayout {
    pub size: f64,
    pub center: Point,
    pub outer_radius: f64,
    pub house_radius: f64,
    pub body_radius: f64,
    pub inner_radius: f64,
    pub orientation: Orientation,
}

impl WheelLayout {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            center: Point {
                x: size / 2.0,
                y: size / 2.0,
            },
            outer_radius: size * 0.45,
            house_radius: size * 0.38,
            body_radius: size * 0.35,
            inner_radius: size * 0.30,
            orientation: Orientation::TopClockwise,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Conventional chart orientation for `chart`.
    pub fn ascendant_left(self, chart: &ChartData) -> Self {
        self.with_orientation(Orientation::AscendantLeft {
            ascendant: chart.ascendant,
        })
    }

    /// Screen angle in degrees, counter-clockwise from 3 o'clock.
    pub fn screen_angle(&self, longitude: f64) -> f64 {
        match self.orientation {
            Orientation::TopClockwise => normalize(90.0 - longitude),
            Orientation::AscendantLeft { ascendant } => normalize(180.0 + longitude - ascendant),
        }
    }

    pub fn project(&self, longitude: f64, radius: f64) -> Point {
        let theta = to_radians(self.screen_angle(longitude));
        Point {
            x: self.center.x + radius * theta.cos(),
            y: self.center.y - radius * theta.sin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPoint {
    pub body: Body,
    pub longitude: f64,
    pub point: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignSegment {
    pub sign: Sign,
    /// Divider between this sign and the previous one
    pub divider: (Point, Point),
    pub label: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuspSpoke {
    pub number: u8,
    pub from: Point,
    pub to: Point,
    pub label: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectLine {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_kind: AspectKind,
    pub from: Point,
    pub to: Point,
}

/// Every coordinate a wheel renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelPoints {
    pub layout: WheelLayout,
    pub signs: Vec<SignSegment>,
    pub cusps: Vec<CuspSpoke>,
    pub bodies: Vec<BodyPoint>,
    pub aspects: Vec<AspectLine>,
}

impl ChartData {
    pub fn wheel(&self, layout: &WheelLayout) -> WheelPoints {
        let signs = Sign::ALL
            .iter()
            .map(|&sign| {
                let start = sign.start_longitude();
                SignSegment {
                    sign,
                    divider: (
                        layout.project(start, layout.outer_radius),
                        layout.project(start, layout.house_radius),
                    ),
                    label: layout.project(
                        start + SIGN_SPAN / 2.0,
                        (layout.outer_radius + layout.house_radius) / 2.0,
                    ),
                }
            })
            .collect();

        let cusps = self
            .houses
            .iter()
            .enumerate()
            .map(|(i, house)| {
                let next = &self.houses[(i + 1) % self.houses.len()];
                CuspSpoke {
                    number: house.number,
                    from: layout.project(house.cusp_longitude, layout.inner_radius),
                    to: layout.project(house.cusp_longitude, layout.house_radius),
                    label: layout.project(
                        circular_midpoint(house.cusp_longitude, next.cusp_longitude),
                        layout.inner_radius * 0.9,
                    ),
                }
            })
            .collect();

        let bodies = self
            .bodies
            .iter()
            .map(|b| BodyPoint {
                body: b.name,
                longitude: b.longitude,
                point: layout.project(b.longitude, layout.body_radius),
            })
            .collect();

        let aspects = self
            .aspects
            .iter()
            .filter_map(|a| {
                let from = self.body(a.body_a)?;
                let to = self.body(a.body_b)?;
                Some(AspectLine {
                    body_a: a.body_a,
                    body_b: a.body_b,
                    aspect_kind: a.aspect_kind,
                    from: layout.project(from.longitude, layout.inner_radius),
                    to: layout.project(to.longitude, layout.inner_radius),
                })
            })
            .collect();

        WheelPoints {
            layout: *layout,
            signs,
            cusps,
            bodies,
            aspects,
        }
    }
}
