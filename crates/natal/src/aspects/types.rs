use crate::ephemeris::Body;
use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Deviations below this count as exact unless overridden.
pub const DEFAULT_EXACT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Semisextile,
    Semisquare,
    Sextile,
    Square,
    Trine,
    Sesquiquadrate,
    Quincunx,
    Opposition,
}

/// Order in which kinds are tried for a pair; the first kind whose orb
/// admits the separation wins. Majors come first.
pub const ASPECT_PRIORITY: [AspectKind; 9] = [
    AspectKind::Conjunction,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
    AspectKind::Semisextile,
    AspectKind::Semisquare,
    AspectKind::Sesquiquadrate,
    AspectKind::Quincunx,
];

impl AspectKind {
    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Semisextile => "semisextile",
            AspectKind::Semisquare => "semisquare",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
            AspectKind::Quincunx => "quincunx",
            AspectKind::Opposition => "opposition",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::Semisextile => "⚺",
            AspectKind::Semisquare => "∠",
            AspectKind::Sextile => "⚹",
            AspectKind::Square => "□",
            AspectKind::Trine => "△",
            AspectKind::Sesquiquadrate => "⚼",
            AspectKind::Quincunx => "⚻",
            AspectKind::Opposition => "☍",
        }
    }

    /// Canonical separation in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Semisextile => 30.0,
            AspectKind::Semisquare => 45.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Sesquiquadrate => 135.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn default_orb(self) -> f64 {
        match self {
            AspectKind::Conjunction
            | AspectKind::Square
            | AspectKind::Trine
            | AspectKind::Opposition => 8.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Semisextile
            | AspectKind::Semisquare
            | AspectKind::Sesquiquadrate
            | AspectKind::Quincunx => 3.0,
        }
    }

    pub fn is_major(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction
                | AspectKind::Sextile
                | AspectKind::Square
                | AspectKind::Trine
                | AspectKind::Opposition
        )
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ASPECT_PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ChartError::UnknownAspect(s.to_string()))
    }
}

/// A detected aspect between two bodies of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_kind: AspectKind,
    /// Canonical angle of `aspect_kind`
    pub exact_angle: f64,
    /// Absolute deviation from `exact_angle`
    pub orb: f64,
    pub is_exact: bool,
    /// Separation is closing on the exact angle
    pub applying: bool,
}

/// Outcome of testing one separation against the aspect table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub kind: AspectKind,
    pub orb: f64,
    pub is_exact: bool,
    pub applying: bool,
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    /// Orb per kind; kinds not listed use their default
    pub orbs: BTreeMap<AspectKind, f64>,
    /// Consider semisextile, semisquare, sesquiquadrate and quincunx
    pub include_minor: bool,
    pub exact_threshold: f64,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: BTreeMap::new(),
            include_minor: true,
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
        }
    }
}

impl AspectSettings {
    pub fn orb_for(&self, kind: AspectKind) -> f64 {
        self.orbs.get(&kind).copied().unwrap_or_else(|| kind.default_orb())
    }

    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        self.orbs.insert(kind, orb);
        self
    }

    pub fn majors_only(mut self) -> Self {
        self.include_minor = false;
        self
    }

    /// Kinds to test, in priority order.
    pub fn active_kinds(&self) -> impl Iterator<Item = AspectKind> + '_ {
        ASPECT_PRIORITY
            .iter()
            .copied()
            .filter(move |kind| self.include_minor || kind.is_major())
    }
}
