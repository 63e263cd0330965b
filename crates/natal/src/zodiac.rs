//! Zodiac sign lookup.
//!
//! The ecliptic is split into 12 signs of 30 degrees each, Aries first.
//! Each sign carries an element, a modality and a traditional ruler.

use crate::angle::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

struct SignMeta {
    sign: Sign,
    name: &'static str,
    symbol: &'static str,
    element: Element,
    modality: Modality,
    ruler: &'static str,
}

const SIGNS: [SignMeta; 12] = [
    SignMeta { sign: Sign::Aries, name: "Aries", symbol: "♈", element: Element::Fire, modality: Modality::Cardinal, ruler: "Mars" },
    SignMeta { sign: Sign::Taurus, name: "Taurus", symbol: "♉", element: Element::Earth, modality: Modality::Fixed, ruler: "Venus" },
    SignMeta { sign: Sign::Gemini, name: "Gemini", symbol: "♊", element: Element::Air, modality: Modality::Mutable, ruler: "Mercury" },
    SignMeta { sign: Sign::Cancer, name: "Cancer", symbol: "♋", element: Element::Water, modality: Modality::Cardinal, ruler: "Moon" },
    SignMeta { sign: Sign::Leo, name: "Leo", symbol: "♌", element: Element::Fire, modality: Modality::Fixed, ruler: "Sun" },
    SignMeta { sign: Sign::Virgo, name: "Virgo", symbol: "♍", element: Element::Earth, modality: Modality::Mutable, ruler: "Mercury" },
    SignMeta { sign: Sign::Libra, name: "Libra", symbol: "♎", element: Element::Air, modality: Modality::Cardinal, ruler: "Venus" },
    SignMeta { sign: Sign::Scorpio, name: "Scorpio", symbol: "♏", element: Element::Water, modality: Modality::Fixed, ruler: "Mars" },
    SignMeta { sign: Sign::Sagittarius, name: "Sagittarius", symbol: "♐", element: Element::Fire, modality: Modality::Mutable, ruler: "Jupiter" },
    SignMeta { sign: Sign::Capricorn, name: "Capricorn", symbol: "♑", element: Element::Earth, modality: Modality::Cardinal, ruler: "Saturn" },
    SignMeta { sign: Sign::Aquarius, name: "Aquarius", symbol: "♒", element: Element::Air, modality: Modality::Fixed, ruler: "Saturn" },
    SignMeta { sign: Sign::Pisces, name: "Pisces", symbol: "♓", element: Element::Water, modality: Modality::Mutable, ruler: "Jupiter" },
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    fn meta(self) -> &'static SignMeta {
        &SIGNS[self.index()]
    }

    /// Zero-based position in zodiacal order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Sign {
        Sign::ALL[index % 12]
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn symbol(self) -> &'static str {
        self.meta().symbol
    }

    pub fn element(self) -> Element {
        self.meta().element
    }

    pub fn modality(self) -> Modality {
        self.meta().modality
    }

    /// Traditional ruler.
    pub fn ruler(self) -> &'static str {
        self.meta().ruler
    }

    /// Longitude where this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sign containing `longitude`. Out-of-range input is normalized first.
pub fn sign_of(longitude: f64) -> Sign {
    Sign::from_index((normalize(longitude) / SIGN_SPAN) as usize)
}

/// Offset of `longitude` from the start of its sign, in `[0, 30)`.
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize(longitude) % SIGN_SPAN
}

/// Human readable position such as `15°30' Aries`.
pub fn format_position(longitude: f64) -> String {
    let in_sign = degree_in_sign(longitude);
    let degrees = in_sign.floor();
    let minutes = ((in_sign - degrees) * 60.0).floor();
    format!("{}°{:02}' {}", degrees as u32, minutes as u32, sign_of(longitude))
}
