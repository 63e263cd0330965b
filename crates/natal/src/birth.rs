//! Birth data input and its conversion into a usable moment in time.

use crate::error::ChartError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// Zone names that mean "no offset".
const UTC_ALIASES: &[&str] = &["UTC", "UT", "Z", "GMT", "ETC/UTC", "ETC/GMT"];

/// Caller supplied birth data. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthData {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`, local clock time
    pub time: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Validated birth instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthMoment {
    /// Wall clock time at the birth place.
    pub local: NaiveDateTime,
    /// The same instant in UTC.
    pub utc: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// See [`BirthData::seed`].
    pub seed: [u8; 32],
}

impl BirthData {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            latitude,
            longitude,
            timezone: timezone.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check coordinates and combine date, time and zone into a moment.
    pub fn moment(&self) -> Result<BirthMoment, ChartError> {
        validate_coordinate("latitude", self.latitude, MAX_LATITUDE)?;
        validate_coordinate("longitude", self.longitude, MAX_LONGITUDE)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            ChartError::Parse {
                field: "date",
                value: self.date.clone(),
                message: e.to_string(),
            }
        })?;
        let time = parse_clock_time(self.time.trim()).map_err(|e| ChartError::Parse {
            field: "time",
            value: self.time.clone(),
            message: e.to_string(),
        })?;
        let local = NaiveDateTime::new(date, time);

        let offset = match parse_utc_offset(&self.timezone) {
            Some(offset) => offset,
            None => {
                log::warn!(
                    "Timezone '{}' is not a fixed offset; interpreting birth time as UTC",
                    self.timezone
                );
                Utc.fix()
            }
        };

        let utc = offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| ChartError::Parse {
                field: "timezone",
                value: self.timezone.clone(),
                message: format!("{} has no unique instant", local),
            })?;

        Ok(BirthMoment {
            local,
            utc,
            latitude: self.latitude,
            longitude: self.longitude,
            seed: self.seed(),
        })
    }

    /// Stable 32-byte seed derived from everything except the name.
    pub fn seed(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.date.trim().as_bytes());
        hasher.update(b"|");
        hasher.update(self.time.trim().as_bytes());
        hasher.update(b"|");
        hasher.update(self.latitude.to_bits().to_le_bytes());
        hasher.update(self.longitude.to_bits().to_le_bytes());
        hasher.update(self.timezone.trim().to_uppercase().as_bytes());
        hasher.finalize().into()
    }
}

impl BirthMoment {
    /// Fraction of the local day elapsed, in `[0, 1)`.
    pub fn day_fraction(&self) -> f64 {
        use chrono::Timelike;
        let t = self.local.time();
        (t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0) / 24.0
    }
}

fn validate_coordinate(axis: &'static str, value: f64, limit: f64) -> Result<(), ChartError> {
    if !value.is_finite() {
        return Err(ChartError::NumericInput { field: axis, value });
    }
    if value.abs() > limit {
        return Err(ChartError::InvalidCoordinate { axis, value, limit });
    }
    Ok(())
}

fn parse_clock_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

/// Parse `UTC`, `Z`, `+05:30`, `-0300`, `UTC+2`, `GMT-03:30` and friends.
///
/// Returns `None` for anything else, including IANA zone names.
pub fn parse_utc_offset(timezone: &str) -> Option<FixedOffset> {
    let tz = timezone.trim().to_uppercase();
    if UTC_ALIASES.contains(&tz.as_str()) {
        return Some(Utc.fix());
    }

    let rest = tz
        .strip_prefix("UTC")
        .or_else(|| tz.strip_prefix("GMT"))
        .unwrap_or(&tz);
    let (sign, digits) = match rest.chars().next()? {
        '+' => (1, &rest[1..]),
        '-' => (-1, &rest[1..]),
        _ => return None,
    };

    if !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = if let Some((h, m)) = digits.split_once(':') {
        (h, m)
    } else if digits.len() == 4 {
        digits.split_at(2)
    } else {
        (digits, "0")
    };
    if hours.is_empty() || !hours.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !minutes.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_moment_utc() {
        let birth = BirthData::new("2000-01-01", "12:00", 40.7128, -74.0060, "UTC");
        let moment = birth.moment().unwrap();
        assert_eq!(moment.utc.to_rfc3339(), "2000-01-01T12:00:00+00:00");
        assert_eq!(moment.day_fraction(), 0.5);
    }

    #[test]
    fn test_moment_fixed_offset_shifts_utc_not_local() {
        let birth = BirthData::new("1990-06-15", "08:30:00", 10.0, 10.0, "+05:30");
        let moment = birth.moment().unwrap();
        assert_eq!(moment.local.hour(), 8);
        assert_eq!(moment.utc.hour(), 3);
        assert_eq!(moment.utc.minute(), 0);
    }

    #[test]
    fn test_named_zone_falls_back_to_utc() {
        let birth = BirthData::new("1990-06-15", "08:30", 10.0, 10.0, "America/New_York");
        let moment = birth.moment().unwrap();
        assert_eq!(moment.utc.hour(), 8);
    }

    #[test]
    fn test_parse_errors() {
        let bad_date = BirthData::new("2000-13-01", "12:00", 0.0, 0.0, "UTC");
        assert!(matches!(bad_date.moment(), Err(ChartError::Parse { field: "date", .. })));

        let bad_time = BirthData::new("2000-01-01", "25:61", 0.0, 0.0, "UTC");
        assert!(matches!(bad_time.moment(), Err(ChartError::Parse { field: "time", .. })));
    }

    #[test]
    fn test_coordinate_validation() {
        let lat = BirthData::new("2000-01-01", "12:00", 91.0, 0.0, "UTC");
        assert!(matches!(lat.moment(), Err(ChartError::InvalidCoordinate { axis: "latitude", .. })));

        let lon = BirthData::new("2000-01-01", "12:00", 0.0, -180.5, "UTC");
        assert!(matches!(lon.moment(), Err(ChartError::InvalidCoordinate { axis: "longitude", .. })));

        let nan = BirthData::new("2000-01-01", "12:00", f64::NAN, 0.0, "UTC");
        assert!(matches!(nan.moment(), Err(ChartError::NumericInput { field: "latitude", .. })));

        let edge = BirthData::new("2000-01-01", "12:00", -90.0, 180.0, "UTC");
        assert!(edge.moment().is_ok());
    }

    #[test]
    fn test_parse_utc_offset_forms() {
        let secs = |tz: &str| parse_utc_offset(tz).map(|o| o.local_minus_utc());
        assert_eq!(secs("utc"), Some(0));
        assert_eq!(secs("Z"), Some(0));
        assert_eq!(secs("+05:30"), Some(19800));
        assert_eq!(secs("-0300"), Some(-10800));
        assert_eq!(secs("UTC+2"), Some(7200));
        assert_eq!(secs("GMT-03:30"), Some(-12600));
        assert_eq!(secs("Europe/Paris"), None);
        assert_eq!(secs("+25"), None);
        assert_eq!(secs("UTC+"), None);
        assert_eq!(secs("+1é2"), None);
        assert_eq!(secs("-é:30"), None);
    }

    #[test]
    fn test_non_ascii_offset_falls_back_to_utc() {
        let moment = BirthData::new("2000-01-01", "12:00", 0.0, 0.0, "+1é2")
            .moment()
            .unwrap();
        assert_eq!(moment.utc.timestamp_millis(), crate::ephemeris::types::EPOCH_UNIX_MS);
    }

    #[test]
    fn test_seed_ignores_name() {
        let a = BirthData::new("2000-01-01", "12:00", 1.0, 2.0, "UTC");
        let b = a.clone().with_name("Ada");
        let c = BirthData::new("2000-01-01", "12:01", 1.0, 2.0, "UTC");
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
    }
}
