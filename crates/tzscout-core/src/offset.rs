//! UTC offset keys and their `UTC±H:MM` display form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// Offsets must stay strictly inside one day either side of UTC.
const MAX_ABS_MINUTES: i32 = 24 * 60;

/// A UTC offset identifying one statistics bucket.
///
/// Stored as whole minutes so `"-3"`, `"-3.0"` and `"UTC-3:00"` all name the
/// same bucket. The canonical text form prints integral hours without a
/// fraction (`"-3"`, `"0"`) and everything else as the shortest decimal
/// (`"5.5"`, `"5.75"`).
///
/// # Examples
///
/// ```
/// use tzscout_core::OffsetKey;
///
/// let key: OffsetKey = "5.5".parse().unwrap();
/// assert_eq!(key.minutes(), 330);
/// assert_eq!(key.to_string(), "5.5");
///
/// let whole: OffsetKey = "-3.0".parse().unwrap();
/// assert_eq!(whole.to_string(), "-3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OffsetKey {
    minutes: i32,
}

impl OffsetKey {
    /// UTC itself.
    pub const UTC: OffsetKey = OffsetKey { minutes: 0 };

    /// Build a key from an offset in minutes east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidOffset`] if the offset is a day or more
    /// away from UTC.
    pub fn from_minutes(minutes: i32) -> Result<Self, ScoutError> {
        if minutes.abs() >= MAX_ABS_MINUTES {
            return Err(ScoutError::InvalidOffset(format!(
                "{minutes} minutes is outside the valid offset range"
            )));
        }
        Ok(Self { minutes })
    }

    /// Build a key from a fractional number of hours, rounded to the minute.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidOffset`] for non-finite or out-of-range values.
    pub fn from_hours(hours: f64) -> Result<Self, ScoutError> {
        if !hours.is_finite() {
            return Err(ScoutError::InvalidOffset(format!("{hours} is not a number")));
        }
        let minutes = (hours * 60.0).round();
        if minutes.abs() >= f64::from(MAX_ABS_MINUTES) {
            return Err(ScoutError::InvalidOffset(format!(
                "{hours} hours is outside the valid offset range"
            )));
        }
        Self::from_minutes(minutes as i32)
    }

    /// Build a key from an offset in seconds, as reported by time-zone data.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidOffset`] if the offset is out of range.
    pub fn from_seconds(seconds: i32) -> Result<Self, ScoutError> {
        let minutes = (f64::from(seconds) / 60.0).round() as i32;
        Self::from_minutes(minutes)
    }

    /// Offset in minutes east of UTC.
    pub fn minutes(self) -> i32 {
        self.minutes
    }

    /// Offset in fractional hours.
    pub fn hours(self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    /// Absolute distance to `other` in minutes.
    pub fn distance_minutes(self, other: OffsetKey) -> i32 {
        (self.minutes - other.minutes).abs()
    }
}

impl fmt::Display for OffsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes % 60 == 0 {
            write!(f, "{}", self.minutes / 60)
        } else {
            write!(f, "{}", self.hours())
        }
    }
}

impl FromStr for OffsetKey {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hours: f64 = trimmed
            .parse()
            .map_err(|_| ScoutError::InvalidOffset(format!("'{s}' is not a numeric offset")))?;
        Self::from_hours(hours)
    }
}

impl TryFrom<String> for OffsetKey {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OffsetKey> for String {
    fn from(key: OffsetKey) -> Self {
        key.to_string()
    }
}

/// Render an offset as `UTC±H:MM`, using `+` for UTC itself.
///
/// # Examples
///
/// ```
/// use tzscout_core::{format_offset_display, OffsetKey};
///
/// let key: OffsetKey = "-9.5".parse().unwrap();
/// assert_eq!(format_offset_display(key), "UTC-9:30");
/// assert_eq!(format_offset_display(OffsetKey::UTC), "UTC+0:00");
/// ```
pub fn format_offset_display(key: OffsetKey) -> String {
    let sign = if key.minutes >= 0 { '+' } else { '-' };
    let abs = key.minutes.abs();
    format!("UTC{sign}{}:{:02}", abs / 60, abs % 60)
}

/// Parse a `UTC±H:MM` display string back into an [`OffsetKey`].
///
/// The minute part is optional, the `UTC` prefix is case-insensitive and a
/// bare `UTC` means offset zero.
///
/// # Errors
///
/// Returns [`ScoutError::InvalidOffset`] if the string is not of that form or
/// names an offset outside ±24 hours.
///
/// # Examples
///
/// ```
/// use tzscout_core::parse_offset_display;
///
/// assert_eq!(parse_offset_display("UTC-9:30").unwrap().to_string(), "-9.5");
/// assert_eq!(parse_offset_display("UTC+0:00").unwrap().to_string(), "0");
/// assert_eq!(parse_offset_display("utc+5").unwrap().to_string(), "5");
/// ```
pub fn parse_offset_display(display: &str) -> Result<OffsetKey, ScoutError> {
    let invalid = || ScoutError::InvalidOffset(format!("'{display}' is not of the form UTC±H:MM"));

    let trimmed = display.trim();
    let prefix = trimmed.get(..3).ok_or_else(invalid)?;
    if !prefix.eq_ignore_ascii_case("UTC") {
        return Err(invalid());
    }
    let rest = &trimmed[3..];
    if rest.is_empty() {
        return Ok(OffsetKey::UTC);
    }

    let (sign, body) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return Err(invalid()),
    };

    let (hour_part, minute_part) = match body.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None => (body, None),
    };

    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(hour_part) {
        return Err(invalid());
    }
    let hours: i32 = hour_part.parse().map_err(|_| invalid())?;

    let minutes: i32 = match minute_part {
        Some(m) if is_digits(m) && m.len() == 2 => m.parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
        None => 0,
    };
    if minutes >= 60 {
        return Err(invalid());
    }

    let total = hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)?;
    OffsetKey::from_minutes(sign * total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> OffsetKey {
        s.parse().unwrap()
    }

    #[test]
    fn canonical_text_drops_integral_fraction() {
        assert_eq!(key("0.0").to_string(), "0");
        assert_eq!(key("-0").to_string(), "0");
        assert_eq!(key("-3.0").to_string(), "-3");
        assert_eq!(key("10").to_string(), "10");
        assert_eq!(key("5.5").to_string(), "5.5");
        assert_eq!(key("5.75").to_string(), "5.75");
        assert_eq!(key("-9.5").to_string(), "-9.5");
    }

    #[test]
    fn equal_offsets_compare_equal_regardless_of_spelling() {
        assert_eq!(key("-3"), key("-3.0"));
        assert_eq!(key("+5.5"), key("5.50"));
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range_keys() {
        assert!("global".parse::<OffsetKey>().is_err());
        assert!("NaN".parse::<OffsetKey>().is_err());
        assert!("inf".parse::<OffsetKey>().is_err());
        assert!("24".parse::<OffsetKey>().is_err());
        assert!("-24.5".parse::<OffsetKey>().is_err());
        assert!("14".parse::<OffsetKey>().is_ok());
    }

    #[test]
    fn from_seconds_rounds_to_minutes() {
        assert_eq!(OffsetKey::from_seconds(19_800).unwrap(), key("5.5"));
        assert_eq!(OffsetKey::from_seconds(-34_200).unwrap(), key("-9.5"));
        assert_eq!(OffsetKey::from_seconds(20_700).unwrap(), key("5.75"));
    }

    #[test]
    fn formats_display_strings() {
        assert_eq!(format_offset_display(key("-9.5")), "UTC-9:30");
        assert_eq!(format_offset_display(key("5.5")), "UTC+5:30");
        assert_eq!(format_offset_display(key("5.75")), "UTC+5:45");
        assert_eq!(format_offset_display(key("12.75")), "UTC+12:45");
        assert_eq!(format_offset_display(key("-3")), "UTC-3:00");
        assert_eq!(format_offset_display(key("0")), "UTC+0:00");
    }

    #[test]
    fn parses_display_strings() {
        assert_eq!(parse_offset_display("UTC-9:30").unwrap().to_string(), "-9.5");
        assert_eq!(parse_offset_display("UTC+0:00").unwrap().to_string(), "0");
        assert_eq!(parse_offset_display("UTC-0:00").unwrap().to_string(), "0");
        assert_eq!(parse_offset_display(" UTC+5:45 ").unwrap().to_string(), "5.75");
        assert_eq!(parse_offset_display("UTC+10").unwrap().to_string(), "10");
        assert_eq!(parse_offset_display("UTC").unwrap(), OffsetKey::UTC);
    }

    #[test]
    fn rejects_malformed_display_strings() {
        for bad in [
            "",
            "GMT+1:00",
            "UTC5:30",
            "UTC+",
            "UTC+5:3",
            "UTC+5:60",
            "UTC+a:00",
            "UTC+5:30:00",
            "UTC+24:00",
            "UTC++5",
        ] {
            assert!(parse_offset_display(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn display_round_trips_for_every_quarter_hour() {
        for minutes in (-(23 * 60 + 45)..=(23 * 60 + 45)).step_by(15) {
            let original = OffsetKey::from_minutes(minutes).unwrap();
            let display = format_offset_display(original);
            let parsed = parse_offset_display(&display).unwrap();
            assert_eq!(parsed, original, "round trip failed for {display}");
            assert_eq!(parsed.to_string(), original.to_string());
        }
    }

    #[test]
    fn canonical_text_round_trips() {
        for minutes in [-570, -180, 0, 20, 330, 345, 765] {
            let original = OffsetKey::from_minutes(minutes).unwrap();
            assert_eq!(original.to_string().parse::<OffsetKey>().unwrap(), original);
        }
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&key("-9.5")).unwrap();
        assert_eq!(json, "\"-9.5\"");
        let parsed: OffsetKey = serde_json::from_str("\"5.5\"").unwrap();
        assert_eq!(parsed.minutes(), 330);
    }
}
