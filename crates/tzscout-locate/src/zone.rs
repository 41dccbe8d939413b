use chrono::{DateTime, Offset, Utc};
use chrono_tz::Tz;
use tzscout_core::{OffsetKey, ScoutError};

/// Maps a point on the globe to an IANA time zone name.
pub trait ZoneFinder {
    /// The zone containing the point, or `None` when no zone covers it.
    fn zone_at(&self, latitude: f64, longitude: f64) -> Option<String>;
}

/// Zone lookup backed by the bundled time zone boundary polygons.
///
/// Construction decompresses the polygon data, so build one finder and reuse
/// it.
pub struct PolygonZoneFinder {
    finder: tzf_rs::DefaultFinder,
}

impl PolygonZoneFinder {
    /// Load the bundled boundary polygons.
    pub fn new() -> Self {
        Self {
            finder: tzf_rs::DefaultFinder::new(),
        }
    }
}

impl Default for PolygonZoneFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneFinder for PolygonZoneFinder {
    fn zone_at(&self, latitude: f64, longitude: f64) -> Option<String> {
        let name = self.finder.get_tz_name(longitude, latitude);
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

/// UTC offset in effect in `zone` at instant `at`, daylight saving included.
///
/// # Errors
///
/// Returns [`ScoutError::Lookup`] for an unknown zone name.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tzscout_locate::zone::offset_in_zone;
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// assert_eq!(offset_in_zone("Asia/Kolkata", at).unwrap().to_string(), "5.5");
/// assert!(offset_in_zone("Mars/Olympus_Mons", at).is_err());
/// ```
pub fn offset_in_zone(zone: &str, at: DateTime<Utc>) -> Result<OffsetKey, ScoutError> {
    let tz: Tz = zone
        .parse()
        .map_err(|e| ScoutError::Lookup(format!("unknown time zone '{zone}': {e}")))?;
    let seconds = at.with_timezone(&tz).offset().fix().local_minus_utc();
    OffsetKey::from_seconds(seconds)
}
