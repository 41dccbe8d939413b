//! Turning "where am I" into an offset bucket.
//!
//! Every automatic lookup ends in a [`Resolution`]. Lookup failures become
//! [`Resolution::Fallback`] so the caller can ask for a zone instead.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use tzscout_core::{format_offset_display, parse_offset_display, GeolocationConfig, OffsetKey, ScoutError};

use crate::geo::{Coordinates, GeoLocator, HttpGeoLocator};
use crate::zone::{offset_in_zone, PolygonZoneFinder, ZoneFinder};

/// How a resolved offset was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Looked up from the caller's network location.
    Geolocation,
    /// Looked up from explicit coordinates.
    Coordinates,
    /// Chosen by the user as a `UTC±H:MM` string.
    Manual,
}

/// Outcome of resolving the user's offset bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Resolution {
    /// An offset was determined.
    Resolved {
        /// Bucket key of the offset in effect.
        key: OffsetKey,
        /// IANA zone name, when the offset came from a location.
        zone: Option<String>,
        /// How the offset was obtained.
        source: ResolutionSource,
    },
    /// Automatic lookup failed; the user should pick a zone manually.
    Fallback {
        /// Why the lookup failed, for display.
        reason: String,
    },
}

impl Resolution {
    /// The resolved key, if any.
    pub fn key(&self) -> Option<OffsetKey> {
        match self {
            Resolution::Resolved { key, .. } => Some(*key),
            Resolution::Fallback { .. } => None,
        }
    }

    /// `UTC±H:MM` form of the resolved key.
    pub fn display(&self) -> Option<String> {
        self.key().map(format_offset_display)
    }
}

/// Resolve a manually selected `UTC±H:MM` string.
///
/// Unlike automatic lookup, a bad manual selection is the user's error and is
/// reported as such.
///
/// # Errors
///
/// Returns [`ScoutError::InvalidOffset`] for an unparsable string.
///
/// # Examples
///
/// ```
/// use tzscout_locate::resolver::resolve_display;
///
/// let resolution = resolve_display("UTC+5:30").unwrap();
/// assert_eq!(resolution.key().unwrap().to_string(), "5.5");
/// assert!(resolve_display("five thirty").is_err());
/// ```
pub fn resolve_display(display: &str) -> Result<Resolution, ScoutError> {
    Ok(Resolution::Resolved {
        key: parse_offset_display(display)?,
        zone: None,
        source: ResolutionSource::Manual,
    })
}

/// Composes a [`GeoLocator`] and a [`ZoneFinder`] into offset resolution.
pub struct BucketResolver<L, Z> {
    locator: L,
    finder: Z,
    timeout: Duration,
}

impl BucketResolver<HttpGeoLocator, PolygonZoneFinder> {
    /// HTTP geolocation plus polygon zone lookup, as configured.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Lookup`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeolocationConfig) -> Result<Self, ScoutError> {
        Ok(Self::new(
            HttpGeoLocator::new(config)?,
            PolygonZoneFinder::new(),
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl<L: GeoLocator, Z: ZoneFinder> BucketResolver<L, Z> {
    /// `timeout` bounds the whole geolocation step.
    pub fn new(locator: L, finder: Z, timeout: Duration) -> Self {
        Self {
            locator,
            finder,
            timeout,
        }
    }

    /// Locate the caller and resolve the offset in effect right now.
    pub async fn resolve_auto(&self) -> Resolution {
        self.resolve_auto_at(Utc::now()).await
    }

    /// Locate the caller and resolve the offset in effect at `at`.
    pub async fn resolve_auto_at(&self, at: DateTime<Utc>) -> Resolution {
        let located = match tokio::time::timeout(self.timeout, self.locator.locate()).await {
            Ok(result) => result,
            Err(_) => Err(ScoutError::Lookup(format!(
                "geolocation timed out after {:?}",
                self.timeout
            ))),
        };

        match located {
            Ok(point) => {
                debug!(
                    latitude = point.latitude,
                    longitude = point.longitude,
                    "geolocated caller"
                );
                self.finish(point, at, ResolutionSource::Geolocation)
            }
            Err(e) => fallback(e),
        }
    }

    /// Resolve the offset in effect at `at` for a known point.
    pub fn resolve_coordinates(&self, latitude: f64, longitude: f64, at: DateTime<Utc>) -> Resolution {
        match Coordinates::new(latitude, longitude) {
            Ok(point) => self.finish(point, at, ResolutionSource::Coordinates),
            Err(e) => fallback(e),
        }
    }

    fn finish(&self, point: Coordinates, at: DateTime<Utc>, source: ResolutionSource) -> Resolution {
        let Some(zone) = self.finder.zone_at(point.latitude, point.longitude) else {
            return fallback(ScoutError::Lookup(format!(
                "no time zone covers {:.4}, {:.4}",
                point.latitude, point.longitude
            )));
        };
        debug!(zone = %zone, "found time zone");

        match offset_in_zone(&zone, at) {
            Ok(key) => {
                debug!(offset = %key, "resolved offset bucket");
                Resolution::Resolved {
                    key,
                    zone: Some(zone),
                    source,
                }
            }
            Err(e) => fallback(e),
        }
    }
}

fn fallback(error: ScoutError) -> Resolution {
    warn!(error = %error, "time zone lookup failed");
    Resolution::Fallback {
        reason: error.to_string(),
    }
}
