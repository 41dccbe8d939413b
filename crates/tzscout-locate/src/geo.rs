use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tzscout_core::{GeolocationConfig, ScoutError};

/// A point on the globe in decimal degrees.
///
/// # Examples
///
/// ```
/// use tzscout_locate::geo::Coordinates;
///
/// let point = Coordinates::new(28.61, 77.21).unwrap();
/// assert_eq!(point.latitude, 28.61);
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    /// Degrees north of the equator, `-90..=90`.
    pub latitude: f64,
    /// Degrees east of Greenwich, `-180..=180`.
    pub longitude: f64,
}

impl Coordinates {
    /// # Errors
    ///
    /// Returns [`ScoutError::Lookup`] for non-finite or out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ScoutError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ScoutError::Lookup(format!("latitude {latitude} out of range")));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ScoutError::Lookup(format!("longitude {longitude} out of range")));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Something that can tell roughly where the caller is.
pub trait GeoLocator {
    /// Look up the caller's coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Lookup`] when the location cannot be determined.
    fn locate(&self) -> impl Future<Output = Result<Coordinates, ScoutError>> + Send;
}

/// Locates the caller by their network address through an HTTP service.
///
/// The service must answer with a JSON object carrying `latitude` and
/// `longitude`.
///
/// # Examples
///
/// ```
/// use tzscout_core::GeolocationConfig;
/// use tzscout_locate::geo::HttpGeoLocator;
///
/// let locator = HttpGeoLocator::new(&GeolocationConfig::default()).unwrap();
/// assert_eq!(locator.endpoint(), "https://geolocation-db.com/json");
/// ```
pub struct HttpGeoLocator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGeoLocator {
    /// Create a locator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Lookup`] if the HTTP client cannot be built.
    pub fn new(config: &GeolocationConfig) -> Result<Self, ScoutError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Lookup(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The configured service URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GeoLocator for HttpGeoLocator {
    async fn locate(&self) -> Result<Coordinates, ScoutError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ScoutError::Lookup(format!("geolocation request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Lookup(format!(
                "geolocation service returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ScoutError::Lookup(format!("invalid geolocation response: {e}")))?;
        parse_coordinates(&body)
    }
}

/// Extract coordinates from a geolocation response body.
///
/// Numbers and numeric strings are accepted; anything else (the service
/// answers `"Not found"` for unknown addresses) is a lookup failure.
///
/// # Errors
///
/// Returns [`ScoutError::Lookup`] if either field is missing or not numeric.
///
/// # Examples
///
/// ```
/// use tzscout_locate::geo::parse_coordinates;
///
/// let body = serde_json::json!({"latitude": 52.52, "longitude": "13.40"});
/// let point = parse_coordinates(&body).unwrap();
/// assert_eq!(point.longitude, 13.4);
/// ```
pub fn parse_coordinates(body: &Value) -> Result<Coordinates, ScoutError> {
    let field = |name: &str| -> Result<f64, ScoutError> {
        let value = body
            .get(name)
            .ok_or_else(|| ScoutError::Lookup(format!("geolocation response has no {name}")))?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        number.ok_or_else(|| ScoutError::Lookup(format!("geolocation {name} is not numeric: {value}")))
    };
    Coordinates::new(field("latitude")?, field("longitude")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numeric_coordinates() {
        let point = parse_coordinates(&json!({
            "country_code": "IN",
            "latitude": 28.6139,
            "longitude": 77.209
        }))
        .unwrap();
        assert_eq!(point, Coordinates::new(28.6139, 77.209).unwrap());
    }

    #[test]
    fn not_found_answer_is_a_lookup_failure() {
        let err = parse_coordinates(&json!({
            "latitude": "Not found",
            "longitude": "Not found"
        }))
        .unwrap_err();
        assert!(matches!(err, ScoutError::Lookup(_)));
    }

    #[test]
    fn missing_fields_are_lookup_failures() {
        assert!(parse_coordinates(&json!({"latitude": 1.0})).is_err());
        assert!(parse_coordinates(&json!([])).is_err());
        assert!(parse_coordinates(&json!({"latitude": null, "longitude": 1.0})).is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(-90.5, 0.0).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_lookup_failure() {
        let locator = HttpGeoLocator::new(&GeolocationConfig {
            endpoint: "http://127.0.0.1:9/json".into(),
            timeout_secs: 1,
        })
        .unwrap();
        let err = locator.locate().await.unwrap_err();
        assert!(matches!(err, ScoutError::Lookup(_)));
    }
}
