use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;

/// Smallest number of recommendations a table may show.
pub const MIN_RECOMMENDATIONS: usize = 1;
/// Largest number of recommendations a table may show.
pub const MAX_RECOMMENDATIONS: usize = 20;
/// Largest neighborhood radius, in hours, that a window may span.
pub const MAX_WINDOW_HOURS: f64 = 48.0;

/// Top-level configuration loaded from `.tzscout.toml`.
///
/// Resolution order is CLI flags > config file > defaults.
///
/// # Examples
///
/// ```
/// use tzscout_core::ScoutConfig;
///
/// let config = ScoutConfig::default();
/// assert_eq!(config.recommend.count, 5);
/// assert_eq!(config.recommend.window_hours, 2.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Dataset locations.
    #[serde(default)]
    pub data: DataConfig,
    /// Recommendation table settings.
    #[serde(default)]
    pub recommend: RecommendConfig,
    /// Automatic location lookup settings.
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

impl ScoutConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Io`] if the file cannot be read,
    /// [`ScoutError::Toml`] if it is not valid TOML, or
    /// [`ScoutError::Config`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ScoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Toml`] if parsing fails, or
    /// [`ScoutError::Config`] if a value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tzscout_core::ScoutConfig;
    ///
    /// let toml = r#"
    /// [recommend]
    /// count = 10
    /// "#;
    /// let config = ScoutConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.recommend.count, 10);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ScoutError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScoutError> {
        let count = self.recommend.count;
        if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&count) {
            return Err(ScoutError::Config(format!(
                "recommend.count must be between {MIN_RECOMMENDATIONS} and {MAX_RECOMMENDATIONS}, got {count}"
            )));
        }
        let window = self.recommend.window_hours;
        if !window.is_finite() || !(0.0..=MAX_WINDOW_HOURS).contains(&window) {
            return Err(ScoutError::Config(format!(
                "recommend.window_hours must be between 0 and {MAX_WINDOW_HOURS}, got {window}"
            )));
        }
        if self.geolocation.timeout_secs == 0 {
            return Err(ScoutError::Config(
                "geolocation.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Where the precomputed statistics live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Offset → project → contributor count dataset.
    #[serde(default = "default_location_path")]
    pub location_path: PathBuf,
    /// Offset → gender → project records dataset.
    #[serde(default = "default_demographic_path")]
    pub demographic_path: PathBuf,
}

fn default_location_path() -> PathBuf {
    PathBuf::from("tz_project.json")
}

fn default_demographic_path() -> PathBuf {
    PathBuf::from("tz_gender_project.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            location_path: default_location_path(),
            demographic_path: default_demographic_path(),
        }
    }
}

/// Recommendation table settings.
///
/// # Examples
///
/// ```
/// use tzscout_core::RecommendConfig;
///
/// let config = RecommendConfig::default();
/// assert_eq!(config.count, 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Rows per table (default: 5, range 1..=20).
    #[serde(default = "default_count")]
    pub count: usize,
    /// Neighborhood radius in hours (default: 2.0).
    #[serde(default = "default_window_hours")]
    pub window_hours: f64,
}

fn default_count() -> usize {
    5
}

fn default_window_hours() -> f64 {
    2.0
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            window_hours: default_window_hours(),
        }
    }
}

/// Automatic location lookup settings.
///
/// # Examples
///
/// ```
/// use tzscout_core::GeolocationConfig;
///
/// let config = GeolocationConfig::default();
/// assert_eq!(config.timeout_secs, 4);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Endpoint returning `{"latitude": .., "longitude": ..}` for the caller.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds (default: 4).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://geolocation-db.com/json".into()
}

fn default_timeout_secs() -> u64 {
    4
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = ScoutConfig::default();
        assert_eq!(config.data.location_path, PathBuf::from("tz_project.json"));
        assert_eq!(
            config.data.demographic_path,
            PathBuf::from("tz_gender_project.json")
        );
        assert_eq!(config.recommend.count, 5);
        assert_eq!(config.recommend.window_hours, 2.0);
        assert_eq!(config.geolocation.endpoint, "https://geolocation-db.com/json");
        assert_eq!(config.geolocation.timeout_secs, 4);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ScoutConfig::from_toml("").unwrap();
        assert_eq!(config.recommend.count, 5);
        assert_eq!(config.geolocation.timeout_secs, 4);
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[data]
location_path = "data/tz.json"
demographic_path = "data/gender.json"

[recommend]
count = 12
window_hours = 1.5

[geolocation]
endpoint = "http://localhost:9999/json"
timeout_secs = 2
"#;
        let config = ScoutConfig::from_toml(toml).unwrap();
        assert_eq!(config.data.location_path, PathBuf::from("data/tz.json"));
        assert_eq!(config.data.demographic_path, PathBuf::from("data/gender.json"));
        assert_eq!(config.recommend.count, 12);
        assert_eq!(config.recommend.window_hours, 1.5);
        assert_eq!(config.geolocation.endpoint, "http://localhost:9999/json");
        assert_eq!(config.geolocation.timeout_secs, 2);
    }

    #[test]
    fn count_out_of_range_is_rejected() {
        let err = ScoutConfig::from_toml("[recommend]\ncount = 21\n").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
        assert!(ScoutConfig::from_toml("[recommend]\ncount = 0\n").is_err());
    }

    #[test]
    fn window_outside_supported_radius_is_rejected() {
        let err = ScoutConfig::from_toml("[recommend]\nwindow_hours = 100.0\n").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
        assert!(ScoutConfig::from_toml("[recommend]\nwindow_hours = -0.5\n").is_err());
        assert!(ScoutConfig::from_toml("[recommend]\nwindow_hours = 48.0\n").is_ok());
        assert!(ScoutConfig::from_toml("[recommend]\nwindow_hours = 0.0\n").is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(ScoutConfig::from_toml("[geolocation]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = ScoutConfig::from_toml("{{invalid}}");
        assert!(matches!(result, Err(ScoutError::Toml(_))));
    }
}
