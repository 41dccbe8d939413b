use std::path::PathBuf;

/// Errors that can occur across tzscout.
///
/// Library crates return this type directly; the binary turns it into a
/// `miette` report at the boundary.
///
/// # Examples
///
/// ```
/// use tzscout_core::ScoutError;
///
/// let err = ScoutError::InvalidOffset("UTC+99".into());
/// assert!(err.to_string().contains("UTC+99"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScoutError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A dataset file could not be read.
    #[error("failed to load dataset {}", path.display())]
    #[diagnostic(
        code(tzscout::load),
        help("check the [data] section of .tzscout.toml or pass --data")
    )]
    Load {
        /// Path of the dataset that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Dataset content does not match the expected shape.
    #[error("malformed dataset: {0}")]
    #[diagnostic(code(tzscout::parse))]
    Parse(String),

    /// A UTC offset key or display string could not be understood.
    #[error("invalid UTC offset: {0}")]
    #[diagnostic(
        code(tzscout::offset),
        help("use the form UTC+5:30 or UTC-3:00; run 'tzscout zones' to list known offsets")
    )]
    InvalidOffset(String),

    /// Female-percentage bounds that cannot form a filter range.
    #[error("invalid diversity range: {0}")]
    #[diagnostic(code(tzscout::range), help("use LO-HI with 0 <= LO <= HI <= 100 and HI > 0"))]
    InvalidRange(String),

    /// Requested number of recommendations is outside the supported range.
    #[error("recommendation count must be between 1 and 20, got {0}")]
    InvalidCount(usize),

    /// Geolocation or time-zone resolution failed.
    #[error("location lookup failed: {0}")]
    Lookup(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
