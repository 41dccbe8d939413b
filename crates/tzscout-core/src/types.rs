use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoutError;
use crate::offset::OffsetKey;

/// JSON key of the worldwide pseudo-bucket in demographic datasets.
pub const GLOBAL_BUCKET_KEY: &str = "global";

/// Key of a statistics bucket: a real UTC offset or the worldwide aggregate.
///
/// The reserved `"global"` key parses to [`BucketKey::Global`]; every other
/// key must be a numeric offset.
///
/// # Examples
///
/// ```
/// use tzscout_core::BucketKey;
///
/// assert_eq!("global".parse::<BucketKey>().unwrap(), BucketKey::Global);
/// assert!(matches!("5.5".parse::<BucketKey>().unwrap(), BucketKey::Offset(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    /// Statistics for a single UTC offset.
    Offset(OffsetKey),
    /// Statistics aggregated across all offsets.
    Global,
}

impl BucketKey {
    /// The offset of a real bucket, `None` for the global aggregate.
    pub fn offset(self) -> Option<OffsetKey> {
        match self {
            BucketKey::Offset(key) => Some(key),
            BucketKey::Global => None,
        }
    }
}

impl From<OffsetKey> for BucketKey {
    fn from(key: OffsetKey) -> Self {
        BucketKey::Offset(key)
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Offset(key) => write!(f, "{key}"),
            BucketKey::Global => write!(f, "{GLOBAL_BUCKET_KEY}"),
        }
    }
}

impl FromStr for BucketKey {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(GLOBAL_BUCKET_KEY) {
            Ok(BucketKey::Global)
        } else {
            s.parse().map(BucketKey::Offset)
        }
    }
}

/// Gender slice of the demographic statistics.
///
/// # Examples
///
/// ```
/// use tzscout_core::GenderTag;
///
/// assert_eq!("female".parse::<GenderTag>().unwrap(), GenderTag::Female);
/// assert_eq!(GenderTag::All.to_string(), "all");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderTag {
    /// Contributors recorded as male.
    Male,
    /// Contributors recorded as female.
    Female,
    /// All contributors regardless of gender.
    #[default]
    All,
}

impl fmt::Display for GenderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderTag::Male => write!(f, "male"),
            GenderTag::Female => write!(f, "female"),
            GenderTag::All => write!(f, "all"),
        }
    }
}

impl FromStr for GenderTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(GenderTag::Male),
            "female" => Ok(GenderTag::Female),
            "all" => Ok(GenderTag::All),
            other => Err(format!("unknown gender tag: {other}")),
        }
    }
}

/// Output format for CLI results.
///
/// # Examples
///
/// ```
/// use tzscout_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and summaries.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown tables with linked project URLs.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
