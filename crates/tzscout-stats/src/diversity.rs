//! Gender-diversity filtering over demographic records.
//!
//! Records store a male:female ratio `r`; the female share is
//! `100 / (1 + r)`. A female-percentage range `[lo, hi]` is turned into the
//! equivalent ratio range `[(100 - hi) / hi, (100 - lo) / lo]` once, and
//! records are tested against that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tzscout_core::ScoutError;

use crate::store::{DemographicRecord, MaleFemaleRatio};

/// Female share in percent for a male:female ratio.
///
/// An infinite ratio (no female contributors) gives 0%.
///
/// # Examples
///
/// ```
/// use tzscout_stats::diversity::female_percent;
///
/// assert_eq!(female_percent(1.0), 50.0);
/// assert_eq!(female_percent(4.0), 20.0);
/// assert_eq!(female_percent(f64::INFINITY), 0.0);
/// ```
pub fn female_percent(ratio: f64) -> f64 {
    if ratio.is_infinite() {
        0.0
    } else {
        100.0 / (1.0 + ratio)
    }
}

/// Male:female ratio for a female share in percent. Inverse of
/// [`female_percent`]; 0% maps to an infinite ratio.
///
/// # Examples
///
/// ```
/// use tzscout_stats::diversity::ratio_for_female_percent;
///
/// assert_eq!(ratio_for_female_percent(50.0), 1.0);
/// assert_eq!(ratio_for_female_percent(10.0), 9.0);
/// assert!(ratio_for_female_percent(0.0).is_infinite());
/// ```
pub fn ratio_for_female_percent(percent: f64) -> f64 {
    if percent <= 0.0 {
        f64::INFINITY
    } else {
        (100.0 - percent) / percent
    }
}

/// Inclusive range of female-contributor percentages.
///
/// # Examples
///
/// ```
/// use tzscout_stats::diversity::DiversityRange;
///
/// let range: DiversityRange = "10-50".parse().unwrap();
/// assert_eq!(range.low(), 10.0);
/// assert_eq!(range.high(), 50.0);
/// assert!(DiversityRange::new(60.0, 40.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiversityRange {
    low: f64,
    high: f64,
}

impl DiversityRange {
    /// Build a range of female percentages.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidRange`] unless
    /// `0 <= low <= high <= 100` and `high > 0`.
    pub fn new(low: f64, high: f64) -> Result<Self, ScoutError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ScoutError::InvalidRange(format!(
                "bounds must be numbers, got {low}-{high}"
            )));
        }
        if low < 0.0 || high > 100.0 || low > high {
            return Err(ScoutError::InvalidRange(format!(
                "expected 0 <= low <= high <= 100, got {low}-{high}"
            )));
        }
        if high == 0.0 {
            return Err(ScoutError::InvalidRange(
                "upper bound must be above 0%".into(),
            ));
        }
        Ok(Self { low, high })
    }

    /// Lower female-percentage bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper female-percentage bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Equivalent bounds on the stored male:female ratio.
    pub fn ratio_bounds(&self) -> RatioBounds {
        RatioBounds {
            min: ratio_for_female_percent(self.high),
            max: ratio_for_female_percent(self.low),
        }
    }
}

impl fmt::Display for DiversityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}%", self.low, self.high)
    }
}

impl FromStr for DiversityRange {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScoutError::InvalidRange(format!("'{s}' is not of the form LO-HI"));
        let (low, high) = s.trim().trim_end_matches('%').split_once('-').ok_or_else(invalid)?;
        let low: f64 = low.trim().trim_end_matches('%').parse().map_err(|_| invalid())?;
        let high: f64 = high.trim().trim_end_matches('%').parse().map_err(|_| invalid())?;
        Self::new(low, high)
    }
}

/// Inclusive bounds on a male:female ratio. `max` may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    /// Smallest accepted ratio (from the upper percentage bound).
    pub min: f64,
    /// Largest accepted ratio (from the lower percentage bound).
    pub max: f64,
}

impl RatioBounds {
    /// Whether a stored ratio lies within the bounds. Unknown ratios never do;
    /// the no-female sentinel only passes when `max` is unbounded.
    pub fn contains(&self, ratio: MaleFemaleRatio) -> bool {
        match ratio.value() {
            Some(r) => self.min <= r && r <= self.max,
            None => false,
        }
    }
}

/// Which stored ratio a filter or display uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioScope {
    /// The ratio among contributors in the record's own offset.
    #[default]
    Local,
    /// The ratio among all contributors worldwide.
    Global,
}

impl RatioScope {
    /// Pick the ratio field for this scope.
    pub fn ratio_of(self, record: &DemographicRecord) -> MaleFemaleRatio {
        match self {
            RatioScope::Local => record.female_ratio_local,
            RatioScope::Global => record.female_ratio_global,
        }
    }
}

impl fmt::Display for RatioScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioScope::Local => write!(f, "local"),
            RatioScope::Global => write!(f, "global"),
        }
    }
}

impl FromStr for RatioScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(RatioScope::Local),
            "global" => Ok(RatioScope::Global),
            other => Err(format!("unknown ratio scope: {other}")),
        }
    }
}

/// Keep the records whose `scope` ratio falls inside `range`, preserving order.
///
/// # Examples
///
/// ```
/// use tzscout_stats::diversity::{filter_by_diversity, DiversityRange, RatioScope};
/// use tzscout_stats::store::{DemographicRecord, MaleFemaleRatio};
///
/// let record = DemographicRecord {
///     project_url: "p".into(),
///     count_tz_gender: 1,
///     count_tz_all_genders: 2,
///     count_global_gender: 1,
///     count_global_all_genders: 2,
///     female_ratio_local: MaleFemaleRatio::Finite(1.0),
///     female_ratio_global: MaleFemaleRatio::Finite(9.5),
/// };
/// let range = DiversityRange::new(10.0, 50.0).unwrap();
/// assert_eq!(filter_by_diversity(&[record.clone()], range, RatioScope::Local).len(), 1);
/// assert!(filter_by_diversity(&[record], range, RatioScope::Global).is_empty());
/// ```
pub fn filter_by_diversity(
    records: &[DemographicRecord],
    range: DiversityRange,
    scope: RatioScope,
) -> Vec<DemographicRecord> {
    let bounds = range.ratio_bounds();
    records
        .iter()
        .filter(|record| bounds.contains(scope.ratio_of(record)))
        .cloned()
        .collect()
}
