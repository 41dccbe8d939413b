//! Read-only views over the precomputed per-offset statistics files.
//!
//! Two dataset shapes are supported:
//! - location: `{ "<offset>": { "<projectURL>": <count> } }`
//! - demographic: `{ "<offset>" | "global": { "male"|"female"|"all": [record, ..] } }`
//!
//! Both keep the file's key order, which later acts as the tie-break for
//! equal contributor counts.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tzscout_core::{BucketKey, GenderTag, OffsetKey, ScoutError};

use crate::diversity::female_percent;

/// Contributor count for one project inside a bucket.
///
/// # Examples
///
/// ```
/// use tzscout_stats::store::ProjectCount;
///
/// let entry = ProjectCount::new("https://github.com/rust-lang/rust", 42);
/// assert_eq!(entry.contributor_count, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCount {
    /// Project URL.
    pub project_url: String,
    /// Number of distinct contributors.
    pub contributor_count: u64,
}

impl ProjectCount {
    /// Convenience constructor.
    pub fn new(project_url: impl Into<String>, contributor_count: u64) -> Self {
        Self {
            project_url: project_url.into(),
            contributor_count,
        }
    }
}

/// Offset → project → contributor count statistics.
///
/// # Examples
///
/// ```
/// use tzscout_stats::store::LocationStore;
///
/// let store = LocationStore::from_json_str(r#"{"0": {"p1": 10}, "5.5": {"p2": 3}}"#).unwrap();
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.get(&"5.5".parse().unwrap()).unwrap()[0].project_url, "p2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    buckets: Vec<(OffsetKey, Vec<ProjectCount>)>,
    index: HashMap<OffsetKey, usize>,
}

impl LocationStore {
    /// Load a location dataset from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Load`] if the file cannot be read and
    /// [`ScoutError::Serialization`] / [`ScoutError::Parse`] if its content
    /// does not have the expected shape.
    pub fn load(path: &Path) -> Result<Self, ScoutError> {
        let content = read_dataset(path)?;
        let store = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            buckets = store.len(),
            "loaded location dataset"
        );
        Ok(store)
    }

    /// Parse a location dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Serialization`] for invalid JSON and
    /// [`ScoutError::Parse`] for a bad key or a count that is not a
    /// non-negative integer.
    pub fn from_json_str(content: &str) -> Result<Self, ScoutError> {
        let root = top_level_object(content)?;

        let mut store = Self::default();
        for (raw_key, bucket) in root {
            let key: OffsetKey = raw_key
                .parse()
                .map_err(|e| ScoutError::Parse(format!("bucket key '{raw_key}': {e}")))?;

            let Value::Object(projects) = bucket else {
                return Err(ScoutError::Parse(format!(
                    "bucket '{raw_key}' must map project URLs to counts"
                )));
            };

            let mut entries = Vec::with_capacity(projects.len());
            for (url, count) in projects {
                let count = count.as_u64().ok_or_else(|| {
                    ScoutError::Parse(format!(
                        "count for '{url}' in bucket '{raw_key}' must be a non-negative integer"
                    ))
                })?;
                entries.push(ProjectCount::new(url, count));
            }

            if store.index.insert(key, store.buckets.len()).is_some() {
                return Err(ScoutError::Parse(format!(
                    "bucket '{raw_key}' duplicates offset {key}"
                )));
            }
            store.buckets.push((key, entries));
        }
        Ok(store)
    }

    /// Projects recorded for `key`, in file order. `None` if no project was
    /// recorded for that offset.
    pub fn get(&self, key: &OffsetKey) -> Option<&[ProjectCount]> {
        self.index
            .get(key)
            .map(|&i| self.buckets[i].1.as_slice())
    }

    /// Whether any project was recorded for `key`.
    pub fn contains(&self, key: &OffsetKey) -> bool {
        self.index.contains_key(key)
    }

    /// Offsets in file order.
    pub fn offsets(&self) -> impl Iterator<Item = OffsetKey> + '_ {
        self.buckets.iter().map(|(key, _)| *key)
    }

    /// Offsets in ascending numeric order.
    pub fn sorted_offsets(&self) -> Vec<OffsetKey> {
        let mut keys: Vec<OffsetKey> = self.offsets().collect();
        keys.sort();
        keys
    }

    /// Buckets with their projects, in file order.
    pub fn buckets(&self) -> impl Iterator<Item = (OffsetKey, &[ProjectCount])> + '_ {
        self.buckets
            .iter()
            .map(|(key, projects)| (*key, projects.as_slice()))
    }

    /// Number of offset buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the dataset has no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// A stored male:female contributor ratio.
///
/// `NoFemale` is the sentinel for "no female developers recorded"; it behaves
/// as an infinite ratio and reports 0% female. `Unknown` covers missing and
/// non-numeric values, which the diversity filter always excludes.
///
/// # Examples
///
/// ```
/// use tzscout_stats::store::MaleFemaleRatio;
///
/// assert_eq!(MaleFemaleRatio::Finite(1.0).female_percent(), Some(50.0));
/// assert_eq!(MaleFemaleRatio::NoFemale.female_percent(), Some(0.0));
/// assert_eq!(MaleFemaleRatio::Unknown.female_percent(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MaleFemaleRatio {
    /// A finite, non-negative ratio.
    Finite(f64),
    /// No female contributors recorded.
    NoFemale,
    /// Missing or unreadable value.
    #[default]
    Unknown,
}

impl MaleFemaleRatio {
    /// Interpret a raw JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::Unknown, Self::from_f64),
            Value::String(s) => {
                let s = s.trim();
                if ["inf", "+inf", "infinity", "+infinity"]
                    .iter()
                    .any(|token| s.eq_ignore_ascii_case(token))
                {
                    Self::NoFemale
                } else {
                    s.parse::<f64>().map_or(Self::Unknown, Self::from_f64)
                }
            }
            _ => Self::Unknown,
        }
    }

    fn from_f64(ratio: f64) -> Self {
        if ratio.is_nan() || ratio < 0.0 {
            Self::Unknown
        } else if ratio.is_infinite() {
            Self::NoFemale
        } else {
            Self::Finite(ratio)
        }
    }

    /// Numeric ratio, with `NoFemale` as positive infinity.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Finite(r) => Some(r),
            Self::NoFemale => Some(f64::INFINITY),
            Self::Unknown => None,
        }
    }

    /// Female share of contributors in percent.
    pub fn female_percent(self) -> Option<f64> {
        self.value().map(female_percent)
    }
}

impl<'de> Deserialize<'de> for MaleFemaleRatio {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for MaleFemaleRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Finite(r) => serializer.serialize_f64(*r),
            Self::NoFemale => serializer.serialize_str("inf"),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

/// One project row of the demographic dataset.
///
/// On disk this is either a 7-element array in field order or an object with
/// the snake_case field names.
///
/// # Examples
///
/// ```
/// use tzscout_stats::store::{DemographicRecord, MaleFemaleRatio};
///
/// let record: DemographicRecord =
///     serde_json::from_str(r#"["https://example.com/p", 4, 10, 40, 100, 1.5, "inf"]"#).unwrap();
/// assert_eq!(record.count_tz_all_genders, 10);
/// assert_eq!(record.female_ratio_global, MaleFemaleRatio::NoFemale);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
#[serde(rename_all = "camelCase")]
pub struct DemographicRecord {
    /// Project URL.
    pub project_url: String,
    /// Contributors of the selected gender in this offset.
    pub count_tz_gender: u64,
    /// Contributors of any gender in this offset.
    pub count_tz_all_genders: u64,
    /// Contributors of the selected gender worldwide.
    pub count_global_gender: u64,
    /// Contributors of any gender worldwide.
    pub count_global_all_genders: u64,
    /// Male:female ratio among this offset's contributors.
    pub female_ratio_local: MaleFemaleRatio,
    /// Male:female ratio among all contributors.
    pub female_ratio_global: MaleFemaleRatio,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Tuple(String, u64, u64, u64, u64, MaleFemaleRatio, MaleFemaleRatio),
    Object {
        project_url: String,
        count_tz_gender: u64,
        count_tz_all_genders: u64,
        count_global_gender: u64,
        count_global_all_genders: u64,
        #[serde(default)]
        female_ratio_local: MaleFemaleRatio,
        #[serde(default)]
        female_ratio_global: MaleFemaleRatio,
    },
}

impl From<RawRecord> for DemographicRecord {
    fn from(raw: RawRecord) -> Self {
        match raw {
            RawRecord::Tuple(url, tz_gender, tz_all, global_gender, global_all, local, global) => {
                Self {
                    project_url: url,
                    count_tz_gender: tz_gender,
                    count_tz_all_genders: tz_all,
                    count_global_gender: global_gender,
                    count_global_all_genders: global_all,
                    female_ratio_local: local,
                    female_ratio_global: global,
                }
            }
            RawRecord::Object {
                project_url,
                count_tz_gender,
                count_tz_all_genders,
                count_global_gender,
                count_global_all_genders,
                female_ratio_local,
                female_ratio_global,
            } => Self {
                project_url,
                count_tz_gender,
                count_tz_all_genders,
                count_global_gender,
                count_global_all_genders,
                female_ratio_local,
                female_ratio_global,
            },
        }
    }
}

type GenderSlices = HashMap<GenderTag, Vec<DemographicRecord>>;

/// Offset (or global) → gender → ranked project records.
#[derive(Debug, Clone, Default)]
pub struct DemographicStore {
    buckets: Vec<(BucketKey, GenderSlices)>,
    index: HashMap<BucketKey, usize>,
}

impl DemographicStore {
    /// Load a demographic dataset from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Load`] if the file cannot be read and
    /// [`ScoutError::Serialization`] / [`ScoutError::Parse`] if its content
    /// does not have the expected shape.
    pub fn load(path: &Path) -> Result<Self, ScoutError> {
        let content = read_dataset(path)?;
        let store = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            buckets = store.buckets.len(),
            has_global = store.index.contains_key(&BucketKey::Global),
            "loaded demographic dataset"
        );
        Ok(store)
    }

    /// Parse a demographic dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Serialization`] for invalid JSON and
    /// [`ScoutError::Parse`] for bad keys, unknown gender tags or records
    /// that are neither 7-element arrays nor record objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use tzscout_core::{BucketKey, GenderTag};
    /// use tzscout_stats::store::DemographicStore;
    ///
    /// let store = DemographicStore::from_json_str(r#"{
    ///     "global": {"all": [["p1", 9, 9, 9, 9, 2.0, 2.0]]},
    ///     "1": {"female": [["p1", 1, 3, 3, 9, 2.0, 2.0]]}
    /// }"#).unwrap();
    /// assert_eq!(store.global(GenderTag::All).unwrap().len(), 1);
    /// assert!(store.records(&BucketKey::Offset("1".parse().unwrap()), GenderTag::Male).is_none());
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, ScoutError> {
        let root = top_level_object(content)?;

        let mut store = Self::default();
        for (raw_key, bucket) in root {
            let key: BucketKey = raw_key
                .parse()
                .map_err(|e| ScoutError::Parse(format!("bucket key '{raw_key}': {e}")))?;

            let Value::Object(genders) = bucket else {
                return Err(ScoutError::Parse(format!(
                    "bucket '{raw_key}' must map gender tags to record lists"
                )));
            };

            let mut slices = GenderSlices::new();
            for (raw_tag, records) in genders {
                let tag: GenderTag = raw_tag
                    .parse()
                    .map_err(|e| ScoutError::Parse(format!("bucket '{raw_key}': {e}")))?;
                let records: Vec<DemographicRecord> =
                    serde_json::from_value(records).map_err(|e| {
                        ScoutError::Parse(format!(
                            "records for '{raw_tag}' in bucket '{raw_key}': {e}"
                        ))
                    })?;
                slices.insert(tag, records);
            }

            if store.index.insert(key, store.buckets.len()).is_some() {
                return Err(ScoutError::Parse(format!(
                    "bucket '{raw_key}' duplicates bucket {key}"
                )));
            }
            store.buckets.push((key, slices));
        }
        Ok(store)
    }

    /// Ranked records for one bucket and gender.
    pub fn records(&self, key: &BucketKey, gender: GenderTag) -> Option<&[DemographicRecord]> {
        self.index
            .get(key)
            .and_then(|&i| self.buckets[i].1.get(&gender))
            .map(Vec::as_slice)
    }

    /// Worldwide records for `gender`.
    pub fn global(&self, gender: GenderTag) -> Option<&[DemographicRecord]> {
        self.records(&BucketKey::Global, gender)
    }

    /// Whether a real offset bucket exists for `key`.
    pub fn contains(&self, key: &OffsetKey) -> bool {
        self.index.contains_key(&BucketKey::Offset(*key))
    }

    /// Real offsets in file order; the global bucket is skipped.
    pub fn offsets(&self) -> impl Iterator<Item = OffsetKey> + '_ {
        self.buckets.iter().filter_map(|(key, _)| key.offset())
    }

    /// Real offsets in ascending numeric order.
    pub fn sorted_offsets(&self) -> Vec<OffsetKey> {
        let mut keys: Vec<OffsetKey> = self.offsets().collect();
        keys.sort();
        keys
    }

    /// Number of buckets, including the global one.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether the dataset has no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn read_dataset(path: &Path) -> Result<String, ScoutError> {
    std::fs::read_to_string(path).map_err(|source| ScoutError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Quote the bare `Infinity`, `-Infinity` and `NaN` literals that Python's
/// `json.dump` emits for non-finite floats, so they parse as strings and go
/// through the same ratio handling as `"inf"`. String contents are untouched.
fn quote_non_finite_literals(content: &str) -> Cow<'_, str> {
    if !content.contains("Infinity") && !content.contains("NaN") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len() + 16);
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = content;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = ["-Infinity", "Infinity", "NaN"]
            .into_iter()
            .find(|token| rest.starts_with(token))
        {
            out.push('"');
            out.push_str(token);
            out.push('"');
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(out)
}

fn top_level_object(content: &str) -> Result<serde_json::Map<String, Value>, ScoutError> {
    let content = quote_non_finite_literals(content);
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(ScoutError::Parse(
            "dataset must be a JSON object keyed by UTC offset".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> OffsetKey {
        s.parse().unwrap()
    }

    #[test]
    fn location_store_keeps_file_order() {
        let store = LocationStore::from_json_str(
            r#"{"5.5": {"b": 1, "a": 2}, "-3": {"c": 7}, "0": {"d": 1}}"#,
        )
        .unwrap();
        let offsets: Vec<String> = store.offsets().map(|k| k.to_string()).collect();
        assert_eq!(offsets, vec!["5.5", "-3", "0"]);

        let urls: Vec<&str> = store
            .get(&key("5.5"))
            .unwrap()
            .iter()
            .map(|p| p.project_url.as_str())
            .collect();
        assert_eq!(urls, vec!["b", "a"]);
    }

    #[test]
    fn sorted_offsets_are_numeric() {
        let store =
            LocationStore::from_json_str(r#"{"5.5": {}, "-10": {}, "-3.5": {}, "10": {}}"#)
                .unwrap();
        let sorted: Vec<String> = store.sorted_offsets().iter().map(|k| k.to_string()).collect();
        assert_eq!(sorted, vec!["-10", "-3.5", "5.5", "10"]);
    }

    #[test]
    fn lookup_matches_equivalent_spelling() {
        let store = LocationStore::from_json_str(r#"{"-3.0": {"p": 1}}"#).unwrap();
        assert!(store.contains(&key("-3")));
        assert!(store.get(&key("4")).is_none());
    }

    #[test]
    fn location_store_rejects_bad_shapes() {
        assert!(matches!(
            LocationStore::from_json_str("[1, 2]"),
            Err(ScoutError::Parse(_))
        ));
        assert!(matches!(
            LocationStore::from_json_str("not json"),
            Err(ScoutError::Serialization(_))
        ));
        assert!(LocationStore::from_json_str(r#"{"abc": {}}"#).is_err());
        assert!(LocationStore::from_json_str(r#"{"1": [1]}"#).is_err());
        assert!(LocationStore::from_json_str(r#"{"1": {"p": -4}}"#).is_err());
        assert!(LocationStore::from_json_str(r#"{"1": {"p": 1.5}}"#).is_err());
        assert!(LocationStore::from_json_str(r#"{"1": {"p": "3"}}"#).is_err());
    }

    #[test]
    fn duplicate_offsets_are_rejected() {
        let err = LocationStore::from_json_str(r#"{"-3": {}, "-3.0": {}}"#).unwrap_err();
        assert!(err.to_string().contains("duplicates"));
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = LocationStore::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ScoutError::Load { .. }));
    }

    #[test]
    fn ratio_parsing_covers_sentinels() {
        use serde_json::json;
        assert_eq!(MaleFemaleRatio::from_json(&json!(2.5)), MaleFemaleRatio::Finite(2.5));
        assert_eq!(MaleFemaleRatio::from_json(&json!(0)), MaleFemaleRatio::Finite(0.0));
        assert_eq!(MaleFemaleRatio::from_json(&json!("inf")), MaleFemaleRatio::NoFemale);
        assert_eq!(MaleFemaleRatio::from_json(&json!("Infinity")), MaleFemaleRatio::NoFemale);
        assert_eq!(MaleFemaleRatio::from_json(&json!("0.5")), MaleFemaleRatio::Finite(0.5));
        assert_eq!(MaleFemaleRatio::from_json(&json!("n/a")), MaleFemaleRatio::Unknown);
        assert_eq!(MaleFemaleRatio::from_json(&json!(null)), MaleFemaleRatio::Unknown);
        assert_eq!(MaleFemaleRatio::from_json(&json!(-1.0)), MaleFemaleRatio::Unknown);
        assert_eq!(MaleFemaleRatio::from_json(&json!([1])), MaleFemaleRatio::Unknown);
    }

    #[test]
    fn demographic_records_accept_array_and_object_form() {
        let store = DemographicStore::from_json_str(
            r#"{
                "5.5": {
                    "female": [
                        ["https://a", 3, 10, 30, 100, 2.333, 2.333],
                        {"project_url": "https://b", "count_tz_gender": 2,
                         "count_tz_all_genders": 4, "count_global_gender": 5,
                         "count_global_all_genders": 8}
                    ]
                }
            }"#,
        )
        .unwrap();

        let records = store
            .records(&BucketKey::Offset(key("5.5")), GenderTag::Female)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].project_url, "https://a");
        assert_eq!(records[0].female_ratio_local, MaleFemaleRatio::Finite(2.333));
        assert_eq!(records[1].female_ratio_local, MaleFemaleRatio::Unknown);
        assert_eq!(records[1].count_global_all_genders, 8);
    }

    #[test]
    fn bare_non_finite_ratios_load() {
        let store = DemographicStore::from_json_str(
            r#"{"1": {"female": [
                ["p", 1, 2, 3, 4, Infinity, 1.0],
                ["q", 1, 2, 3, 4, NaN, -Infinity],
                ["NaN Infinity \" NaN", 1, 2, 3, 4, 0.5, 0.5]
            ]}}"#,
        )
        .unwrap();
        let records = store
            .records(&BucketKey::Offset(key("1")), GenderTag::Female)
            .unwrap();
        assert_eq!(records[0].female_ratio_local, MaleFemaleRatio::NoFemale);
        assert_eq!(records[0].female_ratio_local.female_percent(), Some(0.0));
        assert_eq!(records[1].female_ratio_local, MaleFemaleRatio::Unknown);
        assert_eq!(records[1].female_ratio_global, MaleFemaleRatio::Unknown);
        assert_eq!(records[2].project_url, "NaN Infinity \" NaN");
    }

    #[test]
    fn non_finite_literals_inside_strings_are_kept() {
        assert_eq!(
            quote_non_finite_literals(r#"{"NaN": [Infinity, "a\"Infinity"]}"#),
            r#"{"NaN": ["Infinity", "a\"Infinity"]}"#
        );
        assert!(matches!(
            quote_non_finite_literals(r#"{"1": {"p": 3}}"#),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn global_bucket_is_not_an_offset() {
        let store = DemographicStore::from_json_str(
            r#"{"global": {"all": []}, "-9.5": {"all": []}, "2": {"male": []}}"#,
        )
        .unwrap();
        assert_eq!(store.len(), 3);
        let offsets: Vec<String> = store.offsets().map(|k| k.to_string()).collect();
        assert_eq!(offsets, vec!["-9.5", "2"]);
        assert!(store.global(GenderTag::All).is_some());
        assert!(store.global(GenderTag::Female).is_none());
    }

    #[test]
    fn demographic_store_rejects_unknown_gender_and_short_records() {
        assert!(DemographicStore::from_json_str(r#"{"1": {"other": []}}"#).is_err());
        let err =
            DemographicStore::from_json_str(r#"{"1": {"all": [["p", 1, 2]]}}"#).unwrap_err();
        assert!(err.to_string().contains("bucket '1'"));
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = DemographicRecord {
            project_url: "p".into(),
            count_tz_gender: 1,
            count_tz_all_genders: 2,
            count_global_gender: 3,
            count_global_all_genders: 4,
            female_ratio_local: MaleFemaleRatio::NoFemale,
            female_ratio_global: MaleFemaleRatio::Unknown,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["projectUrl"], "p");
        assert_eq!(json["femaleRatioLocal"], "inf");
        assert!(json["femaleRatioGlobal"].is_null());
    }
}
