//! Aggregation of project statistics across neighboring offsets.
//!
//! The neighborhood of a target offset is every other bucket whose offset
//! lies within a fixed window (±2 hours by default) of it. The target bucket
//! itself is never part of its own neighborhood.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tzscout_core::{OffsetKey, ScoutError, MAX_WINDOW_HOURS};

use crate::store::{DemographicRecord, LocationStore, ProjectCount};

/// Default neighborhood radius in hours.
pub const DEFAULT_WINDOW_HOURS: f64 = 2.0;

/// Inclusive radius around a target offset, kept in whole minutes.
///
/// # Examples
///
/// ```
/// use tzscout_stats::neighborhood::NeighborWindow;
///
/// let window = NeighborWindow::default();
/// assert_eq!(window.minutes(), 120);
/// assert_eq!(NeighborWindow::from_hours(1.5).unwrap().minutes(), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborWindow {
    minutes: i32,
}

impl NeighborWindow {
    /// Window of `hours` either side of the target.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] for radii outside `0..=MAX_WINDOW_HOURS`.
    pub fn from_hours(hours: f64) -> Result<Self, ScoutError> {
        if !hours.is_finite() || !(0.0..=MAX_WINDOW_HOURS).contains(&hours) {
            return Err(ScoutError::Config(format!(
                "neighborhood window must be between 0 and {MAX_WINDOW_HOURS} hours, got {hours}"
            )));
        }
        Ok(Self {
            minutes: (hours * 60.0).round() as i32,
        })
    }

    /// Radius in minutes.
    pub fn minutes(self) -> i32 {
        self.minutes
    }

    /// Radius in hours.
    pub fn hours(self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    /// Whether `candidate` is a neighbor of `target`: inside the window and
    /// not the target itself.
    pub fn is_neighbor(self, target: OffsetKey, candidate: OffsetKey) -> bool {
        candidate != target && target.distance_minutes(candidate) <= self.minutes
    }
}

impl Default for NeighborWindow {
    fn default() -> Self {
        Self {
            minutes: (DEFAULT_WINDOW_HOURS * 60.0) as i32,
        }
    }
}

/// Neighbors of `target` among `offsets`, in the order given.
pub fn neighbor_offsets(
    offsets: impl IntoIterator<Item = OffsetKey>,
    target: OffsetKey,
    window: NeighborWindow,
) -> Vec<OffsetKey> {
    offsets
        .into_iter()
        .filter(|&candidate| window.is_neighbor(target, candidate))
        .collect()
}

/// Ordered per-project contributor counter.
///
/// Projects keep the position of their first appearance, so ranking with a
/// stable sort breaks ties by insertion order.
///
/// # Examples
///
/// ```
/// use tzscout_stats::neighborhood::ContributorTally;
///
/// let mut tally = ContributorTally::new();
/// tally.add("a", 2);
/// tally.add("b", 5);
/// tally.add("a", 4);
/// let ranked = tally.into_ranked();
/// assert_eq!(ranked[0].project_url, "a");
/// assert_eq!(ranked[0].contributor_count, 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContributorTally {
    entries: Vec<ProjectCount>,
    positions: HashMap<String, usize>,
}

impl ContributorTally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` contributors to `project_url`.
    pub fn add(&mut self, project_url: &str, count: u64) {
        match self.positions.get(project_url) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.contributor_count = entry.contributor_count.saturating_add(count);
            }
            None => {
                self.positions
                    .insert(project_url.to_string(), self.entries.len());
                self.entries.push(ProjectCount::new(project_url, count));
            }
        }
    }

    /// Add every entry of a bucket.
    pub fn add_all(&mut self, projects: &[ProjectCount]) {
        for project in projects {
            self.add(&project.project_url, project.contributor_count);
        }
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &ContributorTally) {
        self.add_all(&other.entries);
    }

    /// Current count for `project_url`.
    pub fn get(&self, project_url: &str) -> Option<u64> {
        self.positions
            .get(project_url)
            .map(|&i| self.entries[i].contributor_count)
    }

    /// Number of distinct projects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by count, descending; ties keep insertion order.
    pub fn into_ranked(self) -> Vec<ProjectCount> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.contributor_count.cmp(&a.contributor_count));
        entries
    }
}

/// Projects of the target bucket alone, ranked by contributor count.
///
/// Empty if the store has no bucket for `target`.
pub fn primary_bucket(store: &LocationStore, target: OffsetKey) -> Vec<ProjectCount> {
    let mut tally = ContributorTally::new();
    if let Some(projects) = store.get(&target) {
        tally.add_all(projects);
    }
    tally.into_ranked()
}

/// Projects of all neighbor buckets of `target`, counts summed per project
/// URL and ranked by the sum.
///
/// # Examples
///
/// ```
/// use tzscout_stats::neighborhood::{aggregate_neighborhood, NeighborWindow};
/// use tzscout_stats::store::LocationStore;
///
/// let store = LocationStore::from_json_str(
///     r#"{"0": {"p1": 10, "p2": 5}, "1": {"p1": 3}, "5": {"p2": 100}}"#,
/// ).unwrap();
/// let nearby = aggregate_neighborhood(&store, "0".parse().unwrap(), NeighborWindow::default());
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].project_url, "p1");
/// assert_eq!(nearby[0].contributor_count, 3);
/// ```
pub fn aggregate_neighborhood(
    store: &LocationStore,
    target: OffsetKey,
    window: NeighborWindow,
) -> Vec<ProjectCount> {
    let mut tally = ContributorTally::new();
    let mut merged = Vec::new();
    for (offset, projects) in store.buckets() {
        if window.is_neighbor(target, offset) {
            tally.add_all(projects);
            merged.push(offset);
        }
    }
    tracing::debug!(
        offset = %target,
        window_minutes = window.minutes(),
        neighbors = ?merged.iter().map(ToString::to_string).collect::<Vec<_>>(),
        projects = tally.len(),
        "aggregated neighborhood"
    );
    tally.into_ranked()
}

/// How neighbor buckets of the demographic dataset are combined.
///
/// The location dataset always sums per project. Demographic neighbors
/// default to concatenating each bucket's own top-N; summing per project is
/// the alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborMerge {
    /// Take each neighbor's top-N, concatenate, then sort by count.
    /// A project can appear once per neighbor bucket.
    #[default]
    ConcatTopN,
    /// Merge records by project URL, summing the offset-scoped counts.
    SumByProject,
}

impl fmt::Display for NeighborMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeighborMerge::ConcatTopN => write!(f, "concat"),
            NeighborMerge::SumByProject => write!(f, "sum"),
        }
    }
}

impl FromStr for NeighborMerge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concat" | "concat-top-n" => Ok(NeighborMerge::ConcatTopN),
            "sum" | "sum-by-project" => Ok(NeighborMerge::SumByProject),
            other => Err(format!("unknown merge policy: {other}")),
        }
    }
}

/// Combine per-neighbor record lists under `policy`, then sort by
/// `count_tz_gender` descending (stable).
///
/// `top_n` limits each neighbor's contribution under
/// [`NeighborMerge::ConcatTopN`]; it is ignored when summing.
///
/// # Examples
///
/// ```
/// use tzscout_stats::neighborhood::{merge_demographic, NeighborMerge};
/// use tzscout_stats::store::DemographicRecord;
///
/// let a: Vec<DemographicRecord> =
///     serde_json::from_str(r#"[["p", 3, 5, 9, 9, 1.0, 1.0]]"#).unwrap();
/// let b: Vec<DemographicRecord> =
///     serde_json::from_str(r#"[["p", 4, 6, 9, 9, 1.0, 1.0]]"#).unwrap();
///
/// let concat = merge_demographic(vec![a.clone(), b.clone()], NeighborMerge::ConcatTopN, 5);
/// assert_eq!(concat.len(), 2);
///
/// let summed = merge_demographic(vec![a, b], NeighborMerge::SumByProject, 5);
/// assert_eq!(summed.len(), 1);
/// assert_eq!(summed[0].count_tz_gender, 7);
/// ```
pub fn merge_demographic(
    neighbor_lists: Vec<Vec<DemographicRecord>>,
    policy: NeighborMerge,
    top_n: usize,
) -> Vec<DemographicRecord> {
    let mut merged: Vec<DemographicRecord> = match policy {
        NeighborMerge::ConcatTopN => neighbor_lists
            .into_iter()
            .flat_map(|list| list.into_iter().take(top_n))
            .collect(),
        NeighborMerge::SumByProject => {
            let mut positions: HashMap<String, usize> = HashMap::new();
            let mut merged: Vec<DemographicRecord> = Vec::new();
            for record in neighbor_lists.into_iter().flatten() {
                match positions.get(&record.project_url) {
                    Some(&i) => {
                        let existing = &mut merged[i];
                        existing.count_tz_gender =
                            existing.count_tz_gender.saturating_add(record.count_tz_gender);
                        existing.count_tz_all_genders = existing
                            .count_tz_all_genders
                            .saturating_add(record.count_tz_all_genders);
                    }
                    None => {
                        positions.insert(record.project_url.clone(), merged.len());
                        merged.push(record);
                    }
                }
            }
            merged
        }
    };
    merged.sort_by(|a, b| b.count_tz_gender.cmp(&a.count_tz_gender));
    merged
}
