//! Ranked display tables.
//!
//! Tables never re-sort: the producer of the record list decides the order,
//! the table only truncates and numbers the rows.

use serde::Serialize;
use tzscout_core::{ScoutError, MAX_RECOMMENDATIONS, MIN_RECOMMENDATIONS};

use crate::diversity::RatioScope;
use crate::store::{DemographicRecord, ProjectCount};

/// Validated number of rows per table (1..=20).
///
/// # Examples
///
/// ```
/// use tzscout_stats::table::RecommendationCount;
///
/// assert_eq!(RecommendationCount::new(5).unwrap().get(), 5);
/// assert!(RecommendationCount::new(0).is_err());
/// assert!(RecommendationCount::new(21).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationCount(usize);

impl RecommendationCount {
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidCount`] outside 1..=20.
    pub fn new(n: usize) -> Result<Self, ScoutError> {
        if (MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&n) {
            Ok(Self(n))
        } else {
            Err(ScoutError::InvalidCount(n))
        }
    }

    /// The count.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for RecommendationCount {
    fn default() -> Self {
        Self(5)
    }
}

/// A row with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    /// Position in the table, starting at 1.
    pub rank: usize,
    /// Row content.
    #[serde(flatten)]
    pub row: T,
}

/// Take the first `n` items in their existing order and number them from 1.
///
/// # Examples
///
/// ```
/// use tzscout_stats::table::build_table;
///
/// let rows = build_table(["a", "b", "c"], 2);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].rank, 2);
/// assert_eq!(rows[1].row, "b");
/// ```
pub fn build_table<T>(records: impl IntoIterator<Item = T>, n: usize) -> Vec<Ranked<T>> {
    records
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, row)| Ranked { rank: i + 1, row })
        .collect()
}

/// Row of a location table.
pub type LocationRow = Ranked<ProjectCount>;

/// Rank location entries.
pub fn location_table(records: &[ProjectCount], n: RecommendationCount) -> Vec<LocationRow> {
    build_table(records.iter().cloned(), n.get())
}

/// Display content of a demographic table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicEntry {
    /// Project URL.
    pub project_url: String,
    /// Contributors of the selected gender.
    pub contributors: u64,
    /// Contributors of any gender.
    pub contributors_all_genders: u64,
    /// Female share in percent; `None` when the ratio is unknown.
    pub female_percent: Option<f64>,
}

impl DemographicEntry {
    /// Offset-scoped counts, with the female share taken from `scope`.
    pub fn local(record: &DemographicRecord, scope: RatioScope) -> Self {
        Self {
            project_url: record.project_url.clone(),
            contributors: record.count_tz_gender,
            contributors_all_genders: record.count_tz_all_genders,
            female_percent: scope.ratio_of(record).female_percent(),
        }
    }

    /// Worldwide counts and female share.
    pub fn global(record: &DemographicRecord) -> Self {
        Self {
            project_url: record.project_url.clone(),
            contributors: record.count_global_gender,
            contributors_all_genders: record.count_global_all_genders,
            female_percent: record.female_ratio_global.female_percent(),
        }
    }
}

/// Row of a demographic table.
pub type DemographicRow = Ranked<DemographicEntry>;

/// A column of a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// 1-based rank.
    Rank,
    /// Project URL, rendered as a link where the format allows.
    Project,
    /// Contributor count.
    Contributors,
}

/// Title, headings and column order of a location table.
///
/// # Examples
///
/// ```
/// use tzscout_stats::table::{Column, TableLabels};
///
/// let labels = TableLabels::own_zone();
/// assert_eq!(labels.columns.last(), Some(&Column::Rank));
/// assert_eq!(labels.heading(Column::Project), "Project Link");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLabels {
    /// Table title.
    pub title: String,
    /// Column order.
    pub columns: Vec<Column>,
    /// Heading of the project column.
    pub project_heading: String,
    /// Heading of the contributor column.
    pub count_heading: String,
    /// Heading of the rank column.
    pub rank_heading: String,
}

impl TableLabels {
    fn with_title(title: &str) -> Self {
        Self {
            title: title.into(),
            columns: vec![Column::Project, Column::Contributors, Column::Rank],
            project_heading: "Project Link".into(),
            count_heading: "Contributor Count".into(),
            rank_heading: "Rank".into(),
        }
    }

    /// Labels for projects in the user's own offset.
    pub fn own_zone() -> Self {
        Self::with_title("Projects in your time zone")
    }

    /// Labels for projects in neighboring offsets.
    pub fn nearby_zones() -> Self {
        Self::with_title("Projects in nearby time zones")
    }

    /// Labels for worldwide projects.
    pub fn worldwide() -> Self {
        Self::with_title("Projects worldwide")
    }

    /// Same labels with the rank column first.
    pub fn rank_first(mut self) -> Self {
        self.columns = vec![Column::Rank, Column::Project, Column::Contributors];
        self
    }

    /// Heading text for `column`.
    pub fn heading(&self, column: Column) -> &str {
        match column {
            Column::Rank => &self.rank_heading,
            Column::Project => &self.project_heading,
            Column::Contributors => &self.count_heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MaleFemaleRatio;

    fn entries(n: usize) -> Vec<ProjectCount> {
        (0..n)
            .map(|i| ProjectCount::new(format!("p{i}"), (100 - i) as u64))
            .collect()
    }

    #[test]
    fn twenty_requested_three_available() {
        let rows = location_table(&entries(3), RecommendationCount::new(20).unwrap());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn length_is_min_of_n_and_input_with_consecutive_ranks() {
        for available in [0, 1, 4, 20, 25] {
            for n in [1, 5, 20] {
                let input = entries(available);
                let rows = location_table(&input, RecommendationCount::new(n).unwrap());
                assert_eq!(rows.len(), n.min(available));
                for (i, row) in rows.iter().enumerate() {
                    assert_eq!(row.rank, i + 1);
                    assert_eq!(row.row, input[i]);
                }
            }
        }
    }

    #[test]
    fn does_not_resort() {
        let input = vec![ProjectCount::new("low", 1), ProjectCount::new("high", 99)];
        let rows = location_table(&input, RecommendationCount::default());
        assert_eq!(rows[0].row.project_url, "low");
        assert_eq!(rows[1].row.project_url, "high");
    }

    #[test]
    fn ranked_rows_serialize_flat() {
        let rows = location_table(&entries(1), RecommendationCount::default());
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["projectUrl"], "p0");
        assert_eq!(json["contributorCount"], 100);
    }

    #[test]
    fn demographic_entries_pick_scoped_fields() {
        let record = DemographicRecord {
            project_url: "p".into(),
            count_tz_gender: 2,
            count_tz_all_genders: 6,
            count_global_gender: 20,
            count_global_all_genders: 60,
            female_ratio_local: MaleFemaleRatio::Finite(3.0),
            female_ratio_global: MaleFemaleRatio::NoFemale,
        };
        let local = DemographicEntry::local(&record, RatioScope::Local);
        assert_eq!(local.contributors, 2);
        assert_eq!(local.female_percent, Some(25.0));

        let scoped_global = DemographicEntry::local(&record, RatioScope::Global);
        assert_eq!(scoped_global.contributors, 2);
        assert_eq!(scoped_global.female_percent, Some(0.0));

        let global = DemographicEntry::global(&record);
        assert_eq!(global.contributors_all_genders, 60);
        assert_eq!(global.female_percent, Some(0.0));
    }

    #[test]
    fn labels_can_put_rank_first() {
        let labels = TableLabels::nearby_zones().rank_first();
        assert_eq!(labels.columns[0], Column::Rank);
        assert_eq!(labels.title, "Projects in nearby time zones");
        assert_eq!(labels.heading(Column::Contributors), "Contributor Count");
    }
}
