//! End-to-end recommendation reports.
//!
//! Each report is a pure function of a loaded store and the user's inputs.

use serde::Serialize;
use tzscout_core::{format_offset_display, BucketKey, GenderTag, OffsetKey};

use crate::diversity::{filter_by_diversity, DiversityRange, RatioScope};
use crate::neighborhood::{
    aggregate_neighborhood, merge_demographic, neighbor_offsets, primary_bucket, NeighborMerge,
    NeighborWindow,
};
use crate::store::{DemographicRecord, DemographicStore, LocationStore};
use crate::table::{
    build_table, location_table, DemographicEntry, DemographicRow, LocationRow,
    RecommendationCount,
};

/// Inputs shared by every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendOptions {
    /// Rows per table.
    pub count: RecommendationCount,
    /// Neighborhood radius.
    pub window: NeighborWindow,
}

/// Own-zone and nearby-zone tables from the location dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    /// Offset the report was built for.
    pub offset: OffsetKey,
    /// `UTC±H:MM` form of the offset.
    pub display: String,
    /// Offsets merged into the nearby table.
    pub nearby_offsets: Vec<OffsetKey>,
    /// Top projects in the offset itself.
    pub primary: Vec<LocationRow>,
    /// Top projects across the neighborhood.
    pub nearby: Vec<LocationRow>,
}

/// Build the location report for `target`.
///
/// Returns `None` when the dataset has no bucket for `target`; callers show
/// nothing for such an offset rather than an error.
///
/// # Examples
///
/// ```
/// use tzscout_stats::recommend::{recommend_location, RecommendOptions};
/// use tzscout_stats::store::LocationStore;
///
/// let store = LocationStore::from_json_str(r#"{"0": {"p1": 10}, "1": {"p1": 3}}"#).unwrap();
/// let report = recommend_location(&store, "0".parse().unwrap(), RecommendOptions::default()).unwrap();
/// assert_eq!(report.display, "UTC+0:00");
/// assert_eq!(report.nearby[0].row.contributor_count, 3);
/// assert!(recommend_location(&store, "9".parse().unwrap(), RecommendOptions::default()).is_none());
/// ```
pub fn recommend_location(
    store: &LocationStore,
    target: OffsetKey,
    options: RecommendOptions,
) -> Option<LocationReport> {
    if !store.contains(&target) {
        tracing::debug!(offset = %target, "no location bucket for offset");
        return None;
    }

    let primary = primary_bucket(store, target);
    let nearby = aggregate_neighborhood(store, target, options.window);

    Some(LocationReport {
        offset: target,
        display: format_offset_display(target),
        nearby_offsets: neighbor_offsets(store.offsets(), target, options.window),
        primary: location_table(&primary, options.count),
        nearby: location_table(&nearby, options.count),
    })
}

/// Inputs for the demographic report.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemographicOptions {
    /// Row count and neighborhood radius.
    pub base: RecommendOptions,
    /// Gender slice to read.
    pub gender: GenderTag,
    /// Optional female-percentage range.
    pub diversity: Option<DiversityRange>,
    /// Ratio used for filtering and display in the offset-scoped tables.
    pub scope: RatioScope,
    /// How neighbor buckets are combined.
    pub merge: NeighborMerge,
}

/// Own-zone, nearby-zone and worldwide tables from the demographic dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicReport {
    /// Offset the report was built for.
    pub offset: OffsetKey,
    /// `UTC±H:MM` form of the offset.
    pub display: String,
    /// Gender slice the counts refer to.
    pub gender: GenderTag,
    /// Female-percentage range applied, if any.
    pub diversity: Option<DiversityRange>,
    /// Ratio scope used by the offset-scoped tables.
    pub scope: RatioScope,
    /// Neighbor merge policy used.
    pub merge: NeighborMerge,
    /// Whether the dataset has a bucket for the offset.
    pub offset_known: bool,
    /// Top projects in the offset itself.
    pub primary: Vec<DemographicRow>,
    /// Top projects across the neighborhood.
    pub nearby: Vec<DemographicRow>,
    /// Top projects worldwide.
    pub global: Vec<DemographicRow>,
}

/// Build the demographic report for `target`.
///
/// An offset without a bucket yields empty own-zone and nearby tables; the
/// worldwide table is filled regardless.
pub fn recommend_demographic(
    store: &DemographicStore,
    target: OffsetKey,
    options: DemographicOptions,
) -> DemographicReport {
    let n = options.base.count.get();
    let narrow = |records: &[DemographicRecord], scope: RatioScope| -> Vec<DemographicRecord> {
        match options.diversity {
            Some(range) => filter_by_diversity(records, range, scope),
            None => records.to_vec(),
        }
    };

    let primary_records = store
        .records(&BucketKey::Offset(target), options.gender)
        .map(|records| narrow(records, options.scope))
        .unwrap_or_default();

    let offset_known = store.contains(&target);
    let neighbor_lists: Vec<Vec<DemographicRecord>> = if offset_known {
        neighbor_offsets(store.offsets(), target, options.base.window)
            .into_iter()
            .filter_map(|offset| store.records(&BucketKey::Offset(offset), options.gender))
            .map(|records| narrow(records, options.scope))
            .collect()
    } else {
        Vec::new()
    };
    tracing::debug!(
        offset = %target,
        gender = %options.gender,
        neighbors = neighbor_lists.len(),
        merge = %options.merge,
        "merging demographic neighborhood"
    );
    let nearby_records = merge_demographic(neighbor_lists, options.merge, n);

    let global_records = store
        .global(options.gender)
        .map(|records| narrow(records, RatioScope::Global))
        .unwrap_or_default();

    DemographicReport {
        offset: target,
        display: format_offset_display(target),
        gender: options.gender,
        diversity: options.diversity,
        scope: options.scope,
        merge: options.merge,
        offset_known,
        primary: build_table(
            primary_records
                .iter()
                .map(|r| DemographicEntry::local(r, options.scope)),
            n,
        ),
        nearby: build_table(
            nearby_records
                .iter()
                .map(|r| DemographicEntry::local(r, options.scope)),
            n,
        ),
        global: build_table(global_records.iter().map(DemographicEntry::global), n),
    }
}
