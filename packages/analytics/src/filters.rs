//! Sidebar filters over the cluster table.
//!
//! The organization filter is a substring test on the raw comma-joined
//! field, so an organization whose name is contained in another's also
//! matches the longer one's clusters.

use complaint_map_analytics_models::ClusterFilter;
use complaint_map_cluster_models::ClusterRecord;

/// Sentinel the sidebar dropdowns use for "nothing selected".
pub const NO_SELECTION: &str = "-";

/// Normalizes a dropdown value: empty or [`NO_SELECTION`] become `None`.
#[must_use]
pub fn selection(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| {
            let v = v.trim();
            !v.is_empty() && v != NO_SELECTION
        })
        .map(str::to_string)
}

/// Whether a single row passes every active filter.
#[must_use]
pub fn matches(record: &ClusterRecord, filter: &ClusterFilter) -> bool {
    if let Some(zone) = &filter.zone
        && record.zone != *zone
    {
        return false;
    }

    if let Some(organization) = &filter.organization
        && !record.organization.contains(organization.as_str())
    {
        return false;
    }

    if let Some(min) = filter.min_occurrences
        && record.num_times < min
    {
        return false;
    }

    true
}

/// Rows passing the filter, in their original order.
pub fn apply<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
    filter: &ClusterFilter,
) -> Vec<&'a ClusterRecord> {
    records
        .into_iter()
        .filter(|record| matches(record, filter))
        .collect()
}
