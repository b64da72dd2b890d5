//! Group-by and top-N rankings for the charts page and map legend.
//!
//! Groups appear in the order their first row appears, and every sort is
//! stable, so ties keep that order.

use std::collections::BTreeMap;

use complaint_map_analytics_models::RankedTotal;
use complaint_map_cluster_models::{ClusterRecord, ClusterStatus};

fn sum_by_name<'a>(pairs: impl IntoIterator<Item = (&'a str, u64)>) -> Vec<RankedTotal> {
    let mut positions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut totals: Vec<RankedTotal> = Vec::new();

    for (name, value) in pairs {
        if let Some(&idx) = positions.get(name) {
            totals[idx].total += value;
        } else {
            positions.insert(name, totals.len());
            totals.push(RankedTotal {
                name: name.to_string(),
                total: value,
            });
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Pairs each row with every organization in its organization field.
///
/// A row owned by `k` organizations appears `k` times, so each owner gets
/// the row's full count.
pub fn explode_organizations<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
) -> Vec<(&'a str, &'a ClusterRecord)> {
    records
        .into_iter()
        .flat_map(|record| record.organizations().map(move |org| (org, record)))
        .collect()
}

/// Summed occurrence count per zone, highest first.
pub fn zone_totals<'a>(records: impl IntoIterator<Item = &'a ClusterRecord>) -> Vec<RankedTotal> {
    sum_by_name(
        records
            .into_iter()
            .map(|r| (r.zone.as_str(), u64::from(r.num_times))),
    )
}

/// Summed occurrence count per exploded organization, highest first.
pub fn organization_totals<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
) -> Vec<RankedTotal> {
    sum_by_name(
        explode_organizations(records)
            .into_iter()
            .map(|(org, r)| (org, u64::from(r.num_times))),
    )
}

/// The `n` zones with the highest summed occurrence count.
pub fn top_zones<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
    n: usize,
) -> Vec<RankedTotal> {
    let mut totals = zone_totals(records);
    totals.truncate(n);
    totals
}

/// The `n` organizations with the highest summed occurrence count.
pub fn top_organizations<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
    n: usize,
) -> Vec<RankedTotal> {
    let mut totals = organization_totals(records);
    totals.truncate(n);
    totals
}

/// Rows sorted by occurrence count, highest first.
pub fn by_occurrences<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
) -> Vec<&'a ClusterRecord> {
    let mut rows: Vec<&ClusterRecord> = records.into_iter().collect();
    rows.sort_by(|a, b| b.num_times.cmp(&a.num_times));
    rows
}

/// The `n` rows with the highest occurrence count.
pub fn top_clusters<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
    n: usize,
) -> Vec<&'a ClusterRecord> {
    let mut rows = by_occurrences(records);
    rows.truncate(n);
    rows
}

/// Number of rows per zone, most rows first.
pub fn zone_row_counts<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
) -> Vec<RankedTotal> {
    sum_by_name(records.into_iter().map(|r| (r.zone.as_str(), 1)))
}

/// Number of rows per known status, in [`ClusterStatus::all`] order.
///
/// Rows with unrecognized status text are not counted.
pub fn status_row_counts<'a>(
    records: impl IntoIterator<Item = &'a ClusterRecord>,
) -> Vec<(ClusterStatus, u64)> {
    let mut counts: BTreeMap<ClusterStatus, u64> = BTreeMap::new();
    for status in records.into_iter().filter_map(ClusterRecord::status_kind) {
        *counts.entry(status).or_default() += 1;
    }

    ClusterStatus::all()
        .iter()
        .map(|&status| (status, counts.get(&status).copied().unwrap_or(0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use complaint_map_cluster_models::ClusterId;

    use super::*;

    fn row(minor: u32, zone: &str, organization: &str, num_times: u32) -> ClusterRecord {
        ClusterRecord {
            cluster_id: ClusterId::new(1, minor),
            description: String::new(),
            status: "เสร็จสิ้น".to_string(),
            organization: organization.to_string(),
            zone: zone.to_string(),
            num_times,
            latitude: 13.7,
            longitude: 100.5,
        }
    }

    fn total(name: &str, total: u64) -> RankedTotal {
        RankedTotal {
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn top_zone_sums_occurrences() {
        let rows = [row(1, "A", "X", 5), row(2, "A", "X", 3), row(3, "B", "X", 2)];
        assert_eq!(top_zones(&rows, 1), vec![total("A", 8)]);
        assert_eq!(top_zones(&rows, 5), vec![total("A", 8), total("B", 2)]);
    }

    #[test]
    fn jointly_owned_cluster_credits_each_owner_fully() {
        let rows = [row(1, "A", "Dept X, Dept Y", 4)];
        assert_eq!(
            organization_totals(&rows),
            vec![total("Dept X", 4), total("Dept Y", 4)]
        );
    }

    #[test]
    fn exploded_totals_cover_raw_group_totals() {
        let rows = [
            row(1, "A", "Dept X, Dept Y", 4),
            row(2, "A", "Dept X", 6),
            row(3, "B", "Dept Y,Dept Z", 1),
            row(4, "B", "", 2),
        ];
        let raw_sum: u64 = sum_by_name(
            rows.iter()
                .map(|r| (r.organization.as_str(), u64::from(r.num_times))),
        )
        .iter()
        .map(|t| t.total)
        .sum();
        let exploded_sum: u64 = organization_totals(&rows).iter().map(|t| t.total).sum();
        assert!(exploded_sum >= raw_sum);
        assert_eq!(exploded_sum, 4 * 2 + 6 + 2 + 2);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let rows = [row(1, "C", "X", 3), row(2, "A", "X", 3), row(3, "B", "X", 3)];
        let names: Vec<String> = zone_totals(&rows).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn top_clusters_are_stable_descending() {
        let rows = [row(1, "A", "X", 2), row(2, "A", "X", 9), row(3, "A", "X", 2)];
        let minors: Vec<u32> = top_clusters(&rows, 3)
            .iter()
            .map(|r| r.cluster_id.minor)
            .collect();
        assert_eq!(minors, vec![2, 1, 3]);
        assert_eq!(top_clusters(&rows, 1).len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_rankings() {
        let rows: [ClusterRecord; 0] = [];
        assert!(top_zones(&rows, 5).is_empty());
        assert!(top_organizations(&rows, 5).is_empty());
        assert!(top_clusters(&rows, 5).is_empty());
    }

    #[test]
    fn counts_rows_per_zone_and_status() {
        let mut rows = vec![row(1, "B", "X", 1), row(2, "A", "X", 1), row(3, "B", "X", 1)];
        rows[1].status = "รอรับเรื่อง".to_string();
        rows[2].status = "unknown".to_string();

        assert_eq!(zone_row_counts(&rows), vec![total("B", 2), total("A", 1)]);
        assert_eq!(
            status_row_counts(&rows),
            vec![
                (ClusterStatus::Resolved, 1),
                (ClusterStatus::InProgress, 0),
                (ClusterStatus::Unassigned, 1),
            ]
        );
    }
}
