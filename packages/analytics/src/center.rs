//! Initial map view center.

use complaint_map_analytics_models::MapCenter;
use complaint_map_cluster_models::ClusterRecord;

/// Center used when no rows survive the filters (central Bangkok).
pub const DEFAULT_CENTER: MapCenter = MapCenter {
    latitude: 13.75,
    longitude: 100.5,
};

/// Arithmetic mean of the rows' coordinates, or [`DEFAULT_CENTER`] if
/// there are none.
#[allow(clippy::cast_precision_loss)]
pub fn map_center<'a>(records: impl IntoIterator<Item = &'a ClusterRecord>) -> MapCenter {
    let (count, lat_sum, lng_sum) = records
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(n, lat, lng), r| {
            (n + 1, lat + r.latitude, lng + r.longitude)
        });

    if count == 0 {
        return DEFAULT_CENTER;
    }

    MapCenter {
        latitude: lat_sum / count as f64,
        longitude: lng_sum / count as f64,
    }
}
