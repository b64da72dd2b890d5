#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter parameters and aggregate result types for the complaint map.
//!
//! These are the inputs and outputs of the pure functions in
//! `complaint_map_analytics`. They carry no references into the dataset so
//! they can be serialized straight into API responses.

use serde::{Deserialize, Serialize};

/// Sidebar filters applied to the cluster table.
///
/// `None` means "no selection" for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterFilter {
    /// Keep only rows in this zone.
    pub zone: Option<String>,
    /// Keep only rows whose organization field contains this text.
    pub organization: Option<String>,
    /// Keep only rows that recurred at least this many times.
    pub min_occurrences: Option<u32>,
}

/// A name with its summed occurrence count (or row count, for legends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTotal {
    /// Zone, organization, or status name.
    pub name: String,
    /// Aggregated value.
    pub total: u64,
}

/// Geographic center of the initial map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCenter {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// An inclusive integer slider with a default position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderRange {
    /// Smallest selectable value.
    pub min: u32,
    /// Largest selectable value.
    pub max: u32,
    /// Initial value.
    pub default: u32,
}

impl SliderRange {
    /// Clamps `value` into `[min, max]`, using the default when absent.
    #[must_use]
    pub fn resolve(self, value: Option<u32>) -> u32 {
        value.unwrap_or(self.default).clamp(self.min, self.max)
    }
}

/// Minimum-occurrence slider on the map page.
pub const MIN_OCCURRENCE_SLIDER: SliderRange = SliderRange {
    min: 1,
    max: 20,
    default: 10,
};

/// Top-N slider on the charts page.
pub const TOP_N_SLIDER: SliderRange = SliderRange {
    min: 3,
    max: 15,
    default: 5,
};

/// Bounds of the comment-sample slider for one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleBounds {
    /// Slider range. `max` may exceed `available`.
    pub slider: SliderRange,
    /// Comments actually stored for the cluster.
    pub available: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_resolve_clamps_and_defaults() {
        assert_eq!(TOP_N_SLIDER.resolve(None), 5);
        assert_eq!(TOP_N_SLIDER.resolve(Some(1)), 3);
        assert_eq!(TOP_N_SLIDER.resolve(Some(99)), 15);
        assert_eq!(MIN_OCCURRENCE_SLIDER.resolve(Some(7)), 7);
        assert_eq!(MIN_OCCURRENCE_SLIDER.resolve(Some(0)), 1);
    }

    #[test]
    fn filter_serializes_camel_case() {
        let filter = ClusterFilter {
            zone: Some("A".to_string()),
            organization: None,
            min_occurrences: Some(3),
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["minOccurrences"], 3);
        assert!(json["organization"].is_null());
    }
}
