#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the complaint map server.
//!
//! Each dashboard page has one response type assembled fresh per request
//! from the shared dataset. They are separate from the row types so the
//! API contract can evolve independently.

use complaint_map_analytics_models::{MapCenter, RankedTotal, SliderRange};
use complaint_map_cluster_models::{ClusterId, Rgb};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// The four dashboard destinations, in selector order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PageId {
    /// Cluster map.
    Map,
    /// Ranked charts and the cluster table.
    Charts,
    /// One cluster with sampled comments.
    Detail,
    /// Static methodology text.
    Methodology,
}

impl PageId {
    /// Returns all variants in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Map, Self::Charts, Self::Detail, Self::Methodology]
    }
}

/// How clusters are drawn on the map.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VizMode {
    /// Circles sized by occurrence count.
    #[default]
    Point,
    /// Extruded columns with height by occurrence count.
    Column,
    /// Occurrence-weighted heatmap.
    Heatmap,
}

impl VizMode {
    /// Returns all variants in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Point, Self::Column, Self::Heatmap]
    }
}

/// Basemap preset.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MapStyle {
    /// Dark basemap.
    Dark,
    /// Light basemap.
    Light,
    /// Street map.
    #[default]
    Streets,
    /// Satellite imagery.
    Satellite,
}

impl MapStyle {
    /// Returns all variants in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dark, Self::Light, Self::Streets, Self::Satellite]
    }

    /// Mapbox style URL for this preset.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Dark => "mapbox://styles/mapbox/dark-v10",
            Self::Light => "mapbox://styles/mapbox/light-v10",
            Self::Streets => "mapbox://styles/mapbox/streets-v11",
            Self::Satellite => "mapbox://styles/mapbox/satellite-v9",
        }
    }
}

/// What point and column colors encode.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ColorBy {
    /// Zone palette color.
    #[default]
    Zone,
    /// Fixed status color.
    Status,
}

impl ColorBy {
    /// Returns all variants in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Zone, Self::Status]
    }
}

/// A selectable option with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOption {
    /// Value to send back in query parameters.
    pub id: String,
    /// Localized label.
    pub label: String,
}

/// Values for every sidebar control.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct zones, ascending.
    pub zones: Vec<String>,
    /// Distinct organizations, descending (dropdown order).
    pub organizations: Vec<String>,
    /// Clusters with comments, in natural order.
    pub cluster_ids: Vec<ClusterId>,
    /// Map render modes.
    pub viz_modes: Vec<ApiOption>,
    /// Basemap presets.
    pub map_styles: Vec<ApiOption>,
    /// Color-by choices.
    pub color_modes: Vec<ApiOption>,
    /// Minimum-occurrence slider (map page).
    pub min_occurrences: SliderRange,
    /// Top-N slider (charts page).
    pub top_n: SliderRange,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// `point`, `column`, or `heatmap`.
    pub viz_mode: Option<String>,
    /// `dark`, `light`, `streets`, or `satellite`.
    pub map_style: Option<String>,
    /// `zone` or `status`. Ignored for heatmaps.
    pub color_by: Option<String>,
    /// Zone filter (`-` or absent for none).
    pub zone: Option<String>,
    /// Organization filter (`-` or absent for none).
    pub organization: Option<String>,
    /// Minimum occurrence count. Ignored for heatmaps.
    pub min_occurrences: Option<u32>,
}

/// Query parameters for the charts endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsQueryParams {
    /// Number of ranks to show (3-15).
    pub top_n: Option<u32>,
    /// Zone filter for the cluster chart and table.
    pub zone: Option<String>,
    /// Organization filter for the cluster chart and table.
    pub organization: Option<String>,
}

/// Query parameters for the cluster detail and resample endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQueryParams {
    /// Number of comments to sample.
    pub samples: Option<u32>,
}

/// Initial camera for the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Camera latitude.
    pub latitude: f64,
    /// Camera longitude.
    pub longitude: f64,
    /// Zoom level.
    pub zoom: f64,
    /// Tilt in degrees.
    pub pitch: f64,
    /// Rotation in degrees.
    pub bearing: f64,
}

impl ViewState {
    /// A camera looking at `center` with the given tilt.
    #[must_use]
    pub const fn looking_at(center: MapCenter, pitch: f64) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            zoom: 11.0,
            pitch,
            bearing: 0.0,
        }
    }
}

/// One cluster drawn as a point or column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Cluster identifier.
    pub cluster_id: ClusterId,
    /// Problem description.
    pub description: String,
    /// Responsible organizations.
    pub organization: String,
    /// Zone name.
    pub zone: String,
    /// Occurrence count.
    pub num_times: u32,
    /// `[longitude, latitude]`.
    pub position: [f64; 2],
    /// Fill color.
    pub color: Rgb,
}

/// One cluster contributing to the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapPoint {
    /// `[longitude, latitude]`.
    pub position: [f64; 2],
    /// Heat weight (occurrence count).
    pub weight: u32,
}

/// The single layer rendered over the basemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum MapLayer {
    /// Circles with radius `numTimes * radiusPerOccurrence` meters.
    ScatterplotLayer {
        /// Drawn clusters.
        data: Vec<MapPoint>,
        /// Meters of radius per occurrence.
        radius_per_occurrence: f64,
        /// Layer opacity.
        opacity: f64,
        /// Draw outlines.
        stroked: bool,
        /// Fill circles.
        filled: bool,
        /// Minimum outline width in pixels.
        line_width_min_pixels: u32,
        /// Hover picking enabled.
        pickable: bool,
    },
    /// Columns with height `numTimes * elevationPerOccurrence` meters.
    ColumnLayer {
        /// Drawn clusters.
        data: Vec<MapPoint>,
        /// Meters of height per occurrence.
        elevation_per_occurrence: f64,
        /// Multiplier applied to elevations.
        elevation_scale: f64,
        /// Column radius in meters.
        radius: f64,
        /// Draw 3D columns.
        extruded: bool,
        /// Highlight the hovered column.
        auto_highlight: bool,
        /// Hover picking enabled.
        pickable: bool,
    },
    /// Weighted heatmap aggregated per grid cell.
    HeatmapLayer {
        /// Weighted positions.
        data: Vec<HeatmapPoint>,
        /// Cell aggregation (`SUM`).
        aggregation: String,
        /// Layer opacity.
        opacity: f64,
    },
}

/// A labeled field shown on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipField {
    /// Localized label.
    pub label: String,
    /// `MapPoint` key whose value is shown.
    pub field: String,
}

/// One swatch in a map legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Zone, status, or gradient band name.
    pub label: String,
    /// CSS color.
    pub color: String,
    /// Number of clusters, for zone and status legends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Explanation, for the heatmap legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

/// Legend beside the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend heading.
    pub title: String,
    /// Swatches.
    pub entries: Vec<LegendEntry>,
    /// Size or height hint for point and column modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Response of the map endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Page heading.
    pub title: String,
    /// Active render mode.
    pub viz_mode: VizMode,
    /// Active basemap preset.
    pub map_style: MapStyle,
    /// Basemap style URL.
    pub map_style_url: String,
    /// Active color encoding, absent for heatmaps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by: Option<ColorBy>,
    /// Initial camera.
    pub view_state: ViewState,
    /// Rendered layer.
    pub layer: MapLayer,
    /// Hover fields, empty for heatmaps.
    pub tooltip: Vec<TooltipField>,
    /// Legend beside the map.
    pub legend: Legend,
    /// Clusters passing the filters.
    pub row_count: usize,
}

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Category label on the x axis.
    pub label: String,
    /// Bar height.
    pub value: u64,
    /// CSS fill color.
    pub color: String,
}

/// A ranked bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    /// Chart heading.
    pub title: String,
    /// Whether the chart follows the sidebar filters.
    pub filtered: bool,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Bars, highest first.
    pub bars: Vec<Bar>,
}

/// The leader of a global ranking, shown under its chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Caption.
    pub label: String,
    /// Leading zone or organization with its total.
    pub leader: RankedTotal,
}

/// A column of the cluster table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// `TableRow` key.
    pub key: String,
    /// Localized header.
    pub label: String,
}

/// One row of the cluster table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cluster identifier.
    pub cluster_id: ClusterId,
    /// Occurrence count.
    pub num_times: u32,
    /// Problem description.
    pub description: String,
    /// Status text.
    pub status: String,
    /// Responsible organizations.
    pub organization: String,
    /// Zone name.
    pub zone: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// The filtered cluster table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTable {
    /// Table heading.
    pub title: String,
    /// Columns in display order.
    pub columns: Vec<TableColumn>,
    /// Rows, highest occurrence count first.
    pub rows: Vec<TableRow>,
}

/// Response of the charts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsView {
    /// Page heading.
    pub title: String,
    /// Ranks shown per chart.
    pub top_n: u32,
    /// Caption for charts and tables that follow the filters.
    pub filtered_note: String,
    /// Top zones by total occurrences (global).
    pub zone_chart: BarChart,
    /// Leading zone (global).
    pub top_zone: Option<Highlight>,
    /// Top organizations by total occurrences (global).
    pub organization_chart: BarChart,
    /// Leading organization (global).
    pub top_organization: Option<Highlight>,
    /// Top clusters by occurrences (filtered).
    pub cluster_chart: BarChart,
    /// Every cluster passing the filters.
    pub table: ClusterTable,
}

/// Full record of one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetail {
    /// Problem description.
    pub description: String,
    /// Status text.
    pub status: String,
    /// CSS color for the status text.
    pub status_color: String,
    /// Occurrence count.
    pub num_times: u32,
    /// Responsible organizations.
    pub organization: String,
    /// Zone name.
    pub zone: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// Response of the cluster detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterDetailView {
    /// Page heading.
    pub title: String,
    /// Selected cluster.
    pub cluster_id: ClusterId,
    /// Cluster table row, absent if only the comment table knows the id.
    pub record: Option<ClusterDetail>,
    /// Comments stored for the cluster.
    pub comment_count: usize,
    /// Sample-size slider for this cluster.
    pub sample_slider: SliderRange,
    /// Freshly drawn comments.
    pub samples: Vec<String>,
}

/// Response of the resample endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSampleResponse {
    /// Selected cluster.
    pub cluster_id: ClusterId,
    /// Sample size after clamping to the slider.
    pub requested: u32,
    /// Freshly drawn comments (at most the number stored).
    pub samples: Vec<String>,
}

/// Response of the methodology endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodologyView {
    /// Page heading.
    pub title: String,
    /// Opening paragraph.
    pub intro: String,
    /// Definitions, one per bullet.
    pub points: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_names_case_insensitively() {
        assert_eq!("Heatmap".parse::<VizMode>().unwrap(), VizMode::Heatmap);
        assert_eq!("satellite".parse::<MapStyle>().unwrap(), MapStyle::Satellite);
        assert_eq!("STATUS".parse::<ColorBy>().unwrap(), ColorBy::Status);
        assert!("hexbin".parse::<VizMode>().is_err());
    }

    #[test]
    fn defaults_match_sidebar() {
        assert_eq!(VizMode::default(), VizMode::Point);
        assert_eq!(MapStyle::default(), MapStyle::Streets);
        assert_eq!(ColorBy::default(), ColorBy::Zone);
    }

    #[test]
    fn layer_is_tagged_by_type() {
        let layer = MapLayer::HeatmapLayer {
            data: vec![HeatmapPoint {
                position: [100.5, 13.75],
                weight: 3,
            }],
            aggregation: "SUM".to_string(),
            opacity: 0.8,
        };
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "HeatmapLayer");
        assert_eq!(json["data"][0]["weight"], 3);
    }

    #[test]
    fn column_layer_fields_are_camel_case() {
        let layer = MapLayer::ColumnLayer {
            data: Vec::new(),
            elevation_per_occurrence: 100.0,
            elevation_scale: 1.0,
            radius: 25.0,
            extruded: true,
            auto_highlight: true,
            pickable: true,
        };
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["elevationPerOccurrence"], 100.0);
        assert_eq!(json["autoHighlight"], true);
    }
}
