//! Display strings for the dashboard, loaded from an embedded TOML file.
//!
//! The Thai locale is baked into the binary at compile time via
//! [`include_str!`] and parsed once at startup.

use complaint_map_server_models::{ColorBy, MapStyle, PageId, VizMode};
use serde::{Deserialize, Serialize};

/// Thai locale source, embedded at compile time.
const THAI_TOML: &str = include_str!("../locales/th.toml");

/// Error returned when a locale file does not match [`Locale`].
#[derive(Debug, thiserror::Error)]
#[error("Malformed locale: {0}")]
pub struct LocaleError(#[from] toml::de::Error);

/// Every user-facing string of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Main heading.
    pub app_title: String,
    /// Browser tab title.
    pub tab_title: String,
    /// Label of the page selector.
    pub page_selector: String,
    /// Page selector entries.
    pub pages: PageLabels,
    /// Map render mode names.
    pub viz_modes: VizModeLabels,
    /// Basemap preset names.
    pub map_styles: MapStyleLabels,
    /// Color-by choice names.
    pub color_modes: ColorModeLabels,
    /// Sidebar control labels.
    pub sidebar: SidebarLabels,
    /// Map page strings.
    pub map: MapLabels,
    /// Hover field labels.
    pub tooltip: RecordLabels,
    /// Charts page strings.
    pub charts: ChartLabels,
    /// Cluster table column headers.
    pub table: TableLabels,
    /// Detail page strings.
    pub detail: DetailLabels,
    /// Methodology page text.
    pub methodology: MethodologyText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLabels {
    pub map: String,
    pub charts: String,
    pub detail: String,
    pub methodology: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VizModeLabels {
    pub point: String,
    pub column: String,
    pub heatmap: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStyleLabels {
    pub dark: String,
    pub light: String,
    pub streets: String,
    pub satellite: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorModeLabels {
    pub zone: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarLabels {
    pub display_options: String,
    pub filters: String,
    pub viz_mode: String,
    pub map_style: String,
    pub color_by: String,
    pub zone_filter: String,
    pub organization_filter: String,
    pub min_occurrences: String,
    pub top_n: String,
}

/// One band of the fixed heatmap legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapBand {
    pub label: String,
    pub meaning: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLabels {
    pub title: String,
    pub zone_legend_title: String,
    pub status_legend_title: String,
    pub heatmap_legend_title: String,
    pub point_note: String,
    pub column_note: String,
    pub heatmap_legend: Vec<HeatmapBand>,
}

/// Labels for the fields shown on hover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLabels {
    pub cluster_id: String,
    pub description: String,
    pub organization: String,
    pub zone: String,
    pub num_times: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartLabels {
    pub title: String,
    pub filtered_note: String,
    pub zone_chart_title: String,
    pub zone_axis: String,
    pub total_axis: String,
    pub top_zone: String,
    pub organization_chart_title: String,
    pub organization_axis: String,
    pub top_organization: String,
    pub cluster_chart_title: String,
    pub cluster_axis: String,
    pub cluster_count_axis: String,
    pub table_title: String,
    pub times_unit: String,
    pub problems_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLabels {
    pub cluster_id: String,
    pub num_times: String,
    pub description: String,
    pub status: String,
    pub organization: String,
    pub zone: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLabels {
    pub title: String,
    pub select_cluster: String,
    pub sample_count: String,
    pub resample: String,
    pub description: String,
    pub status: String,
    pub num_times: String,
    pub organization: String,
    pub zone: String,
    pub latitude: String,
    pub longitude: String,
    pub comment_count: String,
    pub samples: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodologyText {
    pub title: String,
    pub intro: String,
    pub points: Vec<String>,
}

impl Locale {
    /// Parses a locale from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] if a key is missing or has the wrong type.
    pub fn parse(source: &str) -> Result<Self, LocaleError> {
        Ok(toml::from_str(source)?)
    }

    /// The embedded Thai locale.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] if the embedded file is malformed.
    pub fn thai() -> Result<Self, LocaleError> {
        Self::parse(THAI_TOML)
    }

    /// Selector label for a page.
    #[must_use]
    pub fn page(&self, page: PageId) -> &str {
        match page {
            PageId::Map => &self.pages.map,
            PageId::Charts => &self.pages.charts,
            PageId::Detail => &self.pages.detail,
            PageId::Methodology => &self.pages.methodology,
        }
    }

    /// Display name of a render mode.
    #[must_use]
    pub fn viz_mode(&self, mode: VizMode) -> &str {
        match mode {
            VizMode::Point => &self.viz_modes.point,
            VizMode::Column => &self.viz_modes.column,
            VizMode::Heatmap => &self.viz_modes.heatmap,
        }
    }

    /// Display name of a basemap preset.
    #[must_use]
    pub fn map_style(&self, style: MapStyle) -> &str {
        match style {
            MapStyle::Dark => &self.map_styles.dark,
            MapStyle::Light => &self.map_styles.light,
            MapStyle::Streets => &self.map_styles.streets,
            MapStyle::Satellite => &self.map_styles.satellite,
        }
    }

    /// Display name of a color-by choice.
    #[must_use]
    pub fn color_mode(&self, color_by: ColorBy) -> &str {
        match color_by {
            ColorBy::Zone => &self.color_modes.zone,
            ColorBy::Status => &self.color_modes.status,
        }
    }
}
