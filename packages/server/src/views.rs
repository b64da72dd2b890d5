//! Assembles the four dashboard pages from the shared dataset.
//!
//! Every view is rebuilt from scratch for each request using the sidebar
//! parameters it carries. The zone and organization charts rank the whole
//! table; the cluster chart and table follow the filters.

use std::str::FromStr;
use std::sync::Arc;

use complaint_map_analytics::center::map_center;
use complaint_map_analytics::colors::{ZoneColors, bar_scale_color, status_color, status_rgb};
use complaint_map_analytics::filters::{self, selection};
use complaint_map_analytics::rankings;
use complaint_map_analytics::sampling::{draw_size, sample_bounds, sample_comments};
use complaint_map_analytics_models::{
    ClusterFilter, MIN_OCCURRENCE_SLIDER, RankedTotal, TOP_N_SLIDER,
};
use complaint_map_cluster_models::{ClusterId, ClusterRecord};
use complaint_map_data::Dataset;
use complaint_map_server_models::{
    ApiOption, Bar, BarChart, ChartsQueryParams, ChartsView, ClusterDetail, ClusterDetailView,
    ClusterTable, ColorBy, CommentSampleResponse, DetailQueryParams, FilterOptions, HeatmapPoint,
    Highlight, Legend, LegendEntry, MapLayer, MapPoint, MapQueryParams, MapStyle, MapView,
    MethodologyView, PageId, TableColumn, TableRow, TooltipField, ViewState, VizMode,
};
use rand::Rng;

use crate::error::ApiError;
use crate::locale::Locale;

const POINT_RADIUS_PER_OCCURRENCE: f64 = 10.0;
const COLUMN_ELEVATION_PER_OCCURRENCE: f64 = 100.0;
const COLUMN_RADIUS: f64 = 25.0;
const COLUMN_PITCH: f64 = 45.0;
const LAYER_OPACITY: f64 = 0.8;

/// Parses an optional enum parameter, falling back to its default.
fn parse_param<T: FromStr + Default>(
    name: &'static str,
    raw: Option<&str>,
) -> Result<T, ApiError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(T::default()),
        Some(value) => value.parse().map_err(|_| ApiError::InvalidParameter {
            name,
            value: value.to_string(),
        }),
    }
}

/// Parses a cluster identifier from a path segment.
///
/// # Errors
///
/// Returns [`ApiError::InvalidParameter`] if `raw` is not `<int>_<int>`.
pub fn parse_cluster_id(raw: &str) -> Result<ClusterId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidParameter {
        name: "clusterId",
        value: raw.to_string(),
    })
}

fn position(record: &ClusterRecord) -> [f64; 2] {
    [record.longitude, record.latitude]
}

/// Shared read-only state behind every request.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    zone_colors: ZoneColors,
    locale: Locale,
}

impl Dashboard {
    /// Derives the zone colors for `dataset` and wraps it for serving.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, locale: Locale) -> Self {
        let zone_colors = ZoneColors::assign(dataset.zones());
        log::debug!("Assigned colors to {} zones", zone_colors.len());
        Self {
            dataset,
            zone_colors,
            locale,
        }
    }

    /// Every display string, for labeling controls and fields client-side.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Page selector entries.
    #[must_use]
    pub fn pages(&self) -> Vec<ApiOption> {
        PageId::all()
            .iter()
            .map(|&page| ApiOption {
                id: page.to_string(),
                label: self.locale.page(page).to_string(),
            })
            .collect()
    }

    /// Values for every sidebar control.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            zones: self.dataset.zones().to_vec(),
            organizations: self.dataset.organizations().iter().rev().cloned().collect(),
            cluster_ids: self.dataset.commented_cluster_ids().collect(),
            viz_modes: VizMode::all()
                .iter()
                .map(|&m| ApiOption {
                    id: m.to_string(),
                    label: self.locale.viz_mode(m).to_string(),
                })
                .collect(),
            map_styles: MapStyle::all()
                .iter()
                .map(|&s| ApiOption {
                    id: s.to_string(),
                    label: self.locale.map_style(s).to_string(),
                })
                .collect(),
            color_modes: ColorBy::all()
                .iter()
                .map(|&c| ApiOption {
                    id: c.to_string(),
                    label: self.locale.color_mode(c).to_string(),
                })
                .collect(),
            min_occurrences: MIN_OCCURRENCE_SLIDER,
            top_n: TOP_N_SLIDER,
        }
    }

    /// Builds the map page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParameter`] for an unknown render mode,
    /// basemap, or color-by value.
    pub fn map_view(&self, params: &MapQueryParams) -> Result<MapView, ApiError> {
        let viz_mode: VizMode = parse_param("vizMode", params.viz_mode.as_deref())?;
        let map_style: MapStyle = parse_param("mapStyle", params.map_style.as_deref())?;
        let color_by = if viz_mode == VizMode::Heatmap {
            None
        } else {
            Some(parse_param::<ColorBy>("colorBy", params.color_by.as_deref())?)
        };

        let filter = ClusterFilter {
            zone: selection(params.zone.as_deref()),
            organization: selection(params.organization.as_deref()),
            min_occurrences: color_by
                .is_some()
                .then(|| MIN_OCCURRENCE_SLIDER.resolve(params.min_occurrences)),
        };
        let rows = filters::apply(self.dataset.clusters(), &filter);
        log::debug!("Map: {viz_mode} with {filter:?} selected {} rows", rows.len());

        let center = map_center(rows.iter().copied());
        let pitch = if viz_mode == VizMode::Column {
            COLUMN_PITCH
        } else {
            0.0
        };

        let layer = match (viz_mode, color_by) {
            (VizMode::Heatmap, _) | (_, None) => MapLayer::HeatmapLayer {
                data: rows
                    .iter()
                    .map(|r| HeatmapPoint {
                        position: position(r),
                        weight: r.num_times,
                    })
                    .collect(),
                aggregation: "SUM".to_string(),
                opacity: LAYER_OPACITY,
            },
            (VizMode::Point, Some(color_by)) => MapLayer::ScatterplotLayer {
                data: self.map_points(&rows, color_by),
                radius_per_occurrence: POINT_RADIUS_PER_OCCURRENCE,
                opacity: LAYER_OPACITY,
                stroked: true,
                filled: true,
                line_width_min_pixels: 1,
                pickable: true,
            },
            (VizMode::Column, Some(color_by)) => MapLayer::ColumnLayer {
                data: self.map_points(&rows, color_by),
                elevation_per_occurrence: COLUMN_ELEVATION_PER_OCCURRENCE,
                elevation_scale: 1.0,
                radius: COLUMN_RADIUS,
                extruded: true,
                auto_highlight: true,
                pickable: true,
            },
        };

        Ok(MapView {
            title: self.locale.map.title.clone(),
            viz_mode,
            map_style,
            map_style_url: map_style.url().to_string(),
            color_by,
            view_state: ViewState::looking_at(center, pitch),
            layer,
            tooltip: if color_by.is_some() {
                self.tooltip_fields()
            } else {
                Vec::new()
            },
            legend: self.legend(viz_mode, color_by),
            row_count: rows.len(),
        })
    }

    fn map_points(&self, rows: &[&ClusterRecord], color_by: ColorBy) -> Vec<MapPoint> {
        rows.iter()
            .map(|r| MapPoint {
                cluster_id: r.cluster_id,
                description: r.description.clone(),
                organization: r.organization.clone(),
                zone: r.zone.clone(),
                num_times: r.num_times,
                position: position(r),
                color: match color_by {
                    ColorBy::Zone => self.zone_colors.get(&r.zone),
                    ColorBy::Status => status_color(&r.status),
                },
            })
            .collect()
    }

    fn tooltip_fields(&self) -> Vec<TooltipField> {
        let labels = &self.locale.tooltip;
        [
            (&labels.cluster_id, "clusterId"),
            (&labels.description, "description"),
            (&labels.organization, "organization"),
            (&labels.zone, "zone"),
            (&labels.num_times, "numTimes"),
        ]
        .into_iter()
        .map(|(label, field)| TooltipField {
            label: label.clone(),
            field: field.to_string(),
        })
        .collect()
    }

    /// Legend counts always come from the whole table, not the filtered
    /// rows.
    fn legend(&self, viz_mode: VizMode, color_by: Option<ColorBy>) -> Legend {
        let labels = &self.locale.map;
        let note = match viz_mode {
            VizMode::Point => Some(labels.point_note.clone()),
            VizMode::Column => Some(labels.column_note.clone()),
            VizMode::Heatmap => None,
        };

        match color_by {
            Some(ColorBy::Zone) => Legend {
                title: labels.zone_legend_title.clone(),
                entries: rankings::zone_row_counts(self.dataset.clusters())
                    .into_iter()
                    .map(|RankedTotal { name, total }| LegendEntry {
                        color: self.zone_colors.get(&name).css(),
                        label: name,
                        count: Some(total),
                        meaning: None,
                    })
                    .collect(),
                note,
            },
            Some(ColorBy::Status) => Legend {
                title: labels.status_legend_title.clone(),
                entries: rankings::status_row_counts(self.dataset.clusters())
                    .into_iter()
                    .map(|(status, count)| LegendEntry {
                        label: status.to_string(),
                        color: status_rgb(status).css(),
                        count: Some(count),
                        meaning: None,
                    })
                    .collect(),
                note,
            },
            None => Legend {
                title: labels.heatmap_legend_title.clone(),
                entries: labels
                    .heatmap_legend
                    .iter()
                    .map(|band| LegendEntry {
                        label: band.label.clone(),
                        color: band.color.clone(),
                        count: None,
                        meaning: Some(band.meaning.clone()),
                    })
                    .collect(),
                note: None,
            },
        }
    }

    /// Builds the charts and table page.
    #[must_use]
    pub fn charts_view(&self, params: &ChartsQueryParams) -> ChartsView {
        let labels = &self.locale.charts;
        let top_n = TOP_N_SLIDER.resolve(params.top_n);
        let n = top_n as usize;
        let all = self.dataset.clusters();

        let zone_totals = rankings::top_zones(all, n);
        let organization_totals = rankings::top_organizations(all, n);

        let filter = ClusterFilter {
            zone: selection(params.zone.as_deref()),
            organization: selection(params.organization.as_deref()),
            min_occurrences: None,
        };
        let filtered = filters::apply(all, &filter);
        let top_clusters: Vec<RankedTotal> =
            rankings::top_clusters(filtered.iter().copied(), n)
                .into_iter()
                .map(|r| RankedTotal {
                    name: r.cluster_id.to_string(),
                    total: u64::from(r.num_times),
                })
                .collect();

        ChartsView {
            title: labels.title.clone(),
            top_n,
            filtered_note: labels.filtered_note.clone(),
            zone_chart: BarChart {
                title: labels.zone_chart_title.clone(),
                filtered: false,
                x_label: labels.zone_axis.clone(),
                y_label: labels.total_axis.clone(),
                bars: zone_totals
                    .iter()
                    .map(|t| Bar {
                        label: t.name.clone(),
                        value: t.total,
                        color: self.zone_colors.get(&t.name).css(),
                    })
                    .collect(),
            },
            top_zone: zone_totals.first().map(|leader| Highlight {
                label: labels.top_zone.clone(),
                leader: leader.clone(),
            }),
            organization_chart: BarChart {
                title: labels.organization_chart_title.clone(),
                filtered: false,
                x_label: labels.organization_axis.clone(),
                y_label: labels.total_axis.clone(),
                bars: scaled_bars(&organization_totals),
            },
            top_organization: organization_totals.first().map(|leader| Highlight {
                label: labels.top_organization.clone(),
                leader: leader.clone(),
            }),
            cluster_chart: BarChart {
                title: labels.cluster_chart_title.clone(),
                filtered: true,
                x_label: labels.cluster_axis.clone(),
                y_label: labels.cluster_count_axis.clone(),
                bars: scaled_bars(&top_clusters),
            },
            table: self.cluster_table(&filtered),
        }
    }

    fn cluster_table(&self, rows: &[&ClusterRecord]) -> ClusterTable {
        let labels = &self.locale.table;
        let columns = [
            ("clusterId", &labels.cluster_id),
            ("numTimes", &labels.num_times),
            ("description", &labels.description),
            ("status", &labels.status),
            ("organization", &labels.organization),
            ("zone", &labels.zone),
            ("latitude", &labels.latitude),
            ("longitude", &labels.longitude),
        ]
        .into_iter()
        .map(|(key, label)| TableColumn {
            key: key.to_string(),
            label: label.clone(),
        })
        .collect();

        ClusterTable {
            title: self.locale.charts.table_title.clone(),
            columns,
            rows: rankings::by_occurrences(rows.iter().copied())
                .into_iter()
                .map(|r| TableRow {
                    cluster_id: r.cluster_id,
                    num_times: r.num_times,
                    description: r.description.clone(),
                    status: r.status.clone(),
                    organization: r.organization.clone(),
                    zone: r.zone.clone(),
                    latitude: r.latitude,
                    longitude: r.longitude,
                })
                .collect(),
        }
    }

    fn comments(&self, id: ClusterId) -> Result<&[String], ApiError> {
        let comments = self.dataset.comments_for(id);
        if comments.is_empty() && self.dataset.cluster(id).is_none() {
            return Err(ApiError::NotFound { id: id.to_string() });
        }
        Ok(comments)
    }

    /// Builds the detail page for one cluster with a fresh comment sample.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if neither table knows `id`.
    pub fn detail_view<R: Rng + ?Sized>(
        &self,
        id: ClusterId,
        params: &DetailQueryParams,
        rng: &mut R,
    ) -> Result<ClusterDetailView, ApiError> {
        let comments = self.comments(id)?;
        let bounds = sample_bounds(comments.len());
        let k = draw_size(params.samples, bounds);

        let record = self.dataset.cluster(id).map(|r| ClusterDetail {
            description: r.description.clone(),
            status: r.status.clone(),
            status_color: status_color(&r.status).css(),
            num_times: r.num_times,
            organization: r.organization.clone(),
            zone: r.zone.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
        });

        Ok(ClusterDetailView {
            title: self.locale.detail.title.clone(),
            cluster_id: id,
            record,
            comment_count: comments.len(),
            sample_slider: bounds.slider,
            samples: sample_comments(comments, k, rng)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Draws a new comment sample without rebuilding the rest of the page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if neither table knows `id`.
    pub fn resample<R: Rng + ?Sized>(
        &self,
        id: ClusterId,
        params: &DetailQueryParams,
        rng: &mut R,
    ) -> Result<CommentSampleResponse, ApiError> {
        let comments = self.comments(id)?;
        let bounds = sample_bounds(comments.len());

        Ok(CommentSampleResponse {
            cluster_id: id,
            requested: bounds.slider.resolve(params.samples),
            samples: sample_comments(comments, draw_size(params.samples, bounds), rng)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// The methodology page.
    #[must_use]
    pub fn methodology(&self) -> MethodologyView {
        let text = &self.locale.methodology;
        MethodologyView {
            title: text.title.clone(),
            intro: text.intro.clone(),
            points: text.points.clone(),
        }
    }
}

/// Bars colored along the blue scale relative to the chart's own range.
fn scaled_bars(totals: &[RankedTotal]) -> Vec<Bar> {
    let min = totals.iter().map(|t| t.total).min().unwrap_or(0);
    let max = totals.iter().map(|t| t.total).max().unwrap_or(0);
    totals
        .iter()
        .map(|t| Bar {
            label: t.name.clone(),
            value: t.total,
            color: bar_scale_color(t.total, min, max).css(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use complaint_map_analytics::center::DEFAULT_CENTER;
    use complaint_map_cluster_models::CommentSample;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn record(
        id: &str,
        zone: &str,
        organization: &str,
        status: &str,
        num_times: u32,
    ) -> ClusterRecord {
        ClusterRecord {
            cluster_id: id.parse().unwrap(),
            description: format!("problem {id}"),
            status: status.to_string(),
            organization: organization.to_string(),
            zone: zone.to_string(),
            num_times,
            latitude: 13.7,
            longitude: 100.5,
        }
    }

    fn comment(id: &str, text: &str) -> CommentSample {
        CommentSample {
            cluster: id.parse().unwrap(),
            comment: text.to_string(),
        }
    }

    fn dashboard() -> Dashboard {
        let dataset = Dataset::new(
            vec![
                record("1_1", "A", "Dept X, Dept Y", "เสร็จสิ้น", 5),
                record("1_2", "A", "Dept X", "รอรับเรื่อง", 3),
                record("2_1", "B", "Dept Z", "กำลังดำเนินการ", 12),
                record("2_2", "B", "Dept Y", "ส่งต่อ", 2),
            ],
            vec![
                comment("1_1", "only one"),
                comment("2_1", "a"),
                comment("2_1", "b"),
                comment("2_1", "c"),
                comment("9_9", "orphan"),
            ],
        )
        .unwrap();
        Dashboard::new(Arc::new(dataset), Locale::thai().unwrap())
    }

    #[test]
    fn zone_chart_is_global_and_cluster_chart_is_filtered() {
        let view = dashboard().charts_view(&ChartsQueryParams {
            top_n: Some(3),
            zone: Some("A".to_string()),
            organization: None,
        });

        let zones: Vec<(&str, u64)> = view
            .zone_chart
            .bars
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(zones, vec![("B", 14), ("A", 8)]);
        assert_eq!(view.top_zone.unwrap().leader.name, "B");

        let clusters: Vec<&str> = view
            .cluster_chart
            .bars
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(clusters, vec!["1_1", "1_2"]);
        assert_eq!(view.table.rows.len(), 2);
        assert_eq!(view.table.columns.len(), 8);
        assert_eq!(view.table.columns[0].label, "หมายเลข");
    }

    #[test]
    fn organization_chart_credits_joint_owners() {
        let view = dashboard().charts_view(&ChartsQueryParams::default());
        let orgs: Vec<(&str, u64)> = view
            .organization_chart
            .bars
            .iter()
            .map(|b| (b.label.as_str(), b.value))
            .collect();
        assert_eq!(orgs, vec![("Dept Z", 12), ("Dept X", 8), ("Dept Y", 7)]);
        assert_eq!(view.top_n, 5);
    }

    #[test]
    fn map_threshold_can_empty_the_view() {
        let view = dashboard()
            .map_view(&MapQueryParams {
                zone: Some("A".to_string()),
                min_occurrences: Some(10),
                ..MapQueryParams::default()
            })
            .unwrap();
        assert_eq!(view.row_count, 0);
        assert!((view.view_state.latitude - DEFAULT_CENTER.latitude).abs() < f64::EPSILON);
        assert!((view.view_state.longitude - DEFAULT_CENTER.longitude).abs() < f64::EPSILON);
    }

    #[test]
    fn heatmap_ignores_threshold_and_color() {
        let view = dashboard()
            .map_view(&MapQueryParams {
                viz_mode: Some("heatmap".to_string()),
                color_by: Some("bogus".to_string()),
                min_occurrences: Some(20),
                ..MapQueryParams::default()
            })
            .unwrap();
        assert_eq!(view.row_count, 4);
        assert_eq!(view.color_by, None);
        assert!(view.tooltip.is_empty());
        assert_eq!(view.legend.entries.len(), 4);
        assert!(matches!(view.layer, MapLayer::HeatmapLayer { .. }));
    }

    #[test]
    fn status_colors_fall_back_for_unknown_status() {
        let view = dashboard()
            .map_view(&MapQueryParams {
                viz_mode: Some("column".to_string()),
                color_by: Some("status".to_string()),
                min_occurrences: Some(1),
                ..MapQueryParams::default()
            })
            .unwrap();
        assert!((view.view_state.pitch - COLUMN_PITCH).abs() < f64::EPSILON);
        let MapLayer::ColumnLayer { data, .. } = view.layer else {
            panic!("expected a column layer");
        };
        let unknown = data.iter().find(|p| p.cluster_id == ClusterId::new(2, 2)).unwrap();
        assert_eq!(unknown.color, complaint_map_analytics::colors::FALLBACK_COLOR);
        assert_eq!(view.legend.entries.len(), 3);
    }

    #[test]
    fn zone_legend_counts_rows_in_full_table() {
        let view = dashboard()
            .map_view(&MapQueryParams {
                zone: Some("B".to_string()),
                ..MapQueryParams::default()
            })
            .unwrap();
        let counts: Vec<(&str, Option<u64>)> = view
            .legend
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.count))
            .collect();
        assert_eq!(counts, vec![("A", Some(2)), ("B", Some(2))]);
        assert_eq!(view.row_count, 1);
    }

    #[test]
    fn rejects_unknown_map_style() {
        let err = dashboard()
            .map_view(&MapQueryParams {
                map_style: Some("terrain".to_string()),
                ..MapQueryParams::default()
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter { name: "mapStyle", .. }));
    }

    #[test]
    fn single_comment_cluster_offers_two_but_draws_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = dashboard()
            .detail_view(
                ClusterId::new(1, 1),
                &DetailQueryParams { samples: Some(2) },
                &mut rng,
            )
            .unwrap();
        assert_eq!(view.sample_slider.max, 2);
        assert_eq!(view.samples, vec!["only one"]);
        assert_eq!(view.record.unwrap().status_color, "rgb(0, 200, 83)");
    }

    #[test]
    fn detail_for_comment_only_cluster_has_no_record() {
        let mut rng = StdRng::seed_from_u64(5);
        let view = dashboard()
            .detail_view(ClusterId::new(9, 9), &DetailQueryParams::default(), &mut rng)
            .unwrap();
        assert!(view.record.is_none());
        assert_eq!(view.comment_count, 1);
    }

    #[test]
    fn unknown_cluster_is_not_found() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = dashboard()
            .resample(ClusterId::new(7, 7), &DetailQueryParams::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn resample_returns_full_set_when_asking_for_all() {
        let dashboard = dashboard();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let response = dashboard
                .resample(
                    ClusterId::new(2, 1),
                    &DetailQueryParams { samples: Some(3) },
                    &mut rng,
                )
                .unwrap();
            let drawn: BTreeSet<&str> = response.samples.iter().map(String::as_str).collect();
            assert_eq!(drawn, BTreeSet::from(["a", "b", "c"]));
        }
    }

    #[test]
    fn filter_options_follow_dropdown_order() {
        let options = dashboard().filter_options();
        assert_eq!(options.zones, vec!["A", "B"]);
        assert_eq!(options.organizations, vec!["Dept Z", "Dept Y", "Dept X"]);
        let ids: Vec<String> = options.cluster_ids.iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["1_1", "2_1", "9_9"]);
        assert_eq!(options.viz_modes.len(), 3);
        assert_eq!(options.map_styles.len(), 4);
    }
}
