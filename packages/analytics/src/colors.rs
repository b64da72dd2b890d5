//! Category color assignment for zones and statuses.
//!
//! Zone colors come from a fixed 15-entry palette in zone order, wrapping
//! around when there are more zones than colors. Status colors are a fixed
//! table.

use std::collections::BTreeMap;

use complaint_map_cluster_models::{ClusterStatus, Rgb};

/// Fixed zone palette, assigned in zone order.
pub const ZONE_PALETTE: [Rgb; 15] = [
    Rgb(255, 0, 0),     // red
    Rgb(0, 255, 0),     // green
    Rgb(0, 0, 255),     // blue
    Rgb(255, 165, 0),   // orange
    Rgb(128, 0, 128),   // purple
    Rgb(255, 192, 203), // pink
    Rgb(165, 42, 42),   // brown
    Rgb(0, 255, 255),   // cyan
    Rgb(255, 255, 0),   // yellow
    Rgb(70, 130, 180),  // steel blue
    Rgb(50, 205, 50),   // lime green
    Rgb(255, 0, 255),   // magenta
    Rgb(210, 105, 30),  // chocolate
    Rgb(128, 128, 0),   // olive
    Rgb(0, 128, 128),   // teal
];

/// Color for any zone or status missing from the tables.
pub const FALLBACK_COLOR: Rgb = Rgb(0, 0, 0);

/// Continuous light-to-dark blue scale used by the organization and cluster
/// bar charts, as `(position, color)` stops.
pub const BAR_COLOR_SCALE: [(f64, Rgb); 3] = [
    (0.0, Rgb(0xc6, 0xdb, 0xef)),
    (0.5, Rgb(0x6b, 0xae, 0xd6)),
    (1.0, Rgb(0x21, 0x71, 0xb5)),
];

/// Color of a bar on [`BAR_COLOR_SCALE`], where the smallest bar in the
/// chart maps to the first stop and the largest to the last.
///
/// A chart whose bars are all equal uses the darkest stop.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bar_scale_color(value: u64, min: u64, max: u64) -> Rgb {
    let t = if max <= min {
        1.0
    } else {
        (value.clamp(min, max) - min) as f64 / (max - min) as f64
    };

    let upper = BAR_COLOR_SCALE
        .iter()
        .position(|&(pos, _)| t <= pos)
        .unwrap_or(BAR_COLOR_SCALE.len() - 1)
        .max(1);
    let (p0, c0) = BAR_COLOR_SCALE[upper - 1];
    let (p1, c1) = BAR_COLOR_SCALE[upper];
    let f = ((t - p0) / (p1 - p0)).clamp(0.0, 1.0);

    let lerp = |a: u8, b: u8| (f64::from(b) - f64::from(a)).mul_add(f, f64::from(a)).round() as u8;
    Rgb(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2))
}

/// Returns the fixed color for a known status.
#[must_use]
pub const fn status_rgb(status: ClusterStatus) -> Rgb {
    match status {
        ClusterStatus::Resolved => Rgb(0, 200, 83),
        ClusterStatus::InProgress => Rgb(255, 193, 7),
        ClusterStatus::Unassigned => Rgb(244, 67, 54),
    }
}

/// Returns the color for raw status text, or [`FALLBACK_COLOR`] if the text
/// is not a known status.
#[must_use]
pub fn status_color(status: &str) -> Rgb {
    status.trim().parse::<ClusterStatus>().map_or_else(
        |_| {
            log::debug!("No color for status '{status}', using fallback");
            FALLBACK_COLOR
        },
        status_rgb,
    )
}

/// Zone to color mapping for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneColors {
    colors: BTreeMap<String, Rgb>,
}

impl ZoneColors {
    /// Assigns `ZONE_PALETTE[i % 15]` to the `i`-th zone.
    ///
    /// The result depends only on the order of `zones`. Repeated names keep
    /// the color of their first position.
    #[must_use]
    pub fn assign<S: AsRef<str>>(zones: &[S]) -> Self {
        let mut colors = BTreeMap::new();
        for (i, zone) in zones.iter().enumerate() {
            colors
                .entry(zone.as_ref().to_string())
                .or_insert(ZONE_PALETTE[i % ZONE_PALETTE.len()]);
        }
        Self { colors }
    }

    /// Returns the zone's color, or [`FALLBACK_COLOR`] for an unknown zone.
    #[must_use]
    pub fn get(&self, zone: &str) -> Rgb {
        self.colors.get(zone).copied().unwrap_or_else(|| {
            log::debug!("No color for zone '{zone}', using fallback");
            FALLBACK_COLOR
        })
    }

    /// Number of zones with an assigned color.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no zones have been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
