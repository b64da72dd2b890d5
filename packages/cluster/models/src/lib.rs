#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Cluster, comment, and status types for the complaint map.
//!
//! A cluster is a group of citizen reports that describe the same recurring
//! problem at the same location. These types are produced by the data
//! loader and are read-only for the lifetime of the process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of a cluster in `"<major>_<minor>"` form.
///
/// Ordering compares the integer components, so `2_2 < 2_10 < 10_1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId {
    /// Leading component (location group).
    pub major: u32,
    /// Trailing component (problem group within the location).
    pub minor: u32,
}

impl ClusterId {
    /// Creates an identifier from its two components.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.major, self.minor)
    }
}

/// Error returned when a string is not a valid `"<int>_<int>"` cluster id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cluster id '{value}': expected <int>_<int>")]
pub struct InvalidClusterIdError {
    /// The rejected input.
    pub value: String,
}

/// A component must be plain ASCII digits without a leading zero, so that
/// every accepted id displays exactly as it was written.
fn component(part: &str) -> Option<u32> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    if canonical { part.parse().ok() } else { None }
}

impl FromStr for ClusterId {
    type Err = InvalidClusterIdError;

    /// Accepts only the canonical `<int>_<int>` spelling. `01_2`, `+1_2`
    /// and ` 1_2` are rejected rather than folded into `1_2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidClusterIdError {
            value: s.to_string(),
        };

        let (major, minor) = s.split_once('_').ok_or_else(invalid)?;
        let major = component(major).ok_or_else(invalid)?;
        let minor = component(minor).ok_or_else(invalid)?;

        Ok(Self { major, minor })
    }
}

impl Serialize for ClusterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClusterId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolution status of a cluster, as written by the upstream pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum ClusterStatus {
    /// The latest instance of the problem has been fixed.
    #[serde(rename = "เสร็จสิ้น")]
    #[strum(serialize = "เสร็จสิ้น")]
    Resolved,
    /// An agency is working on the problem.
    #[serde(rename = "กำลังดำเนินการ")]
    #[strum(serialize = "กำลังดำเนินการ")]
    InProgress,
    /// Nobody has picked the problem up yet.
    #[serde(rename = "รอรับเรื่อง")]
    #[strum(serialize = "รอรับเรื่อง")]
    Unassigned,
}

impl ClusterStatus {
    /// Returns all variants in legend order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Resolved, Self::InProgress, Self::Unassigned]
    }
}

/// An RGB color triple. Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `rgb(r, g, b)` notation.
    #[must_use]
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// One row of the cluster table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    /// Unique cluster identifier.
    pub cluster_id: ClusterId,
    /// Free-text description of the problem.
    pub description: String,
    /// Raw status text. Usually one of [`ClusterStatus`], but kept verbatim
    /// so unknown values still display.
    pub status: String,
    /// Comma-joined list of responsible organizations.
    pub organization: String,
    /// Zone (district) name.
    pub zone: String,
    /// Times the problem recurred after being resolved.
    pub num_times: u32,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl ClusterRecord {
    /// Parses [`Self::status`] into a known status, if it is one.
    #[must_use]
    pub fn status_kind(&self) -> Option<ClusterStatus> {
        self.status.trim().parse().ok()
    }

    /// Splits the comma-joined organization field into trimmed names.
    ///
    /// Empty segments are kept as empty names so that every row yields at
    /// least one organization.
    pub fn organizations(&self) -> impl Iterator<Item = &str> {
        self.organization.split(',').map(str::trim)
    }
}

/// One example citizen report attached to a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSample {
    /// Cluster this comment belongs to.
    pub cluster: ClusterId,
    /// Comment text.
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(organization: &str, status: &str) -> ClusterRecord {
        ClusterRecord {
            cluster_id: ClusterId::new(1, 1),
            description: "ทางเท้าชำรุด".to_string(),
            status: status.to_string(),
            organization: organization.to_string(),
            zone: "กรุงเทพกลาง".to_string(),
            num_times: 3,
            latitude: 13.75,
            longitude: 100.5,
        }
    }

    #[test]
    fn cluster_ids_sort_numerically() {
        let mut ids: Vec<ClusterId> = ["2_10", "2_2", "10_1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["2_2", "2_10", "10_1"]);
    }

    #[test]
    fn cluster_id_rejects_malformed_input() {
        assert!("12".parse::<ClusterId>().is_err());
        assert!("a_1".parse::<ClusterId>().is_err());
        assert!("1_".parse::<ClusterId>().is_err());
        assert!("1_2_3".parse::<ClusterId>().is_err());
        let err = "x".parse::<ClusterId>().unwrap_err();
        assert_eq!(err.value, "x");
    }

    #[test]
    fn cluster_id_rejects_non_canonical_spellings() {
        for raw in ["03_007", "1_02", "+1_2", " 1_2", "1 _2", "1_2 "] {
            assert!(raw.parse::<ClusterId>().is_err(), "{raw} was accepted");
        }
        assert_eq!("0_0".parse::<ClusterId>().unwrap(), ClusterId::new(0, 0));
    }

    #[test]
    fn accepted_ids_display_as_written() {
        for raw in ["0_7", "3_7", "10_120"] {
            assert_eq!(raw.parse::<ClusterId>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn cluster_id_serializes_as_string() {
        let json = serde_json::to_string(&ClusterId::new(4, 12)).unwrap();
        assert_eq!(json, "\"4_12\"");
        let back: ClusterId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClusterId::new(4, 12));
    }

    #[test]
    fn parses_known_statuses() {
        assert_eq!(
            record("", "เสร็จสิ้น").status_kind(),
            Some(ClusterStatus::Resolved)
        );
        assert_eq!(
            record("", "กำลังดำเนินการ").status_kind(),
            Some(ClusterStatus::InProgress)
        );
        assert_eq!(
            record("", "รอรับเรื่อง").status_kind(),
            Some(ClusterStatus::Unassigned)
        );
        assert_eq!(record("", "ส่งต่อ").status_kind(), None);
    }

    #[test]
    fn status_display_matches_source_text() {
        assert_eq!(ClusterStatus::InProgress.to_string(), "กำลังดำเนินการ");
    }

    #[test]
    fn splits_and_trims_organizations() {
        let rec = record("Dept X, Dept Y ,Dept Z", "เสร็จสิ้น");
        let orgs: Vec<&str> = rec.organizations().collect();
        assert_eq!(orgs, vec!["Dept X", "Dept Y", "Dept Z"]);
    }

    #[test]
    fn empty_organization_yields_one_empty_name() {
        let rec = record("", "เสร็จสิ้น");
        assert_eq!(rec.organizations().collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn rgb_css_notation() {
        assert_eq!(Rgb(0, 200, 83).css(), "rgb(0, 200, 83)");
        assert_eq!(serde_json::to_string(&Rgb(1, 2, 3)).unwrap(), "[1,2,3]");
    }
}
