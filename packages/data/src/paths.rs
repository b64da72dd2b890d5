#![allow(clippy::module_name_repetitions)]
//! Canonical locations of the two input tables.
//!
//! Defaults live under the project root's `data/` directory and can be
//! overridden with `CLUSTER_DATA_PATH` and `COMMENT_DATA_PATH`.

use std::path::{Path, PathBuf};

/// Environment variable overriding the cluster table location.
pub const CLUSTER_DATA_ENV: &str = "CLUSTER_DATA_PATH";

/// Environment variable overriding the comment table location.
pub const COMMENT_DATA_ENV: &str = "COMMENT_DATA_PATH";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .ancestors()
        .nth(2)
        .unwrap_or(manifest)
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Locations of the cluster and comment tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Per-cluster statistics (`cluster_data.csv`).
    pub clusters: PathBuf,
    /// Example comments per cluster (`example_comment.csv`).
    pub comments: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        let dir = data_dir();
        Self {
            clusters: dir.join("cluster_data.csv"),
            comments: dir.join("example_comment.csv"),
        }
    }
}

impl DataPaths {
    /// Default paths with any environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            clusters: std::env::var_os(CLUSTER_DATA_ENV).map_or(defaults.clusters, PathBuf::from),
            comments: std::env::var_os(COMMENT_DATA_ENV).map_or(defaults.comments, PathBuf::from),
        }
    }
}
