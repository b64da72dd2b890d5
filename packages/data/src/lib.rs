#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Loads the cluster and comment tables for the complaint map.
//!
//! Both tables are parsed once per process into an immutable [`Dataset`]
//! that all request handlers share. See [`shared`] for the load-once
//! accessor.

pub mod loader;
pub mod paths;
pub mod progress;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use complaint_map_cluster_models::{
    ClusterId, ClusterRecord, CommentSample, InvalidClusterIdError,
};

use crate::paths::DataPaths;
use crate::progress::ProgressCallback;

/// Errors that can occur while loading the input tables.
///
/// All of these are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// An input file could not be opened.
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV syntax, missing column, or field conversion error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cluster identifier did not parse as `<int>_<int>`.
    #[error("Line {line}: {source}")]
    InvalidClusterId {
        /// 1-based line number in the file (the header is line 1).
        line: u64,
        /// Parse failure.
        source: InvalidClusterIdError,
    },

    /// Two rows of the cluster table share an identifier.
    #[error("Duplicate cluster id {id}")]
    DuplicateClusterId {
        /// The repeated identifier.
        id: ClusterId,
    },
}

/// The immutable in-memory snapshot of both tables plus the lookup
/// structures derived from them.
#[derive(Debug)]
pub struct Dataset {
    clusters: Vec<ClusterRecord>,
    by_id: BTreeMap<ClusterId, usize>,
    comments: BTreeMap<ClusterId, Vec<String>>,
    zones: Vec<String>,
    organizations: Vec<String>,
}

impl Dataset {
    /// Builds a dataset from already-parsed rows.
    ///
    /// Cluster rows keep their file order; comments keep their file order
    /// within each cluster.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::DuplicateClusterId`] if two cluster rows share
    /// an identifier.
    pub fn new(
        clusters: Vec<ClusterRecord>,
        comments: Vec<CommentSample>,
    ) -> Result<Self, DataError> {
        let mut by_id = BTreeMap::new();
        for (idx, record) in clusters.iter().enumerate() {
            if by_id.insert(record.cluster_id, idx).is_some() {
                return Err(DataError::DuplicateClusterId {
                    id: record.cluster_id,
                });
            }
        }

        let mut grouped: BTreeMap<ClusterId, Vec<String>> = BTreeMap::new();
        for sample in comments {
            grouped
                .entry(sample.cluster)
                .or_default()
                .push(sample.comment);
        }

        let mut zones: Vec<String> = clusters.iter().map(|c| c.zone.clone()).collect();
        zones.sort();
        zones.dedup();

        let mut organizations: Vec<String> = clusters
            .iter()
            .flat_map(ClusterRecord::organizations)
            .filter(|org| !org.is_empty())
            .map(str::to_string)
            .collect();
        organizations.sort();
        organizations.dedup();

        log::debug!(
            "Dataset: {} clusters, {} commented clusters, {} zones, {} organizations",
            clusters.len(),
            grouped.len(),
            zones.len(),
            organizations.len()
        );

        Ok(Self {
            clusters,
            by_id,
            comments: grouped,
            zones,
            organizations,
        })
    }

    /// All cluster rows in file order.
    #[must_use]
    pub fn clusters(&self) -> &[ClusterRecord] {
        &self.clusters
    }

    /// Looks up a cluster row by identifier.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&ClusterRecord> {
        self.by_id.get(&id).map(|&idx| &self.clusters[idx])
    }

    /// Distinct zone names, sorted ascending.
    #[must_use]
    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    /// Distinct organization names after splitting and trimming, sorted
    /// ascending.
    #[must_use]
    pub fn organizations(&self) -> &[String] {
        &self.organizations
    }

    /// Identifiers that have at least one comment, in natural order.
    pub fn commented_cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.comments.keys().copied()
    }

    /// Comments for a cluster in file order (empty if it has none).
    #[must_use]
    pub fn comments_for(&self, id: ClusterId) -> &[String] {
        self.comments.get(&id).map_or(&[], Vec::as_slice)
    }
}

/// Parses both tables from disk into a [`Dataset`].
///
/// # Errors
///
/// Returns [`DataError`] if either file is missing or malformed.
pub fn load_dataset(
    paths: &DataPaths,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Dataset, DataError> {
    progress.set_total(2);

    progress.set_message(format!("Reading {}", paths.clusters.display()));
    let clusters = loader::load_clusters(&paths.clusters)?;
    progress.inc(1);

    progress.set_message(format!("Reading {}", paths.comments.display()));
    let comments = loader::load_comments(&paths.comments)?;
    progress.inc(1);

    let dataset = Dataset::new(clusters, comments)?;
    progress.finish(format!(
        "Loaded {} clusters and {} zones",
        dataset.clusters().len(),
        dataset.zones().len()
    ));

    Ok(dataset)
}

static SHARED: OnceLock<Arc<Dataset>> = OnceLock::new();

/// Returns the process-wide dataset, loading it on first use.
///
/// Subsequent calls return the same snapshot regardless of `paths`. If two
/// threads race on first use, both parse but only one result is kept.
///
/// # Errors
///
/// Returns [`DataError`] if the first load fails. A failed load leaves the
/// accessor uninitialized.
pub fn shared(
    paths: &DataPaths,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Arc<Dataset>, DataError> {
    if let Some(dataset) = SHARED.get() {
        return Ok(Arc::clone(dataset));
    }

    let loaded = Arc::new(load_dataset(paths, progress)?);
    Ok(Arc::clone(SHARED.get_or_init(|| loaded)))
}
