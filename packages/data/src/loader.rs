//! CSV parsing for the cluster and comment tables.
//!
//! Rows are deserialized into raw string-keyed structs first, then
//! converted into the model types so that identifier errors can report
//! the offending line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use complaint_map_cluster_models::{ClusterId, ClusterRecord, CommentSample};
use serde::Deserialize;

use crate::DataError;

/// Header row occupies line 1, so data row `i` sits on line `i + 2`.
const FIRST_DATA_LINE: u64 = 2;

#[derive(Debug, Deserialize)]
struct RawClusterRow {
    cluster_id: String,
    cluster_desc: String,
    status: String,
    organization: String,
    zone: String,
    num_times: u32,
    lat: f64,
    long: f64,
}

#[derive(Debug, Deserialize)]
struct RawCommentRow {
    cluster: String,
    comment: String,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

fn parse_id(raw: &str, line: u64) -> Result<ClusterId, DataError> {
    raw.parse()
        .map_err(|source| DataError::InvalidClusterId { line, source })
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses the cluster table from any reader.
///
/// Columns beyond `cluster_id, cluster_desc, status, organization, zone,
/// num_times, lat, long` are ignored.
///
/// # Errors
///
/// Returns [`DataError::Csv`] for missing columns or non-numeric fields, and
/// [`DataError::InvalidClusterId`] for identifiers that are not `<int>_<int>`.
pub fn read_clusters<R: Read>(reader: R) -> Result<Vec<ClusterRecord>, DataError> {
    let mut rdr = csv_reader(reader);
    let mut records = Vec::new();

    for (line, row) in (FIRST_DATA_LINE..).zip(rdr.deserialize::<RawClusterRow>()) {
        let row = row?;
        records.push(ClusterRecord {
            cluster_id: parse_id(&row.cluster_id, line)?,
            description: row.cluster_desc,
            status: row.status,
            organization: row.organization,
            zone: row.zone,
            num_times: row.num_times,
            latitude: row.lat,
            longitude: row.long,
        });
    }

    Ok(records)
}

/// Parses the comment table from any reader.
///
/// # Errors
///
/// Returns [`DataError::Csv`] for missing columns and
/// [`DataError::InvalidClusterId`] for unparseable cluster references.
pub fn read_comments<R: Read>(reader: R) -> Result<Vec<CommentSample>, DataError> {
    let mut rdr = csv_reader(reader);
    let mut comments = Vec::new();

    for (line, row) in (FIRST_DATA_LINE..).zip(rdr.deserialize::<RawCommentRow>()) {
        let row = row?;
        comments.push(CommentSample {
            cluster: parse_id(&row.cluster, line)?,
            comment: row.comment,
        });
    }

    Ok(comments)
}

/// Reads the cluster table from a file.
///
/// # Errors
///
/// Returns [`DataError::Open`] if the file cannot be opened, otherwise the
/// errors of [`read_clusters`].
pub fn load_clusters(path: &Path) -> Result<Vec<ClusterRecord>, DataError> {
    let records = read_clusters(open(path)?)?;
    log::info!("Loaded {} clusters from {}", records.len(), path.display());
    Ok(records)
}

/// Reads the comment table from a file.
///
/// # Errors
///
/// Returns [`DataError::Open`] if the file cannot be opened, otherwise the
/// errors of [`read_comments`].
pub fn load_comments(path: &Path) -> Result<Vec<CommentSample>, DataError> {
    let comments = read_comments(open(path)?)?;
    log::info!("Loaded {} comments from {}", comments.len(), path.display());
    Ok(comments)
}
