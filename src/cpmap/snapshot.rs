//! JSON and YAML snapshots of the checkpoint graph
//!
//! A snapshot is the graph as plain data, for editors and tooling that persist a
//! map between sessions. Composite values carry a `"__type"` discriminator with
//! the record name; flags, numbers and absent values are written as JSON booleans,
//! numbers and `null`. A NaN connection or prime tag is written as the string
//! `"NaN"` so it reads back as a number rather than as absent.
//!
//! Snapshots are not a replacement for the document format: reading a snapshot back
//! gives the graph, which still has to go through the exporter to become a document.

use crate::cpmap::graph::Map;
use std::fmt;

/// Error that can occur while reading or writing a snapshot
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(err) => write!(f, "JSON snapshot error: {}", err),
            SnapshotError::Yaml(err) => write!(f, "YAML snapshot error: {}", err),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(err) => Some(err),
            SnapshotError::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err)
    }
}

impl From<serde_yaml::Error> for SnapshotError {
    fn from(err: serde_yaml::Error) -> Self {
        SnapshotError::Yaml(err)
    }
}

/// Pretty-printed JSON
pub fn to_json(map: &Map) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(map)?)
}

pub fn from_json(json: &str) -> Result<Map, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_yaml(map: &Map) -> Result<String, SnapshotError> {
    Ok(serde_yaml::to_string(map)?)
}

pub fn from_yaml(yaml: &str) -> Result<Map, SnapshotError> {
    Ok(serde_yaml::from_str(yaml)?)
}
