//! Standard transform definitions
//!
//! Pre-built transforms for the common paths, defined as statics using
//! `once_cell::sync::Lazy`.

use crate::cpmap::diagnostics::Report;
use crate::cpmap::graph::Map;
use crate::cpmap::raw::RawMapData;
use crate::cpmap::transforms::stages::{ComposeMap, ExportMap, ParseDocument};
use crate::cpmap::transforms::Transform;
use once_cell::sync::Lazy;

pub type ParsingTransform = Transform<String, Report<RawMapData>>;

pub type MapTransform = Transform<String, Report<Map>>;

pub type ExportTransform = Transform<Map, String>;

/// Document text → column bag
pub static PARSING: Lazy<ParsingTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(ParseDocument::new()));

/// Document text → graph
///
/// Diagnostics from parsing and composing are collected in one report.
pub static STRING_TO_MAP: Lazy<MapTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&PARSING).then(ComposeMap::new()));

/// Graph → document text with the default export options
pub static MAP_TO_STRING: Lazy<ExportTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(ExportMap::new()));
