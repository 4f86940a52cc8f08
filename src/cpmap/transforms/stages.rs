//! Individual transformation stages
//!
//! Each stage wraps one step of the core API and implements the `Runnable` trait.

use crate::cpmap::composing::compose;
use crate::cpmap::diagnostics::Report;
use crate::cpmap::exporting::{export_with, ExportOptions};
use crate::cpmap::graph::Map;
use crate::cpmap::parsing::parse;
use crate::cpmap::raw::RawMapData;
use crate::cpmap::transforms::{Runnable, TransformError};

/// Document text → column bag. Never fails; problems become diagnostics.
#[derive(Debug, Default)]
pub struct ParseDocument;

impl ParseDocument {
    pub fn new() -> Self {
        ParseDocument
    }
}

impl Runnable<String, Report<RawMapData>> for ParseDocument {
    fn run(&self, input: String) -> Result<Report<RawMapData>, TransformError> {
        Ok(parse(&input))
    }
}

/// Column bag → graph, carrying the parse diagnostics forward
#[derive(Debug, Default)]
pub struct ComposeMap;

impl ComposeMap {
    pub fn new() -> Self {
        ComposeMap
    }
}

impl Runnable<Report<RawMapData>, Report<Map>> for ComposeMap {
    fn run(&self, input: Report<RawMapData>) -> Result<Report<Map>, TransformError> {
        input
            .and_then(compose)
            .map_err(|e| TransformError::StageFailed {
                stage: "ComposeMap".to_string(),
                message: e.to_string(),
            })
    }
}

/// Graph → document text
#[derive(Debug, Default)]
pub struct ExportMap {
    options: ExportOptions,
}

impl ExportMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }
}

impl Runnable<Map, String> for ExportMap {
    fn run(&self, input: Map) -> Result<String, TransformError> {
        Ok(export_with(&input, &self.options))
    }
}
