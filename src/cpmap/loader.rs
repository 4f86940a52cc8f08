//! Map loading utilities
//!
//! `MapLoader` reads a save document from a file or a string and runs the standard
//! transforms on it. It is used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use cpmap::cpmap::loader::MapLoader;
//!
//! let report = MapLoader::from_path("level.cpmap")?.compose()?;
//! for diagnostic in report.warnings() {
//!     eprintln!("{}", diagnostic);
//! }
//! let map = report.value;
//! ```

use crate::cpmap::diagnostics::Report;
use crate::cpmap::graph::Map;
use crate::cpmap::raw::RawMapData;
use crate::cpmap::transforms::standard::{PARSING, STRING_TO_MAP};
use crate::cpmap::transforms::{Transform, TransformError};
use std::fs;
use std::path::Path;

/// Error that can occur when loading documents
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
    /// Transform/parsing error
    TransformError(TransformError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::TransformError(err) => write!(f, "Transform error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<TransformError> for LoaderError {
    fn from(err: TransformError) -> Self {
        LoaderError::TransformError(err)
    }
}

/// Save document loader with transform shortcuts
pub struct MapLoader {
    source: String,
}

impl MapLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(MapLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        MapLoader {
            source: source.into(),
        }
    }

    /// Run a custom transform on the source
    ///
    /// This is the generic method that all shortcuts use internally.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    /// Parse the source into its columns
    ///
    /// This is a shortcut for `.with(&PARSING)`.
    pub fn parse(&self) -> Result<Report<RawMapData>, LoaderError> {
        self.with(&PARSING)
    }

    /// Parse and compose the source into a checkpoint graph
    ///
    /// This is a shortcut for `.with(&STRING_TO_MAP)`.
    pub fn compose(&self) -> Result<Report<Map>, LoaderError> {
        self.with(&STRING_TO_MAP)
    }

    /// Get a reference to the raw source string
    pub fn source_ref(&self) -> &str {
        &self.source
    }
}
