//! Output formats for checkpoint maps
//!
//! This module contains the different ways a composed map can be written out:
//! - the native save document (`cpmap`)
//! - JSON and YAML snapshots (`json`, `yaml`)
//! - a one-line-per-node tree for inspection (`treeviz`)

pub mod registry;
pub mod treeviz;

pub use registry::{
    DocumentFormatter, FormatError, FormatRegistry, Formatter, JsonFormatter, YamlFormatter,
};
pub use treeviz::{to_treeviz_str_with, TreevizFormatter, TreevizOptions};
