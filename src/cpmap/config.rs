//! Configuration loading for cpmap.
//!
//! `defaults/cpmap.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer user files on top of those defaults
//! via [`Loader`] before deserializing into [`CpmapConfig`].

use crate::cpmap::diagnostics::Severity;
use crate::cpmap::exporting::ExportOptions;
use crate::cpmap::formats::TreevizOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/cpmap.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CpmapConfig {
    pub export: ExportConfig,
    pub inspect: InspectConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Knobs for the document writer.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub indent: String,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        ExportOptions {
            indent: config.indent.clone(),
        }
    }
}

/// Controls the tree printed by `inspect`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InspectConfig {
    pub decode_effects: bool,
    pub show_positions: bool,
}

impl From<&InspectConfig> for TreevizOptions {
    fn from(config: &InspectConfig) -> Self {
        TreevizOptions {
            decode_effects: config.decode_effects,
            show_positions: config.show_positions,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiagnosticsConfig {
    pub min_severity: Severity,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CpmapConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CpmapConfig, ConfigError> {
    Loader::new().build()
}
