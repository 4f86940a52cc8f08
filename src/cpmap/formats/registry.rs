//! Format registry for map serialization
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`, so the CLI can pick an output by name.

use crate::cpmap::exporting::{export_with, ExportOptions};
use crate::cpmap::graph::Map;
use crate::cpmap::snapshot;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<snapshot::SnapshotError> for FormatError {
    fn from(err: snapshot::SnapshotError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

/// Trait for map formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, map: &Map) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// The native save document
#[derive(Debug, Clone, Default)]
pub struct DocumentFormatter {
    pub options: ExportOptions,
}

impl Formatter for DocumentFormatter {
    fn name(&self) -> &str {
        "cpmap"
    }

    fn serialize(&self, map: &Map) -> Result<String, FormatError> {
        Ok(export_with(map, &self.options))
    }

    fn description(&self) -> &str {
        "Save document with Global.<Name> = Array(...) assignments"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, map: &Map) -> Result<String, FormatError> {
        Ok(snapshot::to_json(map)?)
    }

    fn description(&self) -> &str {
        "JSON snapshot of the checkpoint graph"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, map: &Map) -> Result<String, FormatError> {
        Ok(snapshot::to_yaml(map)?)
    }

    fn description(&self) -> &str {
        "YAML snapshot of the checkpoint graph"
    }
}

/// Registry of map formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a map using the specified format
    pub fn serialize(&self, map: &Map, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(map)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(DocumentFormatter::default());
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);
        registry.register(super::TreevizFormatter::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpmap::graph::Checkpoint;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _map: &Map) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(
            registry
                .serialize(&Map::new(Checkpoint::new(0)), "test")
                .unwrap(),
            "test output"
        );
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        let result = registry.serialize(&Map::new(Checkpoint::new(0)), "nonexistent");
        match result.unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected FormatNotFound error"),
        }
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["cpmap", "json", "treeviz", "yaml"]
        );
    }

    #[test]
    fn test_document_formatter_uses_options() {
        let formatter = DocumentFormatter {
            options: ExportOptions {
                indent: "    ".to_string(),
            },
        };
        let output = formatter.serialize(&Map::new(Checkpoint::new(0))).unwrap();
        assert!(output.contains("\n    Global.Prime = Array(False);"));
    }

    #[test]
    fn test_format_error_display() {
        let err = FormatError::FormatNotFound("test".to_string());
        assert_eq!(format!("{err}"), "Format 'test' not found");
    }
}
