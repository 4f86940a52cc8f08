//! Diagnostics reported alongside results
//!
//! Parsing and composing never fail on bad data; instead they note what they
//! skipped, dropped or defaulted. Those notes travel with the result in a
//! [`Report`] so callers decide whether and how to show them.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A result value plus the diagnostics produced while building it
#[derive(Debug, Clone)]
pub struct Report<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Report<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Diagnostics at or above `min`
    pub fn at_least(&self, min: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity >= min)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Chain a further step, carrying this report's diagnostics forward
    pub fn and_then<U, E>(
        self,
        f: impl FnOnce(T) -> Result<Report<U>, E>,
    ) -> Result<Report<U>, E> {
        let mut diagnostics = self.diagnostics;
        let next = f(self.value)?;
        diagnostics.extend(next.diagnostics);
        Ok(Report::new(next.value, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_filters() {
        let report = Report::new(
            (),
            vec![
                Diagnostic::info("composed"),
                Diagnostic::warning("no spawn"),
                Diagnostic::warning("short column"),
            ],
        );
        assert_eq!(report.at_least(Severity::Warning).count(), 2);
        assert_eq!(report.at_least(Severity::Info).count(), 3);
        assert_eq!(report.warnings().count(), 2);
        assert!(report.has_warnings());
    }

    #[test]
    fn test_and_then_carries_diagnostics() {
        let first = Report::new(1, vec![Diagnostic::warning("first")]);
        let chained: Result<Report<i32>, String> =
            first.and_then(|n| Ok(Report::new(n + 1, vec![Diagnostic::info("second")])));
        let chained = chained.unwrap();
        assert_eq!(chained.value, 2);
        assert_eq!(chained.diagnostics.len(), 2);
        assert_eq!(chained.diagnostics[0].message, "first");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Diagnostic::warning("no spawn").to_string(),
            "warning: no spawn"
        );
    }
}
