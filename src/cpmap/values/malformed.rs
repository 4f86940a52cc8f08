use std::fmt;

/// Stand-in for a column entry that did not have its expected shape.
///
/// Keeps the original text so nothing is lost if the entry is written back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedDataPlaceholder {
    pub raw: String,
    pub error: String,
}

impl MalformedDataPlaceholder {
    pub fn new(raw: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for MalformedDataPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Malformed: {} - Data: \"{}\"]", self.error, self.raw)
    }
}
