use std::fmt;

use serde::{Deserialize, Serialize};

/// Request-scoped academic term identifier
///
/// NUS terms are "1" and "2" for the regular semesters plus "3" and "4" for
/// the special terms. The value is kept as the raw string used in the
/// request; only the human-readable label interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Semester(String);

impl Semester {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label for display
    pub fn label(&self) -> String {
        match self.0.as_str() {
            "3" => "Special Term 1".to_string(),
            "4" => "Special Term 2".to_string(),
            other => format!("Semester {}", other),
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
