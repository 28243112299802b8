use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A module code such as "CS2103".
///
/// Codes are case-insensitive; the constructor trims and uppercases so a
/// `ModuleCode` is always in its canonical form. Every cache lookup and
/// storage key goes through this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleCode(String);

impl ModuleCode {
    /// Normalize a raw code (trim + uppercase)
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One entry of the upstream module list
///
/// Only the code is typed; the rest of the record (title, offered
/// semesters, ...) is carried opaquely so unknown upstream fields survive a
/// round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSummary {
    #[serde(rename = "moduleCode")]
    pub module_code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-module detail record from the upstream catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetail {
    /// Module code as reported upstream
    #[serde(rename = "moduleCode", default)]
    pub module_code: String,
    /// Per-semester blocks; a module may offer different sessions per term
    #[serde(rename = "semesterData", default)]
    pub semester_data: Vec<SemesterBlock>,
    /// Remaining upstream fields, kept opaque
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One semester's worth of data inside a module detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterBlock {
    pub semester: SemesterId,
    #[serde(default)]
    pub timetable: Vec<Session>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Semester identifier as sent by the upstream catalog
///
/// The API reports semesters numerically but string forms occur as well;
/// requests always carry the semester as a string, so comparison happens on
/// the string rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SemesterId {
    Number(u64),
    Text(String),
}

impl SemesterId {
    /// Compare against a requested semester string
    pub fn matches(&self, wanted: &str) -> bool {
        match self {
            Self::Number(n) => n.to_string() == wanted,
            Self::Text(s) => s == wanted,
        }
    }
}

impl fmt::Display for SemesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One scheduled class occurrence (lecture, tutorial, lab, ...)
///
/// Beyond `lessonType` the record is opaque: day, start/end time, venue and
/// class number pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "lessonType")]
    pub lesson_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
