use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{ModuleCode, Session, catalog::ModuleCatalog};

/// Lesson types kept in a generated timetable, in output order
///
/// Sessions of any other type (exams, recorded lectures, ...) are dropped.
/// Retained sessions are concatenated type by type in this order, keeping
/// source order within each type, so output is reproducible regardless of
/// how the upstream interleaves its timetable entries.
pub const ALLOWED_LESSON_TYPES: [&str; 4] =
    ["Lecture", "Tutorial", "Laboratory", "Sectional Teaching"];

/// Request body for timetable generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRequest {
    pub modules: Vec<String>,
    pub semester: String,
}

/// Generated timetable: module code to its sessions for one semester
pub type Timetable = HashMap<String, Vec<Session>>;

/// Turns a module selection plus semester into a consolidated timetable
///
/// Pure pipeline over request-scoped data; all upstream access goes through
/// the shared [`ModuleCatalog`].
#[derive(Clone)]
pub struct TimetableAssembler {
    catalog: Arc<ModuleCatalog>,
}

impl TimetableAssembler {
    pub fn new(catalog: Arc<ModuleCatalog>) -> Self {
        Self { catalog }
    }

    /// Build a timetable for the given module codes and semester
    ///
    /// Best effort over the requested set: a module that cannot be fetched,
    /// is not offered in the semester, or has no allowed sessions is
    /// omitted from the result rather than failing the whole request.
    pub async fn build(&self, modules: &[String], semester: &str) -> Timetable {
        let mut timetable = Timetable::new();

        for raw in modules {
            let code = ModuleCode::new(raw);

            let detail = match self.catalog.get_module_detail(code.as_str()).await {
                Ok(detail) => detail,
                Err(e) => {
                    tracing::warn!("skipping module {}: {}", code, e);
                    continue;
                }
            };

            // First block matching the requested semester, compared as strings
            let Some(block) = detail
                .semester_data
                .iter()
                .find(|block| block.semester.matches(semester))
            else {
                tracing::debug!("module {} has no data for semester {}", code, semester);
                continue;
            };

            let sessions = filter_sessions(&block.timetable);
            if sessions.is_empty() {
                continue;
            }

            timetable.insert(code.into_string(), sessions);
        }

        timetable
    }
}

fn filter_sessions(timetable: &[Session]) -> Vec<Session> {
    let mut kept = Vec::new();
    for lesson_type in ALLOWED_LESSON_TYPES {
        kept.extend(
            timetable
                .iter()
                .filter(|session| session.lesson_type == lesson_type)
                .cloned(),
        );
    }
    kept
}
