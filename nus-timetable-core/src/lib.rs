//! NUS Timetable Core Library
//!
//! This library provides the module-catalog cache and timetable assembly
//! logic for the NUS timetable planner, backed by the NUSMods v2 API.

pub mod catalog;
pub mod error;
pub mod semester;
pub mod timetable;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{catalog::*, semester::*, timetable::*, types::*};
}
