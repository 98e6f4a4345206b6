//! Data models for `NuRecords`

pub mod course;
pub mod instructor;
pub mod student;

pub use course::Course;
pub use instructor::Instructor;
pub use student::{Enrollment, OverallStatus, Progression, Student, SubjectStatus};

use crate::core::error::{RecordsError, RecordsResult};

/// Most courses a student may be enrolled in at once
pub const MAX_SUBJECTS_PER_STUDENT: usize = 3;

/// Lowest grade that counts as passing
pub const PASSING_GRADE: f64 = 75.0;

/// First year level
pub const MIN_YEAR_LEVEL: u8 = 1;

/// Final year level; students here cannot be promoted
pub const MAX_YEAR_LEVEL: u8 = 4;

/// Check that a year level lies in `MIN_YEAR_LEVEL..=MAX_YEAR_LEVEL`
///
/// # Errors
/// `InvalidYearLevel` when out of range
pub fn validate_year_level(year_level: u8) -> RecordsResult<u8> {
    if (MIN_YEAR_LEVEL..=MAX_YEAR_LEVEL).contains(&year_level) {
        Ok(year_level)
    } else {
        Err(RecordsError::InvalidYearLevel(year_level))
    }
}
