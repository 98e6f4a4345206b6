//! Table filters: case-insensitive name search plus per-column selectors

use crate::core::models::{Course, Instructor, OverallStatus, Student};

fn name_matches(name: &str, search: Option<&str>) -> bool {
    search.is_none_or(|term| name.to_lowercase().contains(&term.to_lowercase()))
}

/// Filter over the student table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Substring of the name
    pub search: Option<String>,
    /// Exact year level
    pub year_level: Option<u8>,
    /// Exact overall status
    pub status: Option<OverallStatus>,
}

impl StudentFilter {
    /// Whether the student passes every set criterion
    #[must_use]
    pub fn matches(&self, student: &Student) -> bool {
        name_matches(&student.name, self.search.as_deref())
            && self.year_level.is_none_or(|y| student.year_level() == y)
            && self.status.is_none_or(|s| student.overall_status() == s)
    }
}

/// Filter over the instructor table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructorFilter {
    /// Substring of the name
    pub search: Option<String>,
    /// Exact department
    pub department: Option<String>,
}

impl InstructorFilter {
    /// Whether the instructor passes every set criterion
    #[must_use]
    pub fn matches(&self, instructor: &Instructor) -> bool {
        name_matches(&instructor.name, self.search.as_deref())
            && self
                .department
                .as_deref()
                .is_none_or(|d| instructor.department == d)
    }
}

/// Filter over the course table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Substring of the name
    pub search: Option<String>,
    /// Exact year level
    pub year_level: Option<u8>,
}

impl CourseFilter {
    /// Whether the course passes every set criterion
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        name_matches(&course.name, self.search.as_deref())
            && self.year_level.is_none_or(|y| course.year_level == y)
    }
}
