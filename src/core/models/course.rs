//! Course model

use serde::Serialize;

/// Represents a course offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    /// Course code, unique within a registry (e.g., "CS101")
    pub code: String,

    /// Course name (e.g., "Introduction to Programming")
    pub name: String,

    /// Unit count
    pub units: u32,

    /// Year level the course is offered to (1-4)
    pub year_level: u8,

    /// Assigned instructor id. Only the registry changes this, so the
    /// instructor's own course list always mirrors it.
    instructor: Option<String>,
}

impl Course {
    /// Create a new course with no instructor
    ///
    /// # Arguments
    /// * `code` - Unique course code
    /// * `name` - Course name
    /// * `units` - Unit count
    /// * `year_level` - Year level the course is offered to
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, units: u32, year_level: u8) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            units,
            year_level,
            instructor: None,
        }
    }

    /// Id of the assigned instructor, if any
    #[must_use]
    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    /// Whether an instructor is assigned
    #[must_use]
    pub const fn has_instructor(&self) -> bool {
        self.instructor.is_some()
    }

    /// Replace the instructor reference, returning the previous one
    pub(crate) fn set_instructor(&mut self, instructor: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.instructor, instructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("CS101", "Introduction to Programming", 3, 1);

        assert_eq!(course.code, "CS101");
        assert_eq!(course.name, "Introduction to Programming");
        assert_eq!(course.units, 3);
        assert_eq!(course.year_level, 1);
        assert!(course.instructor().is_none());
        assert!(!course.has_instructor());
    }

    #[test]
    fn test_set_instructor_returns_previous() {
        let mut course = Course::new("MATH201", "Linear Algebra", 4, 2);

        assert_eq!(course.set_instructor(Some("P1".to_string())), None);
        assert_eq!(course.instructor(), Some("P1"));

        assert_eq!(
            course.set_instructor(Some("P2".to_string())),
            Some("P1".to_string())
        );
        assert_eq!(course.instructor(), Some("P2"));

        assert_eq!(course.set_instructor(None), Some("P2".to_string()));
        assert!(!course.has_instructor());
    }
}
