//! Instructor model

use serde::Serialize;

/// Represents an instructor and the courses they teach
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructor {
    /// Instructor id, unique within a registry
    pub id: String,

    /// Display name
    pub name: String,

    /// Department (free text, e.g., "Computer Science")
    pub department: String,

    /// Codes of assigned courses, in assignment order
    subjects: Vec<String>,
}

impl Instructor {
    /// Create a new instructor with no courses
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            subjects: Vec::new(),
        }
    }

    /// Codes of the assigned courses
    #[must_use]
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Whether this instructor teaches the given course
    #[must_use]
    pub fn teaches(&self, course_code: &str) -> bool {
        self.subjects.iter().any(|code| code == course_code)
    }

    /// Record a course assignment
    ///
    /// Called by the registry while it sets the course's instructor reference;
    /// assigning the same course twice keeps a single entry.
    pub(crate) fn assign_subject(&mut self, course_code: &str) {
        if !self.teaches(course_code) {
            self.subjects.push(course_code.to_string());
        }
    }

    /// Drop a course assignment. Returns `true` if it was present.
    pub(crate) fn release_subject(&mut self, course_code: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|code| code != course_code);
        self.subjects.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_creation() {
        let instructor = Instructor::new("P1", "Ada Lovelace", "Computer Science");

        assert_eq!(instructor.id, "P1");
        assert_eq!(instructor.name, "Ada Lovelace");
        assert_eq!(instructor.department, "Computer Science");
        assert!(instructor.subjects().is_empty());
    }

    #[test]
    fn test_assign_keeps_order_and_skips_duplicates() {
        let mut instructor = Instructor::new("P1", "Ada Lovelace", "Computer Science");

        instructor.assign_subject("CS101");
        instructor.assign_subject("CS201");
        instructor.assign_subject("CS101");

        assert_eq!(instructor.subjects(), ["CS101", "CS201"]);
        assert!(instructor.teaches("CS201"));
    }

    #[test]
    fn test_release_subject() {
        let mut instructor = Instructor::new("P1", "Ada Lovelace", "Computer Science");
        instructor.assign_subject("CS101");

        assert!(instructor.release_subject("CS101"));
        assert!(!instructor.release_subject("CS101"));
        assert!(instructor.subjects().is_empty());
    }
}
