//! Business-rule failures surfaced by the records model

use thiserror::Error;

/// Every expected failure of a registry or entity operation.
///
/// None of these are fatal: the caller shows the message and carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordsError {
    /// A student with this id already exists
    #[error("A student with ID '{0}' already exists")]
    DuplicateStudent(String),

    /// An instructor with this id already exists
    #[error("An instructor with ID '{0}' already exists")]
    DuplicateInstructor(String),

    /// A course with this code already exists
    #[error("A course with code '{0}' already exists")]
    DuplicateCourse(String),

    /// No student with this id
    #[error("Student '{0}' not found")]
    UnknownStudent(String),

    /// No instructor with this id
    #[error("Instructor '{0}' not found")]
    UnknownInstructor(String),

    /// No course with this code
    #[error("Course '{0}' not found")]
    UnknownCourse(String),

    /// Year level outside 1..=4
    #[error("Year level must be between 1 and 4 (got {0})")]
    InvalidYearLevel(u8),

    /// Grade text that is not a finite number
    #[error("Grade '{0}' is not a number")]
    InvalidGrade(String),

    /// Student already holds the maximum number of courses
    #[error("{student} is already enrolled in the maximum of {max} courses")]
    CapacityReached {
        /// Student id
        student: String,
        /// Enrollment cap
        max: usize,
    },

    /// Student is already enrolled in this course
    #[error("{student} is already enrolled in {course}")]
    AlreadyEnrolled {
        /// Student id
        student: String,
        /// Course code
        course: String,
    },

    /// Student has no grade entry for this course
    #[error("{student} is not enrolled in {course}")]
    NotEnrolled {
        /// Student id
        student: String,
        /// Course code
        course: String,
    },

    /// Registration requested more courses than the cap allows
    #[error("Maximum {max} subjects allowed per student (requested {requested})")]
    TooManySubjects {
        /// Number of course codes requested
        requested: usize,
        /// Enrollment cap
        max: usize,
    },

    /// Promotion refused; carries the progression message
    #[error("Cannot promote: {0}")]
    NotEligible(String),
}

/// Result alias used throughout the records model
pub type RecordsResult<T> = Result<T, RecordsError>;
