//! Read-only views assembled from the registry for display and export

use crate::core::activity::ActivityLog;
use crate::core::models::{Course, Instructor, OverallStatus, Progression, Student, SubjectStatus};
use serde::Serialize;

/// Entity counts shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of students
    pub students: usize,
    /// Number of instructors
    pub instructors: usize,
    /// Number of courses
    pub courses: usize,
}

/// One row of a student's course table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRow {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Name of the course's instructor, if assigned
    pub instructor: Option<String>,
    /// Grade, if entered
    pub grade: Option<f64>,
    /// Pending / passed / failed
    pub status: SubjectStatus,
}

/// Everything the student details panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentDetails {
    /// Student id
    pub id: String,
    /// Student name
    pub name: String,
    /// Current year level
    pub year_level: u8,
    /// Overall standing
    pub status: OverallStatus,
    /// Mean of entered grades
    pub gpa: f64,
    /// Per-course rows in enrollment order
    pub subjects: Vec<SubjectRow>,
    /// Promotion decision
    pub progression: Progression,
}

/// Serializable picture of a whole registry
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot<'a> {
    /// Entity counts
    pub dashboard: DashboardStats,
    /// All students, ordered by id
    pub students: Vec<&'a Student>,
    /// All instructors, ordered by id
    pub instructors: Vec<&'a Instructor>,
    /// All courses, ordered by code
    pub courses: Vec<&'a Course>,
    /// Activity feed, most recent first
    pub activity: &'a ActivityLog,
}
