//! Report generation for academic records
//!
//! Renders the state of a registry (dashboard, student standings, instructor
//! loads, course rosters, recent activity) as Markdown or HTML.

pub mod formats;

use crate::core::models::Course;
use crate::core::registry::{DashboardStats, Registry};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// One row of the student table
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    /// Student id
    pub id: String,
    /// Student name
    pub name: String,
    /// Year level
    pub year_level: u8,
    /// Enrolled course codes, comma separated
    pub subjects: String,
    /// Overall status label
    pub status: String,
    /// GPA with two decimals
    pub gpa: String,
    /// Progression message
    pub progression: String,
}

/// One row of the instructor table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorRow {
    /// Instructor id
    pub id: String,
    /// Instructor name
    pub name: String,
    /// Department
    pub department: String,
    /// Assigned course codes, comma separated
    pub courses: String,
}

/// One row of the course table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Units
    pub units: u32,
    /// Year level
    pub year_level: u8,
    /// Instructor name or "Not assigned"
    pub instructor: String,
    /// Number of enrolled students
    pub enrolled: usize,
}

/// One row of the activity table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    /// Formatted timestamp
    pub time: String,
    /// Activity message
    pub message: String,
}

/// Everything a report template needs, flattened into display strings
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Report heading
    pub title: String,
    /// Entity counts
    pub dashboard: DashboardStats,
    /// Student table
    pub students: Vec<StudentRow>,
    /// Instructor table
    pub instructors: Vec<InstructorRow>,
    /// Course table
    pub courses: Vec<CourseRow>,
    /// Recent activity, most recent first
    pub activity: Vec<ActivityRow>,
}

impl ReportContext {
    /// Build a context from the current registry state
    ///
    /// # Arguments
    /// * `registry` - Source of all records
    /// * `title` - Report heading
    /// * `time_format` - `chrono` format for activity timestamps
    #[must_use]
    pub fn from_registry(registry: &Registry, title: &str, time_format: &str) -> Self {
        let students = registry
            .students()
            .map(|s| StudentRow {
                id: s.id.clone(),
                name: s.name.clone(),
                year_level: s.year_level(),
                subjects: s.subjects().collect::<Vec<_>>().join(", "),
                status: s.overall_status().to_string(),
                gpa: format!("{:.2}", s.gpa()),
                progression: s.can_proceed_to_next_year(registry.course_catalog()).message,
            })
            .collect();

        let instructors = registry
            .instructors()
            .map(|i| InstructorRow {
                id: i.id.clone(),
                name: i.name.clone(),
                department: i.department.clone(),
                courses: i.subjects().join(", "),
            })
            .collect();

        let courses = registry
            .courses()
            .map(|c| CourseRow {
                code: c.code.clone(),
                name: c.name.clone(),
                units: c.units,
                year_level: c.year_level,
                instructor: instructor_name(registry, c),
                enrolled: registry
                    .enrolled_students(&c.code)
                    .map_or(0, |roster| roster.len()),
            })
            .collect();

        let activity = registry
            .activity()
            .iter()
            .map(|a| ActivityRow {
                time: a.formatted_time(time_format),
                message: a.message.clone(),
            })
            .collect();

        Self {
            title: title.to_string(),
            dashboard: registry.dashboard(),
            students,
            instructors,
            courses,
            activity,
        }
    }
}

fn instructor_name(registry: &Registry, course: &Course) -> String {
    course
        .instructor()
        .and_then(|id| registry.instructor(id))
        .map_or_else(|| "Not assigned".to_string(), |i| i.name.clone())
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
