//! Seed files: TOML descriptions of records used to prime a fresh registry
//!
//! Nothing persists between sessions, so a seed is the only way to start from
//! existing data. Entries are replayed through the normal registry operations,
//! which means every business rule applies and every entry shows up in the
//! activity feed.

use crate::core::error::RecordsError;
use crate::core::registry::Registry;
use crate::info;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while reading or applying a seed
#[derive(Error, Debug)]
pub enum SeedError {
    /// The file could not be read
    #[error("Failed to read seed file {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid seed TOML
    #[error("Invalid seed file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An entry broke a business rule
    #[error("Seed entry rejected: {0}")]
    Records(#[from] RecordsError),
}

/// An instructor entry
#[derive(Debug, Clone, Deserialize)]
pub struct InstructorSeed {
    /// Instructor id
    pub id: String,
    /// Display name
    pub name: String,
    /// Department
    pub department: String,
    /// Courses to take over, if they exist and are unassigned at that point
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// A course entry
#[derive(Debug, Clone, Deserialize)]
pub struct CourseSeed {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Unit count
    pub units: u32,
    /// Year level
    pub year_level: u8,
    /// Instructor id
    #[serde(default)]
    pub instructor: Option<String>,
}

/// A student entry
#[derive(Debug, Clone, Deserialize)]
pub struct StudentSeed {
    /// Student id
    pub id: String,
    /// Display name
    pub name: String,
    /// Year level
    pub year_level: u8,
    /// Course codes to enroll in (at most three)
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// A grade written as a number or as text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GradeValue {
    /// `grade = 90`
    Number(f64),
    /// `grade = "90"`
    Text(String),
}

/// A grade entry
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSeed {
    /// Student id
    pub student: String,
    /// Course code
    pub course: String,
    /// Grade value
    pub grade: GradeValue,
}

/// Parsed seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    /// Instructors, created first
    #[serde(default)]
    pub instructors: Vec<InstructorSeed>,
    /// Courses, created after instructors
    #[serde(default)]
    pub courses: Vec<CourseSeed>,
    /// Students, created after courses
    #[serde(default)]
    pub students: Vec<StudentSeed>,
    /// Grades, applied last
    #[serde(default)]
    pub grades: Vec<GradeSeed>,
}

impl Seed {
    /// Parse a seed from TOML text
    ///
    /// # Errors
    /// `SeedError::Parse` when the text does not match the seed layout
    pub fn from_toml(toml_str: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a seed file
    ///
    /// # Errors
    /// `SeedError::Io` or `SeedError::Parse`
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let content = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Replay every entry into `registry`: instructors, courses, students, grades
    ///
    /// # Errors
    /// `SeedError::Records` at the first entry a rule rejects; earlier entries stay applied
    pub fn apply(&self, registry: &mut Registry) -> Result<(), SeedError> {
        for instructor in &self.instructors {
            let codes: Vec<&str> = instructor.subjects.iter().map(String::as_str).collect();
            registry.add_instructor(
                &instructor.id,
                &instructor.name,
                &instructor.department,
                &codes,
            )?;
        }
        for course in &self.courses {
            registry.add_course(
                &course.code,
                &course.name,
                course.units,
                course.year_level,
                course.instructor.as_deref(),
            )?;
        }
        for student in &self.students {
            let codes: Vec<&str> = student.subjects.iter().map(String::as_str).collect();
            registry.register_student(&student.id, &student.name, student.year_level, &codes)?;
        }
        for grade in &self.grades {
            match &grade.grade {
                GradeValue::Number(value) => {
                    registry.set_grade(&grade.student, &grade.course, *value)?;
                }
                GradeValue::Text(raw) => {
                    registry.enter_grade(&grade.student, &grade.course, raw)?;
                }
            }
        }
        Ok(())
    }

    /// Build a fresh registry from this seed
    ///
    /// # Errors
    /// See [`apply`](Self::apply)
    pub fn build_registry(&self) -> Result<Registry, SeedError> {
        let mut registry = Registry::new();
        self.apply(&mut registry)?;
        Ok(registry)
    }
}

/// Read a seed file and build a registry from it
///
/// # Errors
/// Any [`SeedError`]
pub fn load_seed(path: &Path) -> Result<Registry, SeedError> {
    let seed = Seed::from_file(path)?;
    let registry = seed.build_registry()?;
    let stats = registry.dashboard();
    info!(
        "Seed {} loaded: {} students, {} instructors, {} courses",
        path.display(),
        stats.students,
        stats.instructors,
        stats.courses
    );
    Ok(registry)
}
