//! Student model and the grade-driven rules evaluated on it

use super::{Course, MAX_SUBJECTS_PER_STUDENT, MAX_YEAR_LEVEL, PASSING_GRADE};
use crate::core::error::{RecordsError, RecordsResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A course the student is enrolled in, together with its grade slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrollment {
    /// Course code
    pub course: String,
    /// Grade, `None` until entered
    pub grade: Option<f64>,
}

/// Overall academic standing derived from the current grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    /// Not enrolled in anything
    NoSubjects,
    /// At least one grade is missing
    Incomplete,
    /// Every grade is at or above the passing threshold
    Passed,
    /// Every course is graded and at least one is below the threshold
    Failed,
}

impl OverallStatus {
    /// Label shown in tables and activity output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoSubjects => "No subjects enrolled",
            Self::Incomplete => "INCOMPLETE",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OverallStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "incomplete" => Ok(Self::Incomplete),
            "none" | "no_subjects" | "no-subjects" | "no subjects enrolled" => {
                Ok(Self::NoSubjects)
            }
            _ => Err(format!("Unknown status: '{s}'")),
        }
    }
}

/// Status of a single enrolled course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectStatus {
    /// Not graded yet
    Pending,
    /// Graded at or above the passing threshold
    Passed,
    /// Graded below the passing threshold
    Failed,
}

impl SubjectStatus {
    /// Classify a grade slot
    #[must_use]
    pub fn from_grade(grade: Option<f64>) -> Self {
        match grade {
            None => Self::Pending,
            Some(g) if g >= PASSING_GRADE => Self::Passed,
            Some(_) => Self::Failed,
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "PENDING",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        })
    }
}

/// Outcome of a year-progression check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progression {
    /// Whether the student may move to the next year
    pub can_proceed: bool,
    /// Explanation suitable for display
    pub message: String,
}

impl Progression {
    fn blocked(message: impl Into<String>) -> Self {
        Self {
            can_proceed: false,
            message: message.into(),
        }
    }
}

/// Represents a student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// Student id, unique within a registry
    pub id: String,

    /// Display name
    pub name: String,

    /// Current year level (1-4)
    year_level: u8,

    /// Enrolled courses in enrollment order, each with exactly one grade slot
    enrollments: Vec<Enrollment>,
}

impl Student {
    /// Create a new student with no enrollments
    ///
    /// The year level is not range-checked here; the registry does that on insert.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, year_level: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year_level,
            enrollments: Vec::new(),
        }
    }

    /// Current year level
    #[must_use]
    pub const fn year_level(&self) -> u8 {
        self.year_level
    }

    /// Enrollments with their grade slots
    #[must_use]
    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// Codes of the enrolled courses, in enrollment order
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.enrollments.iter().map(|e| e.course.as_str())
    }

    /// Number of enrolled courses
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.enrollments.len()
    }

    /// Whether the student is enrolled in the given course
    #[must_use]
    pub fn is_enrolled(&self, course_code: &str) -> bool {
        self.enrollments.iter().any(|e| e.course == course_code)
    }

    /// Grade slot for a course: `None` if not enrolled, `Some(None)` if ungraded
    #[must_use]
    pub fn grade(&self, course_code: &str) -> Option<Option<f64>> {
        self.enrollments
            .iter()
            .find(|e| e.course == course_code)
            .map(|e| e.grade)
    }

    /// Status of a single enrolled course
    #[must_use]
    pub fn subject_status(&self, course_code: &str) -> Option<SubjectStatus> {
        self.grade(course_code).map(SubjectStatus::from_grade)
    }

    /// Enroll in a course, creating an empty grade slot for it
    ///
    /// # Errors
    /// `CapacityReached` when already at the cap, `AlreadyEnrolled` when the
    /// course is already on the list. State is unchanged on error.
    pub fn enroll(&mut self, course: &Course) -> RecordsResult<()> {
        if self.enrollments.len() >= MAX_SUBJECTS_PER_STUDENT {
            return Err(RecordsError::CapacityReached {
                student: self.id.clone(),
                max: MAX_SUBJECTS_PER_STUDENT,
            });
        }
        if self.is_enrolled(&course.code) {
            return Err(RecordsError::AlreadyEnrolled {
                student: self.id.clone(),
                course: course.code.clone(),
            });
        }
        self.enrollments.push(Enrollment {
            course: course.code.clone(),
            grade: None,
        });
        Ok(())
    }

    /// Drop a course and its grade slot. Returns `true` if it was present.
    pub(crate) fn withdraw(&mut self, course_code: &str) -> bool {
        let before = self.enrollments.len();
        self.enrollments.retain(|e| e.course != course_code);
        self.enrollments.len() != before
    }

    /// Record a grade for an enrolled course
    ///
    /// Any finite value is accepted, including ones outside 0-100.
    ///
    /// # Errors
    /// `InvalidGrade` for NaN or infinity, `NotEnrolled` if the student has no
    /// grade slot for `course_code`.
    pub fn set_grade(&mut self, course_code: &str, grade: f64) -> RecordsResult<()> {
        if !grade.is_finite() {
            return Err(RecordsError::InvalidGrade(grade.to_string()));
        }
        let slot = self
            .enrollments
            .iter_mut()
            .find(|e| e.course == course_code)
            .ok_or_else(|| RecordsError::NotEnrolled {
                student: self.id.clone(),
                course: course_code.to_string(),
            })?;
        slot.grade = Some(grade);
        Ok(())
    }

    /// Overall standing, computed from the current grades
    #[must_use]
    pub fn overall_status(&self) -> OverallStatus {
        if self.enrollments.is_empty() {
            return OverallStatus::NoSubjects;
        }
        let mut all_passed = true;
        for enrollment in &self.enrollments {
            match enrollment.grade {
                None => return OverallStatus::Incomplete,
                Some(g) if g < PASSING_GRADE => all_passed = false,
                Some(_) => {}
            }
        }
        if all_passed {
            OverallStatus::Passed
        } else {
            OverallStatus::Failed
        }
    }

    /// Mean of the entered grades, rounded to two decimals; `0.0` if nothing is graded
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn gpa(&self) -> f64 {
        let graded: Vec<f64> = self.enrollments.iter().filter_map(|e| e.grade).collect();
        if graded.is_empty() {
            return 0.0;
        }
        let mean = graded.iter().sum::<f64>() / graded.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    /// Decide whether the student may advance a year. Pure query.
    ///
    /// `courses` resolves course codes to names for the failure message; a code
    /// missing from it is reported as-is.
    #[must_use]
    pub fn can_proceed_to_next_year(&self, courses: &BTreeMap<String, Course>) -> Progression {
        if self.year_level >= MAX_YEAR_LEVEL {
            return Progression::blocked("Already in final year");
        }
        if self.enrollments.is_empty() {
            return Progression::blocked("No subjects enrolled");
        }
        if self.enrollments.iter().any(|e| e.grade.is_none()) {
            return Progression::blocked("Not all subjects have been graded");
        }

        let failed: Vec<&str> = self
            .enrollments
            .iter()
            .filter(|e| e.grade.is_some_and(|g| g < PASSING_GRADE))
            .map(|e| {
                courses
                    .get(&e.course)
                    .map_or(e.course.as_str(), |c| c.name.as_str())
            })
            .collect();

        if failed.is_empty() {
            Progression {
                can_proceed: true,
                message: format!("Can proceed to Year {}", self.year_level + 1),
            }
        } else {
            Progression::blocked(format!("Failed subjects: {}", failed.join(", ")))
        }
    }

    /// Advance one year level. The registry only calls this after a passing
    /// progression check, so the level never exceeds the maximum.
    pub(crate) fn promote(&mut self) -> u8 {
        if self.year_level < MAX_YEAR_LEVEL {
            self.year_level += 1;
        }
        self.year_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> BTreeMap<String, Course> {
        [
            Course::new("CS101", "Intro to Programming", 3, 1),
            Course::new("MATH101", "Calculus I", 4, 1),
            Course::new("PHYS101", "Physics I", 4, 1),
            Course::new("ENG101", "Composition", 3, 1),
        ]
        .into_iter()
        .map(|c| (c.code.clone(), c))
        .collect()
    }

    fn enrolled(codes: &[&str]) -> Student {
        let courses = catalog();
        let mut student = Student::new("S1", "Grace Hopper", 1);
        for code in codes {
            student.enroll(&courses[*code]).unwrap();
        }
        student
    }

    #[test]
    fn test_enroll_creates_empty_grade_slot() {
        let student = enrolled(&["CS101"]);

        assert_eq!(student.subject_count(), 1);
        assert_eq!(student.grade("CS101"), Some(None));
        assert_eq!(student.subject_status("CS101"), Some(SubjectStatus::Pending));
    }

    #[test]
    fn test_fourth_enrollment_fails_without_change() {
        let courses = catalog();
        let mut student = enrolled(&["CS101", "MATH101", "PHYS101"]);
        let before = student.clone();

        let err = student.enroll(&courses["ENG101"]).unwrap_err();

        assert_eq!(
            err,
            RecordsError::CapacityReached {
                student: "S1".to_string(),
                max: 3
            }
        );
        assert_eq!(student, before);
    }

    #[test]
    fn test_duplicate_enrollment_rejected() {
        let courses = catalog();
        let mut student = enrolled(&["CS101"]);
        student.set_grade("CS101", 88.0).unwrap();

        assert!(matches!(
            student.enroll(&courses["CS101"]),
            Err(RecordsError::AlreadyEnrolled { .. })
        ));
        assert_eq!(student.subject_count(), 1);
        assert_eq!(student.grade("CS101"), Some(Some(88.0)));
    }

    #[test]
    fn test_set_grade_requires_enrollment() {
        let mut student = enrolled(&["CS101"]);

        assert!(matches!(
            student.set_grade("MATH101", 90.0),
            Err(RecordsError::NotEnrolled { .. })
        ));
        // No bounds check on the value itself
        assert!(student.set_grade("CS101", 150.0).is_ok());
        assert_eq!(student.grade("CS101"), Some(Some(150.0)));
    }

    #[test]
    fn test_non_finite_grade_rejected() {
        let mut student = enrolled(&["CS101"]);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                student.set_grade("CS101", bad),
                Err(RecordsError::InvalidGrade(_))
            ));
        }
        assert_eq!(student.grade("CS101"), Some(None));
        assert_eq!(student.overall_status(), OverallStatus::Incomplete);
    }

    #[test]
    fn test_overall_status_transitions() {
        let mut student = Student::new("S2", "Alan Turing", 2);
        assert_eq!(student.overall_status(), OverallStatus::NoSubjects);

        let courses = catalog();
        student.enroll(&courses["CS101"]).unwrap();
        student.enroll(&courses["MATH101"]).unwrap();
        student.set_grade("CS101", 90.0).unwrap();
        assert_eq!(student.overall_status(), OverallStatus::Incomplete);

        student.set_grade("MATH101", 75.0).unwrap();
        assert_eq!(student.overall_status(), OverallStatus::Passed);

        student.set_grade("MATH101", 74.99).unwrap();
        assert_eq!(student.overall_status(), OverallStatus::Failed);
    }

    #[test]
    fn test_gpa() {
        let mut student = enrolled(&["CS101", "MATH101"]);
        assert!(student.gpa().abs() < f64::EPSILON);

        student.set_grade("CS101", 80.0).unwrap();
        student.set_grade("MATH101", 70.0).unwrap();
        assert!((student.gpa() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_rounds_to_two_decimals() {
        let mut student = enrolled(&["CS101", "MATH101", "PHYS101"]);
        student.set_grade("CS101", 90.0).unwrap();
        student.set_grade("MATH101", 85.0).unwrap();
        student.set_grade("PHYS101", 81.0).unwrap();

        assert!((student.gpa() - 85.33).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_ignores_ungraded() {
        let mut student = enrolled(&["CS101", "MATH101"]);
        student.set_grade("CS101", 91.5).unwrap();

        assert!((student.gpa() - 91.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_final_year_cannot_proceed() {
        let courses = catalog();
        let mut student = Student::new("S4", "Katherine Johnson", 4);
        student.enroll(&courses["CS101"]).unwrap();
        student.set_grade("CS101", 100.0).unwrap();

        let progression = student.can_proceed_to_next_year(&courses);
        assert!(!progression.can_proceed);
        assert_eq!(progression.message, "Already in final year");
    }

    #[test]
    fn test_progression_blockers_in_order() {
        let courses = catalog();
        let mut student = Student::new("S1", "Grace Hopper", 1);

        let p = student.can_proceed_to_next_year(&courses);
        assert_eq!(p.message, "No subjects enrolled");

        student.enroll(&courses["CS101"]).unwrap();
        student.enroll(&courses["MATH101"]).unwrap();
        student.enroll(&courses["PHYS101"]).unwrap();
        student.set_grade("CS101", 60.0).unwrap();
        let p = student.can_proceed_to_next_year(&courses);
        assert_eq!(p.message, "Not all subjects have been graded");

        student.set_grade("MATH101", 95.0).unwrap();
        student.set_grade("PHYS101", 70.0).unwrap();
        let p = student.can_proceed_to_next_year(&courses);
        assert!(!p.can_proceed);
        assert_eq!(p.message, "Failed subjects: Intro to Programming, Physics I");
    }

    #[test]
    fn test_progression_success_does_not_mutate() {
        let courses = catalog();
        let mut student = enrolled(&["CS101"]);
        student.set_grade("CS101", 80.0).unwrap();

        let p = student.can_proceed_to_next_year(&courses);
        assert!(p.can_proceed);
        assert_eq!(p.message, "Can proceed to Year 2");
        assert_eq!(student.year_level(), 1);
    }

    #[test]
    fn test_withdraw_removes_grade_slot() {
        let mut student = enrolled(&["CS101", "MATH101"]);
        student.set_grade("CS101", 80.0).unwrap();

        assert!(student.withdraw("CS101"));
        assert!(!student.withdraw("CS101"));
        assert_eq!(student.grade("CS101"), None);
        assert_eq!(student.subjects().collect::<Vec<_>>(), vec!["MATH101"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut student = enrolled(&["CS101"]);
        student.set_grade("CS101", 82.0).unwrap();

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["year_level"], 1);
        assert_eq!(json["enrollments"][0]["course"], "CS101");
        assert_eq!(json["enrollments"][0]["grade"], 82.0);
        assert_eq!(
            serde_json::to_value(student.overall_status()).unwrap(),
            "PASSED"
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("passed".parse::<OverallStatus>(), Ok(OverallStatus::Passed));
        assert_eq!("FAILED".parse::<OverallStatus>(), Ok(OverallStatus::Failed));
        assert_eq!(
            "Incomplete".parse::<OverallStatus>(),
            Ok(OverallStatus::Incomplete)
        );
        assert!("graduated".parse::<OverallStatus>().is_err());
    }
}
